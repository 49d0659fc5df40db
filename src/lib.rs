//! # Keva Output-Cache Adapter
//!
//! Stores HTTP response payloads in Keva, a remote key-value store, behind a
//! generic output-cache interface so the caching layer can swap its storage
//! backend without changing call sites.
//!
//! ## Features
//!
//! - 💾 **Absolute-expiration writes**: store until an instant; the adapter
//!   converts to the store's relative TTL
//! - 🔑 **Typed or raw access**: any serde-compatible shape round-trips
//!   through the cache
//! - 🧹 **Prefix invalidation**: bulk-remove every key sharing a prefix,
//!   across every store endpoint
//! - 🔄 **Async/Await**: built on Tokio, one independent round trip per call
//! - 🛡️ **Explicit failures**: absent is `None`, never an error; transport
//!   and protocol failures propagate unchanged
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chrono::{Duration, Utc};
//! use keva_outcache::{KevaClient, KevaConfig, OutputCache, OutputCacheExt};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create client
//!     let config = KevaConfig::new("http://localhost:15500");
//!     let client = KevaClient::new(config)?;
//!     let cache = client.outcache();
//!
//!     // Cache a rendered response for five minutes
//!     let expires_at = Utc::now() + Duration::minutes(5);
//!     cache.store("page:home", &"<html>...</html>", expires_at, None).await?;
//!     let body: Option<String> = cache.fetch_typed("page:home").await?;
//!     println!("Cached body: {:?}", body);
//!
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod client;
pub mod error;
pub mod outcache;

pub use cache::{OutputCache, OutputCacheExt};
pub use client::{KevaClient, KevaConfig};
pub use error::{CacheError, Result};
pub use outcache::KevaOutputCache;
