//! Output-cache abstraction
//!
//! The HTTP response-caching layer programs against [`OutputCache`] so the
//! storage backend can be swapped without changing call sites. The trait is
//! object-safe and trades in `serde_json::Value` at the boundary; typed
//! access is layered on top by [`OutputCacheExt`], a blanket extension over
//! any serde-compatible shape.

use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Generic output-cache interface
///
/// Implementations hold no in-process cache state; all mutable state lives in
/// the backing store, so a shared `Arc<dyn OutputCache>` is safe for
/// concurrent invocation.
#[async_trait]
pub trait OutputCache: Send + Sync {
    /// Store a serialized value under `key` until `expires_at`
    ///
    /// An `expires_at` in the past or equal to now removes the key instead,
    /// so a caller requesting immediate expiry observes the key absent on the
    /// next read. `depends_on_key` is accepted for interface compatibility
    /// with backends that support linked invalidation; adapters without that
    /// capability ignore it.
    async fn store_raw(
        &self,
        key: &str,
        value: Value,
        expires_at: DateTime<Utc>,
        depends_on_key: Option<&str>,
    ) -> Result<()>;

    /// Fetch the value stored under `key`
    ///
    /// Returns `Ok(None)` when the key does not exist or has expired; a
    /// payload that is present but unreadable is an error, never `None`.
    async fn fetch_raw(&self, key: &str) -> Result<Option<Value>>;

    /// Whether a live (non-expired) entry is currently stored under `key`
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Remove the entry under `key`
    ///
    /// Idempotent: removing a non-existent key succeeds silently.
    async fn remove(&self, key: &str) -> Result<()>;

    /// Remove every entry whose key starts with `prefix`
    ///
    /// Starts-with matching only: prefix `"key"` matches `"key1"` and
    /// `"key2"` but never `"otherkey"`. Scan-then-delete; not atomic across
    /// the matched set, though each individual removal is. Returns the number
    /// of keys actually deleted.
    async fn remove_prefixed(&self, prefix: &str) -> Result<u64>;

    /// Enumerate every key currently present, in unspecified order
    ///
    /// Each call takes a fresh snapshot of the whole namespace visible to
    /// this cache.
    async fn all_keys(&self) -> Result<Vec<String>>;
}

/// Typed helpers over any [`OutputCache`]
///
/// Any `Serialize`/`DeserializeOwned` shape flows through; serialization
/// failures surface as [`CacheError::Json`](crate::CacheError::Json).
#[async_trait]
pub trait OutputCacheExt: OutputCache {
    /// Serialize `value` and store it under `key` until `expires_at`
    async fn store<T>(
        &self,
        key: &str,
        value: &T,
        expires_at: DateTime<Utc>,
        depends_on_key: Option<&str>,
    ) -> Result<()>
    where
        T: Serialize + Sync,
    {
        let raw = serde_json::to_value(value)?;
        self.store_raw(key, raw, expires_at, depends_on_key).await
    }

    /// Fetch the value under `key` as a `T`
    ///
    /// `Ok(None)` for an absent key; a present payload that does not match
    /// `T` is an error.
    async fn fetch_typed<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned + Send,
    {
        match self.fetch_raw(key).await? {
            Some(raw) => Ok(Some(serde_json::from_value(raw)?)),
            None => Ok(None),
        }
    }
}

impl<C: OutputCache + ?Sized> OutputCacheExt for C {}
