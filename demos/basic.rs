//! Basic Output-Cache Example
//!
//! This example demonstrates caching HTTP response payloads in Keva through
//! the output-cache adapter.
//!
//! Usage:
//!   cargo run --example basic

use chrono::{Duration, Utc};
use keva_outcache::{KevaClient, KevaConfig, OutputCache, OutputCacheExt};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct CachedResponse {
    body: String,
    status: u16,
    content_type: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Create Keva client
    let config = KevaConfig::new("http://localhost:15500");
    let client = KevaClient::new(config)?;
    let cache = client.outcache();

    println!("🚀 Keva Output-Cache - Basic Example\n");

    // 1. STORE a rendered response for five minutes
    println!("1. Caching response under 'page:home'");
    let response = CachedResponse {
        body: "<html>Hello, Keva!</html>".to_string(),
        status: 200,
        content_type: "text/html".to_string(),
    };
    cache
        .store("page:home", &response, Utc::now() + Duration::minutes(5), None)
        .await?;

    // 2. FETCH it back, typed
    println!("2. Fetching 'page:home' as CachedResponse");
    let cached: Option<CachedResponse> = cache.fetch_typed("page:home").await?;
    println!("   Value: {:?}\n", cached);

    // 3. FETCH raw, untyped
    println!("3. Fetching 'page:home' as raw JSON");
    let raw = cache.fetch_raw("page:home").await?;
    println!("   Value: {:?}\n", raw);

    // 4. Check existence
    println!("4. Checking if keys exist");
    let exists = cache.exists("page:home").await?;
    println!("   'page:home' exists: {}", exists);

    let exists = cache.exists("page:nonexistent").await?;
    println!("   'page:nonexistent' exists: {}\n", exists);

    // 5. Cache a second page, then invalidate the whole prefix
    println!("5. Caching 'page:about' and invalidating prefix 'page:'");
    cache
        .store("page:about", &response, Utc::now() + Duration::minutes(5), None)
        .await?;
    let deleted = cache.remove_prefixed("page:").await?;
    println!("   Removed {} entries\n", deleted);

    // 6. Removing a key that is already gone is silent
    println!("6. Removing 'page:home' again (already gone)");
    cache.remove("page:home").await?;
    println!("   No error\n");

    // 7. Enumerate whatever else the store holds
    println!("7. Listing all keys");
    let keys = cache.all_keys().await?;
    println!("   {} keys present", keys.len());

    println!("\n✅ Example completed successfully!");

    Ok(())
}
