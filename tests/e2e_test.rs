//! Live integration tests for the output-cache adapter
//!
//! These tests require a running Keva server.
//! Run with: KEVA_URL=http://localhost:15500 cargo test --test e2e_test -- --ignored

mod common;

use chrono::{Duration, Utc};
use keva_outcache::{OutputCache, OutputCacheExt};
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct CachedResponse {
    body: String,
    status: u16,
}

fn unique(prefix: &str) -> String {
    format!(
        "{}:{}",
        prefix,
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    )
}

#[tokio::test]
#[ignore = "requires running Keva server"]
async fn test_round_trip_typed() {
    let cache = common::setup_live_client().outcache();
    let key = unique("test:outcache:roundtrip");
    let response = CachedResponse {
        body: "<html>cached</html>".to_string(),
        status: 200,
    };

    cache
        .store(&key, &response, Utc::now() + Duration::minutes(5), None)
        .await
        .unwrap();

    let fetched: Option<CachedResponse> = cache.fetch_typed(&key).await.unwrap();
    assert_eq!(fetched, Some(response));
    assert!(cache.exists(&key).await.unwrap());

    cache.remove(&key).await.unwrap();
}

#[tokio::test]
#[ignore = "requires running Keva server"]
async fn test_never_written_key_is_absent() {
    let cache = common::setup_live_client().outcache();
    let key = unique("test:outcache:never-written");

    assert!(!cache.exists(&key).await.unwrap());
    assert_eq!(cache.fetch_raw(&key).await.unwrap(), None);
}

#[tokio::test]
#[ignore = "requires running Keva server"]
async fn test_entry_expires_after_window() {
    let cache = common::setup_live_client().outcache();
    let key = unique("test:outcache:expiry");

    cache
        .store(&key, &"short-lived", Utc::now() + Duration::seconds(2), None)
        .await
        .unwrap();
    assert!(cache.exists(&key).await.unwrap());

    tokio::time::sleep(std::time::Duration::from_secs(3)).await;

    assert!(!cache.exists(&key).await.unwrap());
    assert_eq!(cache.fetch_raw(&key).await.unwrap(), None);
}

#[tokio::test]
#[ignore = "requires running Keva server"]
async fn test_past_expiry_reads_back_absent() {
    let cache = common::setup_live_client().outcache();
    let key = unique("test:outcache:immediate");

    cache
        .store(&key, &"v1", Utc::now() + Duration::minutes(5), None)
        .await
        .unwrap();
    cache
        .store(&key, &"v2", Utc::now() - Duration::seconds(1), None)
        .await
        .unwrap();

    assert!(!cache.exists(&key).await.unwrap());
}

#[tokio::test]
#[ignore = "requires running Keva server"]
async fn test_remove_prefixed_spares_unrelated_keys() {
    let cache = common::setup_live_client().outcache();
    let run = unique("test:outcache:prefix");
    let key1 = format!("{}:key1", run);
    let key2 = format!("{}:key2", run);
    let other = format!("{}-other", run);
    let expires_at = Utc::now() + Duration::minutes(5);

    for key in [&key1, &key2, &other] {
        cache.store(key, &"v", expires_at, None).await.unwrap();
    }

    let deleted = cache.remove_prefixed(&format!("{}:", run)).await.unwrap();
    assert_eq!(deleted, 2);
    assert!(!cache.exists(&key1).await.unwrap());
    assert!(!cache.exists(&key2).await.unwrap());
    assert!(cache.exists(&other).await.unwrap());

    cache.remove(&other).await.unwrap();
}

#[tokio::test]
#[ignore = "requires running Keva server"]
async fn test_remove_nonexistent_key_is_silent() {
    let cache = common::setup_live_client().outcache();
    let kept = unique("test:outcache:kept");

    cache
        .store(&kept, &"v", Utc::now() + Duration::minutes(5), None)
        .await
        .unwrap();

    cache.remove(&unique("test:outcache:ghost")).await.unwrap();

    assert!(cache.exists(&kept).await.unwrap());
    cache.remove(&kept).await.unwrap();
}

#[tokio::test]
#[ignore = "requires running Keva server"]
async fn test_all_keys_contains_written_keys() {
    let cache = common::setup_live_client().outcache();
    let run = unique("test:outcache:allkeys");
    let written = [
        format!("{}:key1", run),
        format!("{}:key2", run),
        format!("{}:otherkey", run),
    ];
    let expires_at = Utc::now() + Duration::minutes(5);

    for key in &written {
        cache.store(key, &"v", expires_at, None).await.unwrap();
    }

    let keys = cache.all_keys().await.unwrap();
    for key in &written {
        assert!(keys.contains(key), "all_keys missing {}", key);
    }

    cache.remove_prefixed(&run).await.unwrap();
}
