//! Output-cache adapter over the Keva KV protocol
//!
//! A thin mapping from the [`OutputCache`] interface onto five store
//! primitives: `kv.set` with a TTL, `kv.get`, `kv.exists`, `kv.del`, and
//! `kv.keys` with prefix matching. Expiry enforcement, eviction, and
//! clustering all belong to the store; the adapter only serializes payloads,
//! converts absolute expirations to relative TTLs, and fans enumeration out
//! across every configured endpoint.

use crate::cache::OutputCache;
use crate::client::KevaClient;
use crate::error::{CacheError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Value, json};

/// Output-cache adapter backed by a Keva store
///
/// Values travel as serialized JSON text: the store never interprets the
/// payload, and a payload written by another producer in a non-JSON format
/// surfaces as a deserialization error on read rather than corrupt data.
#[derive(Clone)]
pub struct KevaOutputCache {
    client: KevaClient,
}

impl KevaOutputCache {
    /// Create a new output-cache adapter
    pub(crate) fn new(client: KevaClient) -> Self {
        Self { client }
    }

    fn require_non_empty(value: &str, what: &str) -> Result<()> {
        if value.is_empty() {
            return Err(CacheError::InvalidArgument(format!(
                "{} must not be empty",
                what
            )));
        }
        Ok(())
    }

    /// Enumerate keys starting with `prefix` on a single endpoint
    async fn keys_on_endpoint(
        &self,
        endpoint: &url::Url,
        prefix: Option<&str>,
    ) -> Result<Vec<String>> {
        let payload = match prefix {
            Some(prefix) => json!({"prefix": prefix}),
            None => json!({}),
        };
        let response = self
            .client
            .send_command_to(endpoint, "kv.keys", payload)
            .await?;

        let keys = response
            .get("keys")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                CacheError::InvalidResponse("kv.keys payload missing keys array".to_string())
            })?;

        Ok(keys
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect())
    }

    /// Delete a key, observing the store's deleted flag
    async fn delete_key(&self, key: &str) -> Result<bool> {
        let response = self
            .client
            .send_command("kv.del", json!({"key": key}))
            .await?;
        Ok(response
            .get("deleted")
            .and_then(Value::as_bool)
            .unwrap_or(false))
    }
}

/// Remaining whole seconds until `expires_at`, rounded up
///
/// `None` means the window has already closed. Rounding is upward so a
/// positive sub-second window becomes a 1-second TTL instead of an accidental
/// no-expiry zero.
fn ttl_seconds(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> Option<u64> {
    let remaining_ms = expires_at.signed_duration_since(now).num_milliseconds();
    if remaining_ms <= 0 {
        None
    } else {
        Some((remaining_ms as u64).div_ceil(1000))
    }
}

#[async_trait]
impl OutputCache for KevaOutputCache {
    /// Store a value as serialized text with a TTL of `expires_at - now`
    ///
    /// A non-positive TTL is never handed to the store (upstream behavior for
    /// that is unspecified): a past-or-present `expires_at` deletes the key
    /// instead, so immediate expiry reads back as absent. `depends_on_key`
    /// has no effect in this adapter; Keva has no linked-invalidation
    /// primitive.
    async fn store_raw(
        &self,
        key: &str,
        value: Value,
        expires_at: DateTime<Utc>,
        depends_on_key: Option<&str>,
    ) -> Result<()> {
        Self::require_non_empty(key, "key")?;

        if let Some(dependency) = depends_on_key {
            tracing::debug!(key, dependency, "dependency keys are not supported; ignoring");
        }

        let Some(ttl) = ttl_seconds(expires_at, Utc::now()) else {
            tracing::debug!(key, %expires_at, "expiration already reached; deleting instead");
            self.delete_key(key).await?;
            return Ok(());
        };

        let payload = json!({
            "key": key,
            "value": value.to_string(),
            "ttl": ttl,
        });

        self.client.send_command("kv.set", payload).await?;
        Ok(())
    }

    /// Fetch and parse the serialized text stored under `key`
    ///
    /// `Ok(None)` when the store reports the key absent or expired; text that
    /// does not parse as JSON is a [`CacheError::Json`], and a payload that
    /// is not text at all violates the value convention and is a
    /// [`CacheError::InvalidResponse`].
    async fn fetch_raw(&self, key: &str) -> Result<Option<Value>> {
        Self::require_non_empty(key, "key")?;

        let payload = json!({"key": key});
        let response = self.client.send_command("kv.get", payload).await?;

        // Null payload means not found
        if response.is_null() {
            return Ok(None);
        }

        let text = response.as_str().ok_or_else(|| {
            CacheError::InvalidResponse("kv.get payload is not serialized text".to_string())
        })?;

        let value: Value = serde_json::from_str(text)?;
        Ok(Some(value))
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        Self::require_non_empty(key, "key")?;

        let payload = json!({"key": key});
        let response = self.client.send_command("kv.exists", payload).await?;

        Ok(response
            .get("exists")
            .and_then(Value::as_bool)
            .unwrap_or(false))
    }

    /// Remove the entry under `key`; removing a non-existent key is silent
    async fn remove(&self, key: &str) -> Result<()> {
        Self::require_non_empty(key, "key")?;

        let deleted = self.delete_key(key).await?;
        tracing::debug!(key, deleted, "removed cache entry");
        Ok(())
    }

    /// Remove every entry whose key starts with `prefix`
    ///
    /// Enumerates matching keys on every configured endpoint, then deletes
    /// each through the primary connection. An enumeration failure
    /// propagates; a failure deleting one matched key is logged and does not
    /// abort deletion of the others. Returns the confirmed deletion count.
    async fn remove_prefixed(&self, prefix: &str) -> Result<u64> {
        Self::require_non_empty(prefix, "prefix")?;

        let mut deleted = 0u64;
        for endpoint in self.client.endpoints().to_vec() {
            for key in self.keys_on_endpoint(&endpoint, Some(prefix)).await? {
                match self.delete_key(&key).await {
                    Ok(true) => deleted += 1,
                    Ok(false) => {}
                    Err(error) => {
                        tracing::warn!(key = %key, %error, "failed to delete matched key; continuing");
                    }
                }
            }
        }

        tracing::debug!(prefix, deleted, "removed prefixed cache entries");
        Ok(deleted)
    }

    /// Enumerate every key across every configured endpoint
    async fn all_keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        for endpoint in self.client.endpoints().to_vec() {
            keys.extend(self.keys_on_endpoint(&endpoint, None).await?);
        }
        Ok(keys)
    }
}
