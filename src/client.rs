//! Keva client implementation

use crate::error::{CacheError, Result};
use crate::outcache::KevaOutputCache;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Keva client configuration
#[derive(Debug, Clone)]
pub struct KevaConfig {
    /// Endpoint URLs of the Keva store; the first entry is the primary
    pub endpoints: Vec<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Optional authentication token
    pub auth_token: Option<String>,
}

impl KevaConfig {
    /// Create a new configuration with the given primary endpoint
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoints: vec![endpoint.into()],
            timeout: Duration::from_secs(30),
            auth_token: None,
        }
    }

    /// Append a further endpoint of a distributed store
    ///
    /// Keyed commands always go to the primary; bulk enumeration addresses
    /// every configured endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoints.push(endpoint.into());
        self
    }

    /// Set the timeout for requests
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the authentication token
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }
}

/// Main Keva client
#[derive(Clone)]
pub struct KevaClient {
    #[allow(dead_code)]
    config: Arc<KevaConfig>,
    http_client: Client,
    endpoints: Vec<Url>,
}

impl KevaClient {
    /// Create a new Keva client
    ///
    /// Every endpoint URL is parsed up front; at least one is required.
    pub fn new(config: KevaConfig) -> Result<Self> {
        if config.endpoints.is_empty() {
            return Err(CacheError::InvalidArgument(
                "at least one endpoint is required".to_string(),
            ));
        }

        let endpoints = config
            .endpoints
            .iter()
            .map(|e| Url::parse(e))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut http_client_builder = Client::builder().timeout(config.timeout);

        if let Some(ref token) = config.auth_token {
            let mut headers = reqwest::header::HeaderMap::new();
            let value = format!("Bearer {}", token).parse().map_err(|_| {
                CacheError::InvalidArgument("auth token is not a valid header value".to_string())
            })?;
            headers.insert(reqwest::header::AUTHORIZATION, value);
            http_client_builder = http_client_builder.default_headers(headers);
        }

        let http_client = http_client_builder.build()?;

        Ok(Self {
            config: Arc::new(config),
            http_client,
            endpoints,
        })
    }

    /// Get the output-cache adapter interface
    pub fn outcache(&self) -> KevaOutputCache {
        KevaOutputCache::new(self.clone())
    }

    /// Send a command to the primary endpoint
    ///
    /// All commands use the command-envelope format:
    /// ```json
    /// {
    ///   "command": "kv.get",
    ///   "request_id": "uuid",
    ///   "payload": { ... }
    /// }
    /// ```
    pub(crate) async fn send_command(&self, command: &str, payload: Value) -> Result<Value> {
        self.send_command_to(&self.endpoints[0], command, payload)
            .await
    }

    /// Send a command to a specific endpoint
    pub(crate) async fn send_command_to(
        &self,
        endpoint: &Url,
        command: &str,
        payload: Value,
    ) -> Result<Value> {
        let request_id = uuid::Uuid::new_v4().to_string();

        let body = serde_json::json!({
            "command": command,
            "request_id": request_id,
            "payload": payload,
        });

        let url = endpoint.join("api/v1/command")?;

        let response = self.http_client.post(url).json(&body).send().await?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(CacheError::Server(error_text));
        }

        let result: Value = response.json().await?;

        // Check if command succeeded
        if !result["success"].as_bool().unwrap_or(false) {
            let error_msg = result["error"]
                .as_str()
                .unwrap_or("Unknown error")
                .to_string();
            return Err(CacheError::Server(error_msg));
        }

        // Return the payload
        Ok(result["payload"].clone())
    }

    /// Get the configured endpoints; the first entry is the primary
    pub fn endpoints(&self) -> &[Url] {
        &self.endpoints
    }

    /// Get the client configuration
    #[allow(dead_code)]
    pub(crate) fn config(&self) -> &KevaConfig {
        &self.config
    }
}
