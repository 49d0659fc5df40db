//! Common test utilities

use keva_outcache::{KevaClient, KevaConfig};
use mockito::{Server, ServerGuard};

/// Create a mock Keva server for testing
#[allow(dead_code)] // Used by other test modules
pub async fn create_mock_server() -> ServerGuard {
    Server::new_async().await
}

/// Setup a test client pointing to a mock server
#[allow(dead_code)] // Used by other test modules
pub async fn setup_test_client() -> (KevaClient, ServerGuard) {
    let server = create_mock_server().await;
    let config = KevaConfig::new(server.url()).with_timeout(std::time::Duration::from_secs(5));
    let client = KevaClient::new(config).unwrap();
    (client, server)
}

/// Setup a test client spanning two mock endpoints (first is primary)
#[allow(dead_code)] // Used by other test modules
pub async fn setup_two_endpoint_client() -> (KevaClient, ServerGuard, ServerGuard) {
    let primary = create_mock_server().await;
    let replica = create_mock_server().await;
    let config = KevaConfig::new(primary.url())
        .with_endpoint(replica.url())
        .with_timeout(std::time::Duration::from_secs(5));
    let client = KevaClient::new(config).unwrap();
    (client, primary, replica)
}

/// Setup a client for live tests (requires running server)
#[allow(dead_code)] // Used by live test modules
pub fn setup_live_client() -> KevaClient {
    let url = std::env::var("KEVA_URL").unwrap_or_else(|_| "http://localhost:15500".to_string());
    let config = KevaConfig::new(url).with_timeout(std::time::Duration::from_secs(10));
    KevaClient::new(config).expect("Failed to create live client")
}
