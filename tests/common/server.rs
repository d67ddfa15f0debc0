//! Test server lifecycle management
//!
//! Each test gets an isolated server with its own catalog file and session store.

use super::constants::*;
use super::fixtures::{create_test_credentials, create_test_resources};
use compass4vets_server::catalog::load_catalog;
use compass4vets_server::config::SessionSecret;
use compass4vets_server::server::{make_app, RequestsLoggingLevel, ServerConfig};
use compass4vets_server::user::CredentialStore;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Test server instance
///
/// When dropped, the server gracefully shuts down and temp resources are cleaned up.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// The port the server is listening on
    pub port: u16,

    // Private fields - keep resources alive until drop
    _temp_resources_dir: TempDir,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a new test server on a random port
    ///
    /// # Panics
    ///
    /// Panics if the catalog cannot be loaded, the port cannot be bound or the
    /// server doesn't become ready within timeout.
    pub async fn spawn() -> Self {
        Self::spawn_with_ttl(ServerConfig::default().session_ttl_sec).await
    }

    pub async fn spawn_with_ttl(session_ttl_sec: u64) -> Self {
        let (temp_resources_dir, resources_path) = create_test_resources();
        let catalog = load_catalog(&resources_path).expect("Failed to load test catalog");
        let credentials: Arc<dyn CredentialStore> = Arc::new(create_test_credentials());
        let secret =
            SessionSecret::parse(TEST_SESSION_SECRET).expect("Invalid test session secret");

        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");

        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let base_url = format!("http://127.0.0.1:{}", port);

        // Create shutdown channel
        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let config = ServerConfig {
            port,
            requests_logging_level: RequestsLoggingLevel::None,
            session_ttl_sec,
            ..Default::default()
        };

        let app = make_app(config, Arc::new(catalog), credentials, &secret)
            .expect("Failed to build app");

        // Spawn server in background task with graceful shutdown
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            port,
            _temp_resources_dir: temp_resources_dir,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Waits for the server to become ready by polling the /v1/statics endpoint
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client
                .get(format!("{}/v1/statics", self.base_url))
                .send()
                .await
            {
                Ok(response) if response.status().is_success() => return,
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
