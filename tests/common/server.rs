//! Test server lifecycle management
//!
//! Each test gets an isolated server with its own MusicBrainz client and rate
//! gate, pointed at whatever upstream the test chose.

use super::constants::*;
use music_discovery::server::{make_app, ServerConfig};
use music_discovery::{MusicBrainzClient, MusicBrainzConfig, RequestsLoggingLevel};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// Test server instance
///
/// When dropped, the server gracefully shuts down.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// The port the server is listening on
    pub port: u16,

    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a server talking to `upstream_base_url` with a short rate gate interval.
    pub async fn spawn(upstream_base_url: &str) -> Self {
        Self::spawn_with_interval(
            upstream_base_url,
            Duration::from_millis(DEFAULT_TEST_INTERVAL_MS),
        )
        .await
    }

    /// Spawns a server on a random port whose upstream calls are spaced by
    /// `min_request_interval`, and waits until it answers.
    ///
    /// # Panics
    ///
    /// Panics if the client cannot be built, port binding fails or the server
    /// doesn't become ready within timeout.
    pub async fn spawn_with_interval(
        upstream_base_url: &str,
        min_request_interval: Duration,
    ) -> Self {
        let client = MusicBrainzClient::new(MusicBrainzConfig {
            base_url: upstream_base_url.to_string(),
            user_agent: TEST_USER_AGENT.to_string(),
            min_request_interval,
            timeout: Some(Duration::from_secs(REQUEST_TIMEOUT_SECS)),
        })
        .expect("Failed to build MusicBrainz client");

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
            requests_logging_level: RequestsLoggingLevel::None,
            host: "127.0.0.1".to_string(),
            port,
        };
        let app = make_app(config, Arc::new(client));

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
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Waits for the server to become ready by polling the status route
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

            match client.get(format!("{}/", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => return,
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}
