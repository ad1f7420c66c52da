//! Common test infrastructure
//!
//! End-to-end tests run the real server against a fake MusicBrainz upstream,
//! both bound to random local ports. Tests should only import from this
//! module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{FakeMusicBrainz, TestClient, TestServer, BEATLES_ID};
//! use reqwest::StatusCode;
//!
//! #[tokio::test]
//! async fn test_get_artist() {
//!     let upstream = FakeMusicBrainz::spawn().await;
//!     let server = TestServer::spawn(&upstream.base_url).await;
//!     let client = TestClient::new(server.base_url.clone());
//!
//!     let response = client.get_artist(BEATLES_ID).await;
//!     assert_eq!(response.status(), StatusCode::OK);
//! }
//! ```

mod client;
mod server;
mod upstream;

// Public API - this is what tests import
pub use client::TestClient;
pub use constants::*;
pub use server::TestServer;
pub use upstream::{FakeMusicBrainz, RecordedRequest};
