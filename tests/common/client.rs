//! HTTP client for end-to-end tests
//!
//! Wraps reqwest and provides one method per API route. When API routes or
//! parameter names change, update only this file.

use super::constants::*;
use reqwest::Response;
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    /// GET an arbitrary path, e.g. `/api/artist?mbid=`.
    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("Request failed")
    }

    async fn get_with_query(&self, path: &str, query: &[(&str, &str)]) -> Response {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .query(query)
            .send()
            .await
            .expect("Request failed")
    }

    // ========================================================================
    // Path Routes
    // ========================================================================

    /// GET /api/search-artist?name=
    pub async fn search_artist(&self, name: &str) -> Response {
        self.get_with_query("/api/search-artist", &[("name", name)])
            .await
    }

    /// GET /api/artist/{mbid}
    pub async fn get_artist(&self, mbid: &str) -> Response {
        self.get(&format!("/api/artist/{}", mbid)).await
    }

    /// GET /api/artist/{mbid}/releases
    pub async fn get_artist_releases(&self, mbid: &str) -> Response {
        self.get(&format!("/api/artist/{}/releases", mbid)).await
    }

    /// GET /api/artist/{mbid}/similar?genre=
    pub async fn get_similar_artists(&self, mbid: &str, genre: &str) -> Response {
        self.get_with_query(&format!("/api/artist/{}/similar", mbid), &[("genre", genre)])
            .await
    }

    /// GET /api/release/{releaseId}/recordings
    pub async fn get_release_recordings(&self, release_id: &str) -> Response {
        self.get(&format!("/api/release/{}/recordings", release_id))
            .await
    }

    // ========================================================================
    // Query Routes
    // ========================================================================

    /// GET /api/artist?mbid=
    pub async fn get_artist_by_query(&self, mbid: &str) -> Response {
        self.get_with_query("/api/artist", &[("mbid", mbid)]).await
    }

    /// GET /api/artist-releases?mbid=
    pub async fn get_artist_releases_by_query(&self, mbid: &str) -> Response {
        self.get_with_query("/api/artist-releases", &[("mbid", mbid)])
            .await
    }

    /// GET /api/artist-similar?mbid=&genre=
    pub async fn get_similar_artists_by_query(&self, mbid: &str, genre: &str) -> Response {
        self.get_with_query("/api/artist-similar", &[("mbid", mbid), ("genre", genre)])
            .await
    }

    /// GET /api/release-recordings?releaseId=
    pub async fn get_release_recordings_by_query(&self, release_id: &str) -> Response {
        self.get_with_query("/api/release-recordings", &[("releaseId", release_id)])
            .await
    }
}
