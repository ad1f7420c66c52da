//! HTTP client for the MusicBrainz web service.
//!
//! Every request carries `fmt=json` and the configured User-Agent, and waits on
//! the shared [`RateGate`] before it is sent.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::models::{Artist, ArtistSearchPage, SimilarityResult};
use super::rate_gate::{Clock, RateGate};
use super::{MusicBrainzApi, MusicBrainzError};

pub const DEFAULT_BASE_URL: &str = "https://musicbrainz.org/ws/2";
pub const DEFAULT_USER_AGENT: &str = "MusicDiscoveryApp/1.0.0 (https://github.com)";
pub const DEFAULT_MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(1000);

const ARTIST_RELEASES_LIMIT: u32 = 25;
const TAG_SEARCH_LIMIT: u32 = 20;

#[derive(Debug, Clone)]
pub struct MusicBrainzConfig {
    pub base_url: String,
    pub user_agent: String,
    pub min_request_interval: Duration,
    /// `None` leaves reqwest's default (no timeout).
    pub timeout: Option<Duration>,
}

impl Default for MusicBrainzConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            min_request_interval: DEFAULT_MIN_REQUEST_INTERVAL,
            timeout: None,
        }
    }
}

pub struct MusicBrainzClient {
    client: Client,
    base_url: String,
    gate: Arc<RateGate>,
}

impl MusicBrainzClient {
    pub fn new(config: MusicBrainzConfig) -> Result<Self, MusicBrainzError> {
        let gate = Arc::new(RateGate::new(config.min_request_interval));
        Self::with_gate(config, gate)
    }

    /// Builds a client whose rate gate reads time from `clock`.
    pub fn with_clock(
        config: MusicBrainzConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, MusicBrainzError> {
        let gate = Arc::new(RateGate::with_clock(config.min_request_interval, clock));
        Self::with_gate(config, gate)
    }

    /// Builds a client that shares an existing gate.
    pub fn with_gate(
        config: MusicBrainzConfig,
        gate: Arc<RateGate>,
    ) -> Result<Self, MusicBrainzError> {
        if config.user_agent.trim().is_empty() {
            return Err(MusicBrainzError::Config(
                "user agent must not be empty".to_string(),
            ));
        }

        let base_url = config.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| {
            MusicBrainzError::Config(format!("invalid base URL {:?}: {}", config.base_url, e))
        })?;

        let mut builder = Client::builder().user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url,
            gate,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn rate_gate(&self) -> &Arc<RateGate> {
        &self.gate
    }

    /// Issues one gated GET and returns the decoded JSON body.
    async fn request(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Value, MusicBrainzError> {
        self.gate.wait_turn().await;

        let url = format!("{}/{}", self.base_url, path);
        debug!("MusicBrainz GET {} {:?}", url, params);

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("fmt", "json")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MusicBrainzError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl MusicBrainzApi for MusicBrainzClient {
    async fn search_artists(&self, query: &str) -> Result<Value, MusicBrainzError> {
        self.request("artist/", &[("query", query.to_string())]).await
    }

    async fn get_artist_details(&self, mbid: &str) -> Result<Value, MusicBrainzError> {
        self.request(
            &format!("artist/{}", mbid),
            &[("inc", "tags+aliases+ratings".to_string())],
        )
        .await
    }

    async fn get_artist_releases(&self, mbid: &str) -> Result<Value, MusicBrainzError> {
        self.request(
            "release/",
            &[
                ("artist", mbid.to_string()),
                ("limit", ARTIST_RELEASES_LIMIT.to_string()),
            ],
        )
        .await
    }

    async fn get_release_recordings(&self, release_id: &str) -> Result<Value, MusicBrainzError> {
        self.request(
            &format!("release/{}", release_id),
            &[("inc", "recordings".to_string())],
        )
        .await
    }

    async fn find_similar_artists(
        &self,
        mbid: &str,
        genre: &str,
    ) -> Result<SimilarityResult, MusicBrainzError> {
        let original: Artist = serde_json::from_value(self.get_artist_details(mbid).await?)?;

        let page: ArtistSearchPage = serde_json::from_value(
            self.request(
                "artist/",
                &[
                    ("query", format!("tag:{}", genre)),
                    ("limit", TAG_SEARCH_LIMIT.to_string()),
                ],
            )
            .await?,
        )?;

        Ok(SimilarityResult::from_candidates(original, page.artists, mbid))
    }
}
