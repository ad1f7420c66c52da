//! MusicBrainz web service client.
//!
//! The server only ever talks to MusicBrainz through [`MusicBrainzApi`], which
//! lets handlers be exercised against an in-memory implementation.

pub mod client;
mod error;
pub mod models;
pub mod rate_gate;

pub use client::{MusicBrainzClient, MusicBrainzConfig};
pub use error::MusicBrainzError;
pub use models::{Artist, ReleaseList, ReleaseWithMedia, SimilarityResult};
pub use rate_gate::{Clock, RateGate, TokioClock};

use async_trait::async_trait;
use serde_json::Value;

/// The read operations exposed over HTTP.
#[async_trait]
pub trait MusicBrainzApi: Send + Sync {
    /// Free-text artist search.
    async fn search_artists(&self, query: &str) -> Result<Value, MusicBrainzError>;

    /// Single artist, including tags, aliases and ratings.
    async fn get_artist_details(&self, mbid: &str) -> Result<Value, MusicBrainzError>;

    /// Up to 25 releases credited to the artist.
    async fn get_artist_releases(&self, mbid: &str) -> Result<Value, MusicBrainzError>;

    /// Single release with its media and recordings embedded.
    async fn get_release_recordings(&self, release_id: &str) -> Result<Value, MusicBrainzError>;

    /// Artists tagged with `genre`, excluding `mbid` itself.
    async fn find_similar_artists(
        &self,
        mbid: &str,
        genre: &str,
    ) -> Result<SimilarityResult, MusicBrainzError>;
}
