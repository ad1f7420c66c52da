//! Artist discovery routes, mounted under `/api`.
//!
//! Each lookup is reachable both with its id as a path segment and as a query
//! parameter. When both are given the query parameter wins.

use axum::{extract::State, routing::get, Json, Router};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::musicbrainz::SimilarityResult;

use super::api_error::ApiError;
use super::extract::{ApiPath, ApiQuery};
use super::state::{GuardedMusicBrainz, ServerState};

const ARTIST_NAME_REQUIRED: &str = "Artist name is required";
const ARTIST_MBID_REQUIRED: &str = "Artist MBID is required";
const GENRE_REQUIRED: &str = "Genre is required";
const RELEASE_ID_REQUIRED: &str = "Release ID is required";

const SEARCH_FAILED: &str = "Failed to search for artist";
const ARTIST_FAILED: &str = "Failed to fetch artist details";
const RELEASES_FAILED: &str = "Failed to fetch artist releases";
const SIMILAR_FAILED: &str = "Failed to find similar artists";
const RECORDINGS_FAILED: &str = "Failed to fetch release recordings";

// =============================================================================
// Query Types
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ArtistQuery {
    pub mbid: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SimilarQuery {
    pub mbid: Option<String>,
    pub genre: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReleaseQuery {
    #[serde(rename = "releaseId")]
    pub release_id: Option<String>,
}

/// Picks the query value if it is non-blank, else the path segment if that is.
fn resolve_param(query: Option<String>, path: Option<String>) -> Option<String> {
    query
        .filter(|v| !v.trim().is_empty())
        .or_else(|| path.filter(|v| !v.trim().is_empty()))
}

fn require(
    query: Option<String>,
    path: Option<String>,
    message: &'static str,
) -> Result<String, ApiError> {
    resolve_param(query, path).ok_or(ApiError::Validation(message))
}

// =============================================================================
// Shared Lookups
// =============================================================================

async fn artist_details(mb: &GuardedMusicBrainz, mbid: String) -> Result<Json<Value>, ApiError> {
    debug!("Fetching artist {}", mbid);
    let artist = mb
        .get_artist_details(&mbid)
        .await
        .map_err(ApiError::upstream(ARTIST_FAILED))?;
    Ok(Json(artist))
}

async fn artist_releases(mb: &GuardedMusicBrainz, mbid: String) -> Result<Json<Value>, ApiError> {
    debug!("Fetching releases of artist {}", mbid);
    let releases = mb
        .get_artist_releases(&mbid)
        .await
        .map_err(ApiError::upstream(RELEASES_FAILED))?;
    Ok(Json(releases))
}

async fn similar_artists(
    mb: &GuardedMusicBrainz,
    mbid: String,
    genre: String,
) -> Result<Json<SimilarityResult>, ApiError> {
    debug!("Finding artists similar to {} in genre {}", mbid, genre);
    let similar = mb
        .find_similar_artists(&mbid, &genre)
        .await
        .map_err(ApiError::upstream(SIMILAR_FAILED))?;
    Ok(Json(similar))
}

async fn release_recordings(
    mb: &GuardedMusicBrainz,
    release_id: String,
) -> Result<Json<Value>, ApiError> {
    debug!("Fetching recordings of release {}", release_id);
    let release = mb
        .get_release_recordings(&release_id)
        .await
        .map_err(ApiError::upstream(RECORDINGS_FAILED))?;
    Ok(Json(release))
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /search-artist?name=
async fn search_artist(
    State(mb): State<GuardedMusicBrainz>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> Result<Json<Value>, ApiError> {
    let name = require(query.name, None, ARTIST_NAME_REQUIRED)?;
    debug!("Searching artists named {:?}", name);
    let artists = mb
        .search_artists(&name)
        .await
        .map_err(ApiError::upstream(SEARCH_FAILED))?;
    Ok(Json(artists))
}

/// GET /artist/{mbid}
async fn get_artist(
    State(mb): State<GuardedMusicBrainz>,
    ApiPath(mbid): ApiPath<String>,
    ApiQuery(query): ApiQuery<ArtistQuery>,
) -> Result<Json<Value>, ApiError> {
    let mbid = require(query.mbid, Some(mbid), ARTIST_MBID_REQUIRED)?;
    artist_details(&mb, mbid).await
}

/// GET /artist?mbid=
async fn get_artist_by_query(
    State(mb): State<GuardedMusicBrainz>,
    ApiQuery(query): ApiQuery<ArtistQuery>,
) -> Result<Json<Value>, ApiError> {
    let mbid = require(query.mbid, None, ARTIST_MBID_REQUIRED)?;
    artist_details(&mb, mbid).await
}

/// GET /artist/{mbid}/releases
async fn get_artist_releases(
    State(mb): State<GuardedMusicBrainz>,
    ApiPath(mbid): ApiPath<String>,
    ApiQuery(query): ApiQuery<ArtistQuery>,
) -> Result<Json<Value>, ApiError> {
    let mbid = require(query.mbid, Some(mbid), ARTIST_MBID_REQUIRED)?;
    artist_releases(&mb, mbid).await
}

/// GET /artist-releases?mbid=
async fn get_artist_releases_by_query(
    State(mb): State<GuardedMusicBrainz>,
    ApiQuery(query): ApiQuery<ArtistQuery>,
) -> Result<Json<Value>, ApiError> {
    let mbid = require(query.mbid, None, ARTIST_MBID_REQUIRED)?;
    artist_releases(&mb, mbid).await
}

/// GET /artist/{mbid}/similar?genre=
async fn get_similar_artists(
    State(mb): State<GuardedMusicBrainz>,
    ApiPath(mbid): ApiPath<String>,
    ApiQuery(query): ApiQuery<SimilarQuery>,
) -> Result<Json<SimilarityResult>, ApiError> {
    let mbid = require(query.mbid, Some(mbid), ARTIST_MBID_REQUIRED)?;
    let genre = require(query.genre, None, GENRE_REQUIRED)?;
    similar_artists(&mb, mbid, genre).await
}

/// GET /artist-similar?mbid=&genre=
async fn get_similar_artists_by_query(
    State(mb): State<GuardedMusicBrainz>,
    ApiQuery(query): ApiQuery<SimilarQuery>,
) -> Result<Json<SimilarityResult>, ApiError> {
    let mbid = require(query.mbid, None, ARTIST_MBID_REQUIRED)?;
    let genre = require(query.genre, None, GENRE_REQUIRED)?;
    similar_artists(&mb, mbid, genre).await
}

/// GET /release/{releaseId}/recordings
async fn get_release_recordings(
    State(mb): State<GuardedMusicBrainz>,
    ApiPath(release_id): ApiPath<String>,
    ApiQuery(query): ApiQuery<ReleaseQuery>,
) -> Result<Json<Value>, ApiError> {
    let release_id = require(query.release_id, Some(release_id), RELEASE_ID_REQUIRED)?;
    release_recordings(&mb, release_id).await
}

/// GET /release-recordings?releaseId=
async fn get_release_recordings_by_query(
    State(mb): State<GuardedMusicBrainz>,
    ApiQuery(query): ApiQuery<ReleaseQuery>,
) -> Result<Json<Value>, ApiError> {
    let release_id = require(query.release_id, None, RELEASE_ID_REQUIRED)?;
    release_recordings(&mb, release_id).await
}

pub fn artist_routes() -> Router<ServerState> {
    Router::new()
        .route("/search-artist", get(search_artist))
        .route("/artist", get(get_artist_by_query))
        .route("/artist/{mbid}", get(get_artist))
        .route("/artist-releases", get(get_artist_releases_by_query))
        .route("/artist/{mbid}/releases", get(get_artist_releases))
        .route("/artist-similar", get(get_similar_artists_by_query))
        .route("/artist/{mbid}/similar", get(get_similar_artists))
        .route("/release-recordings", get(get_release_recordings_by_query))
        .route("/release/{release_id}/recordings", get(get_release_recordings))
}
