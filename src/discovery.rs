//! The discovery flow behind `cli-discover`: find an artist, list related
//! artists in a genre, then drill into albums and tracks.

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::listing::{album_summaries, numbered_tracks, AlbumSummary, ArtistSummary, TrackLine};
use crate::musicbrainz::models::{Artist, ArtistSearchPage, MAX_SIMILAR_ARTISTS};
use crate::musicbrainz::{MusicBrainzApi, MusicBrainzError, ReleaseList, ReleaseWithMedia};

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Please enter an artist name")]
    MissingArtistName,

    #[error("Please select a genre")]
    MissingGenre,

    #[error("No artists found matching \"{0}\". Please try a different name.")]
    NoArtistFound(String),

    #[error(transparent)]
    Upstream(#[from] MusicBrainzError),
}

#[derive(Debug, Clone)]
pub struct Discovery {
    /// The artist name as typed, trimmed.
    pub query: String,
    pub artist: ArtistSummary,
    pub genre: String,
    pub similar: Vec<ArtistSummary>,
    /// Set when `similar` came from a plain genre search instead.
    pub from_genre_search: bool,
}

impl Discovery {
    /// Message shown when neither lookup produced anything.
    pub fn empty_notice(&self) -> String {
        format!(
            "No similar artists found for \"{}\" in the \"{}\" genre. \
             Please try a different artist or genre.",
            self.query, self.genre
        )
    }
}

fn artists_of(page: Value) -> Result<Vec<Artist>, MusicBrainzError> {
    Ok(serde_json::from_value::<ArtistSearchPage>(page)?.artists)
}

/// Searches `artist_name`, takes the best match and looks up artists similar
/// to it in `genre`. Falls back to the top artists tagged with `genre` when the
/// similarity lookup comes back empty.
pub async fn discover(
    api: &dyn MusicBrainzApi,
    artist_name: &str,
    genre: &str,
) -> Result<Discovery, DiscoveryError> {
    let artist_name = artist_name.trim();
    if artist_name.is_empty() {
        return Err(DiscoveryError::MissingArtistName);
    }
    let genre = genre.trim();
    if genre.is_empty() {
        return Err(DiscoveryError::MissingGenre);
    }

    let base = artists_of(api.search_artists(artist_name).await?)?
        .into_iter()
        .next()
        .ok_or_else(|| DiscoveryError::NoArtistFound(artist_name.to_string()))?;
    info!("Best match for {:?} is {}", artist_name, base.id);

    let mut similar = api.find_similar_artists(&base.id, genre).await?.artists;
    let from_genre_search = similar.is_empty();
    if from_genre_search {
        debug!("No similar artists for {}, searching tag {:?}", base.id, genre);
        similar = artists_of(api.search_artists(&format!("tag:{}", genre)).await?)?;
        similar.truncate(MAX_SIMILAR_ARTISTS);
    }

    Ok(Discovery {
        query: artist_name.to_string(),
        artist: ArtistSummary::from(&base),
        genre: genre.to_string(),
        similar: similar.iter().map(ArtistSummary::from).collect(),
        from_genre_search,
    })
}

/// Unique albums of an artist, in the order MusicBrainz returned them.
pub async fn artist_albums(
    api: &dyn MusicBrainzApi,
    mbid: &str,
) -> Result<Vec<AlbumSummary>, MusicBrainzError> {
    let releases = ReleaseList::from_envelope(api.get_artist_releases(mbid).await?)?;
    Ok(album_summaries(releases.releases))
}

pub async fn album_tracks(
    api: &dyn MusicBrainzApi,
    release_id: &str,
) -> Result<Vec<TrackLine>, MusicBrainzError> {
    let release = ReleaseWithMedia::from_value(api.get_release_recordings(release_id).await?)?;
    Ok(numbered_tracks(&release))
}
