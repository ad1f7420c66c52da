//! Display helpers shared by front ends: artist cards, album lists and track
//! listings built from MusicBrainz responses.

use std::collections::HashSet;

use crate::musicbrainz::models::{Artist, Release, ReleaseWithMedia};

/// Maximum number of albums shown for an artist after de-duplication.
pub const MAX_LISTED_ALBUMS: usize = 20;

const UNKNOWN_ARTIST: &str = "Unknown Artist";
const UNKNOWN_ALBUM: &str = "Unknown Album";
const UNKNOWN_TRACK: &str = "Unknown Track";

/// Formats a millisecond duration as `m:ss`. Missing durations render empty.
pub fn format_duration(milliseconds: Option<u64>) -> String {
    match milliseconds {
        None => String::new(),
        Some(ms) => {
            let total_seconds = ms / 1000;
            format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
        }
    }
}

/// Year part of a MusicBrainz partial date (`1969`, `1969-09`, `1969-09-26`).
pub fn year_of(date: &str) -> Option<&str> {
    date.split('-').next().filter(|year| !year.is_empty())
}

fn normalized_title(release: &Release) -> String {
    release
        .title()
        .unwrap_or(UNKNOWN_ALBUM)
        .trim()
        .to_lowercase()
}

/// Keeps the first release for each title, compared case and whitespace
/// insensitively, in original order.
pub fn dedupe_releases_by_title(releases: Vec<Release>) -> Vec<Release> {
    let mut seen = HashSet::new();
    releases
        .into_iter()
        .filter(|release| seen.insert(normalized_title(release)))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArtistSummary {
    pub id: String,
    pub name: String,
    pub artist_type: Option<String>,
    pub country: Option<String>,
    pub begin_year: Option<String>,
}

impl From<&Artist> for ArtistSummary {
    fn from(artist: &Artist) -> Self {
        let begin_year = artist.begin_date().and_then(year_of).map(str::to_string);

        ArtistSummary {
            id: artist.id.clone(),
            name: non_blank(artist.name()).unwrap_or(UNKNOWN_ARTIST).to_string(),
            artist_type: non_blank(artist.artist_type()).map(str::to_string),
            country: non_blank(artist.country()).map(str::to_string),
            begin_year,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlbumSummary {
    pub id: String,
    pub title: String,
    pub year: Option<String>,
    pub status: Option<String>,
}

impl From<&Release> for AlbumSummary {
    fn from(release: &Release) -> Self {
        AlbumSummary {
            id: release.id.clone(),
            title: non_blank(release.title())
                .unwrap_or(UNKNOWN_ALBUM)
                .to_string(),
            year: release.date().and_then(year_of).map(str::to_string),
            status: non_blank(release.status()).map(str::to_string),
        }
    }
}

/// Unique albums, capped at [`MAX_LISTED_ALBUMS`].
pub fn album_summaries(releases: Vec<Release>) -> Vec<AlbumSummary> {
    dedupe_releases_by_title(releases)
        .iter()
        .take(MAX_LISTED_ALBUMS)
        .map(AlbumSummary::from)
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackLine {
    pub number: usize,
    pub title: String,
    pub duration: String,
}

/// Flattens every medium into one listing numbered from 1. Zero-length
/// recordings show no duration.
pub fn numbered_tracks(release: &ReleaseWithMedia) -> Vec<TrackLine> {
    release
        .media
        .iter()
        .flat_map(|medium| medium.tracks.iter())
        .enumerate()
        .map(|(index, track)| TrackLine {
            number: index + 1,
            title: non_blank(track.recording.title())
                .unwrap_or(UNKNOWN_TRACK)
                .to_string(),
            duration: format_duration(track.recording.length().filter(|ms| *ms > 0)),
        })
        .collect()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
