//! Typed views over MusicBrainz responses.
//!
//! Only `id` is a named field. Everything else the upstream sends, including
//! explicit `null`s, stays in `extra` so a value serializes back out unchanged;
//! the fields this crate makes decisions on are read through accessors.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::MusicBrainzError;

/// Maximum number of artists returned by a similarity lookup.
pub const MAX_SIMILAR_ARTISTS: usize = 10;

fn text<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    fields.get(key).and_then(Value::as_str)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Artist {
    pub fn name(&self) -> Option<&str> {
        text(&self.extra, "name")
    }

    pub fn country(&self) -> Option<&str> {
        text(&self.extra, "country")
    }

    /// `Person`, `Group`, `Orchestra`, ...
    pub fn artist_type(&self) -> Option<&str> {
        text(&self.extra, "type")
    }

    /// `life-span.begin`, a partial date.
    pub fn begin_date(&self) -> Option<&str> {
        self.extra
            .get("life-span")
            .and_then(|span| span.get("begin"))
            .and_then(Value::as_str)
    }
}

/// Envelope of `GET /artist/?query=...`. A page without an `artists` array is
/// an unexpected shape, not an empty result.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtistSearchPage {
    pub artists: Vec<Artist>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Release {
    pub id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Release {
    pub fn title(&self) -> Option<&str> {
        text(&self.extra, "title")
    }

    pub fn date(&self) -> Option<&str> {
        text(&self.extra, "date")
    }

    pub fn status(&self) -> Option<&str> {
        text(&self.extra, "status")
    }
}

/// Canonical list of releases, whatever envelope the upstream wrapped it in.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseList {
    pub releases: Vec<Release>,
}

impl ReleaseList {
    /// Accepts a bare array, `{ "releases": [...] }` or `{ "release-list": [...] }`.
    pub fn from_envelope(value: Value) -> Result<Self, MusicBrainzError> {
        let items = match value {
            Value::Array(items) => items,
            Value::Object(mut object) => match object
                .remove("releases")
                .or_else(|| object.remove("release-list"))
            {
                Some(Value::Array(items)) => items,
                Some(other) => {
                    return Err(MusicBrainzError::Parse(format!(
                        "release list is not an array: {}",
                        json_kind(&other)
                    )))
                }
                None => {
                    return Err(MusicBrainzError::Parse(
                        "no `releases` or `release-list` array in response".to_string(),
                    ))
                }
            },
            other => {
                return Err(MusicBrainzError::Parse(format!(
                    "expected a release list, got {}",
                    json_kind(&other)
                )))
            }
        };

        let releases = items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<Release>, _>>()?;
        Ok(Self { releases })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Recording {
    pub fn title(&self) -> Option<&str> {
        text(&self.extra, "title")
    }

    /// Duration in milliseconds.
    pub fn length(&self) -> Option<u64> {
        self.extra.get("length").and_then(Value::as_u64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub recording: Recording,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medium {
    #[serde(default)]
    pub tracks: Vec<Track>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A release fetched with `inc=recordings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseWithMedia {
    pub id: String,
    #[serde(default)]
    pub media: Vec<Medium>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ReleaseWithMedia {
    pub fn title(&self) -> Option<&str> {
        text(&self.extra, "title")
    }

    pub fn from_value(value: Value) -> Result<Self, MusicBrainzError> {
        Ok(serde_json::from_value(value)?)
    }
}

/// Result of a similar-artists lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityResult {
    pub artists: Vec<Artist>,
    pub original_artist: Artist,
}

impl SimilarityResult {
    /// Drops the original artist from `candidates` and keeps at most
    /// [`MAX_SIMILAR_ARTISTS`], preserving upstream order.
    pub fn from_candidates(original_artist: Artist, candidates: Vec<Artist>, mbid: &str) -> Self {
        let artists = candidates
            .into_iter()
            .filter(|artist| artist.id != mbid)
            .take(MAX_SIMILAR_ARTISTS)
            .collect();
        Self {
            artists,
            original_artist,
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
