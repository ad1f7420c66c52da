use thiserror::Error;

/// Errors produced while talking to the MusicBrainz API.
///
/// Every variant renders with the `MusicBrainz API error:` prefix, which is what
/// ends up in the `message` field of a failed API response.
#[derive(Debug, Error)]
pub enum MusicBrainzError {
    #[error("MusicBrainz API error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("MusicBrainz API error: request failed with status code {status}")]
    Status { status: u16, body: String },

    #[error("MusicBrainz API error: unexpected response shape: {0}")]
    Parse(String),

    #[error("MusicBrainz API error: invalid configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for MusicBrainzError {
    fn from(err: serde_json::Error) -> Self {
        MusicBrainzError::Parse(err.to_string())
    }
}
