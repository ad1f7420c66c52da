use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

use crate::musicbrainz::MusicBrainzError;

const INVALID_REQUEST: &str = "Invalid request";

/// Failure of an API route. Serialized as `{ "error": ..., "message"?: ... }`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required parameter was missing or blank.
    #[error("{0}")]
    Validation(&'static str),

    /// The query string or a path segment could not be decoded.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    /// The MusicBrainz call behind the route failed.
    #[error("{context}: {source}")]
    Upstream {
        context: &'static str,
        source: MusicBrainzError,
    },
}

impl ApiError {
    pub fn upstream(context: &'static str) -> impl FnOnce(MusicBrainzError) -> ApiError {
        move |source| ApiError::Upstream { context, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Rejected { status, .. } => *status,
            ApiError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(message) => json!({ "error": message }),
            ApiError::Rejected { message, .. } => {
                debug!("Rejected request: {}", message);
                json!({ "error": INVALID_REQUEST, "message": message })
            }
            ApiError::Upstream { context, source } => {
                error!("{}: {}", context, source);
                json!({ "error": context, "message": source.to_string() })
            }
        };
        (status, Json(body)).into_response()
    }
}
