//! Music Discovery Server Library
//!
//! This library exposes the internal modules for testing and for the CLI front end.

pub mod config;
pub mod discovery;
pub mod listing;
pub mod musicbrainz;
pub mod server;

// Re-export commonly used types for convenience
pub use musicbrainz::{MusicBrainzApi, MusicBrainzClient, MusicBrainzConfig, MusicBrainzError};
pub use server::{run_server, RequestsLoggingLevel};
