use axum::extract::FromRef;
use std::sync::Arc;
use std::time::Instant;

use crate::musicbrainz::MusicBrainzApi;

use super::ServerConfig;

pub type GuardedMusicBrainz = Arc<dyn MusicBrainzApi>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub musicbrainz: GuardedMusicBrainz,
}

impl ServerState {
    pub fn new(config: ServerConfig, musicbrainz: GuardedMusicBrainz) -> Self {
        ServerState {
            config,
            start_time: Instant::now(),
            musicbrainz,
        }
    }
}

impl FromRef<ServerState> for GuardedMusicBrainz {
    fn from_ref(input: &ServerState) -> Self {
        input.musicbrainz.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
