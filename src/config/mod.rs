mod file_config;

pub use file_config::{FileConfig, MusicBrainzFileConfig};

use crate::musicbrainz::client::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use crate::musicbrainz::MusicBrainzConfig;
use crate::server::{RequestsLoggingLevel, ServerConfig};
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::time::Duration;

/// CLI arguments that can be used for config resolution.
/// Each field is already merged with its environment variable by clap.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub host: String,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub musicbrainz_base_url: String,
    pub user_agent: String,
    pub min_request_interval_ms: u64,
    pub upstream_timeout_sec: Option<u64>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            logging_level: RequestsLoggingLevel::Path,
            musicbrainz_base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            min_request_interval_ms: 1000,
            upstream_timeout_sec: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub musicbrainz: MusicBrainzConfig,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();
        let mb_file = file.musicbrainz.unwrap_or_default();

        let host = file.host.unwrap_or_else(|| cli.host.clone());
        let port = file.port.unwrap_or(cli.port);

        let logging_level = match file.logging_level {
            Some(s) => match parse_logging_level(&s) {
                Some(level) => level,
                None => bail!("Invalid logging_level in config file: {:?}", s),
            },
            None => cli.logging_level.clone(),
        };

        let base_url = mb_file
            .base_url
            .unwrap_or_else(|| cli.musicbrainz_base_url.clone());
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            bail!("MusicBrainz base URL must be an http(s) URL: {:?}", base_url);
        }

        let user_agent = mb_file
            .user_agent
            .unwrap_or_else(|| cli.user_agent.clone());
        if user_agent.trim().is_empty() {
            bail!("MusicBrainz user agent must not be empty");
        }

        let min_request_interval_ms = mb_file
            .min_request_interval_ms
            .unwrap_or(cli.min_request_interval_ms);
        let timeout_sec = mb_file.timeout_sec.or(cli.upstream_timeout_sec);

        Ok(Self {
            host,
            port,
            logging_level,
            musicbrainz: MusicBrainzConfig {
                base_url: base_url.trim_end_matches('/').to_string(),
                user_agent,
                min_request_interval: Duration::from_millis(min_request_interval_ms),
                timeout: timeout_sec.map(Duration::from_secs),
            },
        })
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            requests_logging_level: self.logging_level.clone(),
            host: self.host.clone(),
            port: self.port,
        }
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
