use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use music_discovery::config;
use music_discovery::musicbrainz::client::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use music_discovery::server::run_server;
use music_discovery::{MusicBrainzClient, RequestsLoggingLevel};

fn parse_path(s: &str) -> Result<PathBuf, String> {
    let path_buf = PathBuf::from(s);
    if path_buf.is_absolute() {
        return Ok(path_buf);
    }
    let cwd = std::env::current_dir().map_err(|e| format!("Failed to get current dir: {}", e))?;
    Ok(cwd.join(path_buf))
}

#[derive(Parser, Debug)]
#[command(version, about = "Artist discovery API backed by MusicBrainz")]
struct CliArgs {
    /// Path to TOML configuration file. Values in the file override CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// The host to bind to.
    #[clap(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// The port to listen on.
    #[clap(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, env = "REQUESTS_LOGGING_LEVEL", default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Base URL of the MusicBrainz web service.
    #[clap(long, env = "MUSICBRAINZ_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub musicbrainz_base_url: String,

    /// User-Agent sent with every MusicBrainz request.
    #[clap(long, env = "MUSICBRAINZ_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Minimum spacing between two MusicBrainz requests, in milliseconds.
    #[clap(long, env = "MIN_REQUEST_INTERVAL_MS", default_value_t = 1000)]
    pub min_request_interval_ms: u64,

    /// Timeout in seconds for MusicBrainz requests. No timeout when unset.
    #[clap(long, env = "UPSTREAM_TIMEOUT_SEC")]
    pub upstream_timeout_sec: Option<u64>,
}

impl From<&CliArgs> for config::CliConfig {
    fn from(args: &CliArgs) -> Self {
        config::CliConfig {
            host: args.host.clone(),
            port: args.port,
            logging_level: args.logging_level.clone(),
            musicbrainz_base_url: args.musicbrainz_base_url.clone(),
            user_agent: args.user_agent.clone(),
            min_request_interval_ms: args.min_request_interval_ms,
            upstream_timeout_sec: args.upstream_timeout_sec,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    // Load TOML config if provided
    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            Some(config::FileConfig::load(path)?)
        }
        None => None,
    };

    // Resolve final configuration (TOML overrides CLI)
    let cli_config: config::CliConfig = (&cli_args).into();
    let app_config = config::AppConfig::resolve(&cli_config, file_config)?;

    info!("Configuration loaded:");
    info!("  bind: {}:{}", app_config.host, app_config.port);
    info!("  musicbrainz: {}", app_config.musicbrainz.base_url);
    info!("  user agent: {}", app_config.musicbrainz.user_agent);
    info!(
        "  min request interval: {}ms",
        app_config.musicbrainz.min_request_interval.as_millis()
    );
    info!("  requests logging: {}", app_config.logging_level);

    let client = MusicBrainzClient::new(app_config.musicbrainz.clone())
        .context("Failed to create MusicBrainz client")?;

    tokio::select! {
        result = run_server(app_config.server_config(), Arc::new(client)) => {
            info!("HTTP server stopped: {:?}", result);
            result
        },
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
            Ok(())
        }
    }
}
