use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::time::Duration;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use music_discovery::discovery::{album_tracks, artist_albums, discover, DiscoveryError};
use music_discovery::listing::ArtistSummary;
use music_discovery::musicbrainz::client::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use music_discovery::{MusicBrainzClient, MusicBrainzConfig};

#[derive(Parser, Debug)]
#[command(version, about = "Find artists similar to one you like")]
struct CliArgs {
    /// Name of the artist to start from.
    pub artist: String,

    /// Genre tag to look for similar artists in, e.g. "rock".
    pub genre: String,

    /// Base URL of the MusicBrainz web service.
    #[clap(long, env = "MUSICBRAINZ_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub musicbrainz_base_url: String,

    /// User-Agent sent with every MusicBrainz request.
    #[clap(long, env = "MUSICBRAINZ_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Minimum spacing between two MusicBrainz requests, in milliseconds.
    #[clap(long, env = "MIN_REQUEST_INTERVAL_MS", default_value_t = 1000)]
    pub min_request_interval_ms: u64,

    /// Per-request timeout for MusicBrainz calls, in seconds.
    #[clap(long, env = "UPSTREAM_TIMEOUT_SEC")]
    pub upstream_timeout_sec: Option<u64>,
}

fn musicbrainz_config(cli_args: &CliArgs) -> MusicBrainzConfig {
    MusicBrainzConfig {
        base_url: cli_args.musicbrainz_base_url.clone(),
        user_agent: cli_args.user_agent.clone(),
        min_request_interval: Duration::from_millis(cli_args.min_request_interval_ms),
        timeout: cli_args.upstream_timeout_sec.map(Duration::from_secs),
    }
}

/// Prompts and reads one trimmed line. `None` on end of input.
fn prompt(message: &str) -> Result<Option<String>> {
    print!("{} ", message);
    io::stdout().flush()?;

    let mut user_input = String::new();
    let read = io::stdin()
        .read_line(&mut user_input)
        .context("Failed to read line")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(user_input.trim().to_string()))
}

fn parse_choice(input: &str, count: usize) -> Option<usize> {
    match input.parse::<usize>() {
        Ok(n) if n >= 1 && n <= count => Some(n - 1),
        _ => None,
    }
}

fn describe_artist(artist: &ArtistSummary) -> String {
    let mut details = Vec::new();
    if let Some(artist_type) = &artist.artist_type {
        details.push(artist_type.clone());
    }
    if let Some(country) = &artist.country {
        details.push(country.clone());
    }
    if let Some(year) = &artist.begin_year {
        details.push(format!("since {}", year));
    }
    if details.is_empty() {
        artist.name.clone()
    } else {
        format!("{} ({})", artist.name, details.join(", "))
    }
}

async fn show_tracks(client: &MusicBrainzClient, release_id: &str, title: &str) {
    let tracks = match album_tracks(client, release_id).await {
        Ok(tracks) => tracks,
        Err(e) => {
            println!("Failed to load tracks: {}", e);
            return;
        }
    };
    if tracks.is_empty() {
        println!("No tracks available for this album.");
        return;
    }
    println!("\n{}:", title);
    for track in tracks {
        println!("  {:>2}. {} {}", track.number, track.title, track.duration);
    }
}

async fn browse_artist(client: &MusicBrainzClient, artist: &ArtistSummary) -> Result<()> {
    let albums = match artist_albums(client, &artist.id).await {
        Ok(albums) => albums,
        Err(e) => {
            println!("Failed to load albums: {}", e);
            return Ok(());
        }
    };
    if albums.is_empty() {
        println!("No albums found for this artist.");
        return Ok(());
    }

    loop {
        println!("\nAlbums by {}:", artist.name);
        for (i, album) in albums.iter().enumerate() {
            let year = album.year.as_deref().unwrap_or("----");
            match &album.status {
                Some(status) => {
                    println!("  {:>2}. {} ({}) [{}]", i + 1, album.title, year, status)
                }
                None => println!("  {:>2}. {} ({})", i + 1, album.title, year),
            }
        }

        let input = match prompt("Album number to list tracks (empty to go back):")? {
            Some(input) if !input.is_empty() => input,
            _ => return Ok(()),
        };
        match parse_choice(&input, albums.len()) {
            Some(index) => show_tracks(client, &albums[index].id, &albums[index].title).await,
            None => println!("Invalid choice \"{}\".", input),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    let client = MusicBrainzClient::new(musicbrainz_config(&cli_args))
        .context("Failed to create MusicBrainz client")?;

    println!(
        "Looking for artists like \"{}\" in \"{}\"...",
        cli_args.artist.trim(),
        cli_args.genre.trim()
    );
    let discovery = match discover(&client, &cli_args.artist, &cli_args.genre).await {
        Ok(discovery) => discovery,
        Err(e @ DiscoveryError::Upstream(_)) => return Err(e.into()),
        Err(e) => {
            println!("{}", e);
            return Ok(());
        }
    };

    println!("Found {}.", describe_artist(&discovery.artist));
    if discovery.similar.is_empty() {
        println!("{}", discovery.empty_notice());
        return Ok(());
    }
    if discovery.from_genre_search {
        println!("No direct matches, showing top \"{}\" artists instead.", discovery.genre);
    }

    loop {
        println!("\nSimilar artists:");
        for (i, artist) in discovery.similar.iter().enumerate() {
            println!("  {:>2}. {}", i + 1, describe_artist(artist));
        }

        let input = match prompt("Artist number to list albums (q to quit):")? {
            Some(input) if input != "q" => input,
            _ => break,
        };
        match parse_choice(&input, discovery.similar.len()) {
            Some(index) => browse_artist(&client, &discovery.similar[index]).await?,
            None => println!("Invalid choice \"{}\".", input),
        }
    }

    Ok(())
}
