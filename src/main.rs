mod config;
mod error;
mod logging;
mod plex_rs;
mod ports;
mod services;
mod spotify_rs;
#[cfg(test)]
mod test_utils;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::{Result, eyre::WrapErr};

use crate::{
    config::{UriSource, plex_base_url},
    logging::setup_logging,
    services::{
        background::run_sync_loop,
        matching::{ArtistMatch, MatchPolicy},
        plex::client::PlexHttpAdapter,
        spotify::client::SpotifyHttpAdapter,
        sync::SyncService,
    },
    spotify_rs::auth::SpotifyApiCredentials,
};

/// Mirror Spotify playlists into a Plex music library, forever.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the Plex Media Server, e.g. http://127.0.0.1:32400
    #[arg(long, env = "PLEX_URL")]
    plex_url: String,

    /// Plex access token
    #[arg(long, env = "PLEX_TOKEN", hide_env_values = true)]
    plex_token: String,

    /// Spotify app client id
    #[arg(long, env = "SPOTIPY_CLIENT_ID")]
    spotify_client_id: String,

    /// Spotify app client secret
    #[arg(long, env = "SPOTIPY_CLIENT_SECRET", hide_env_values = true)]
    spotify_client_secret: String,

    /// Comma separated catalog uris, e.g. spotify:user:abc,spotify:user:abc:playlist:xyz
    #[arg(long, env = "SPOTIFY_URIS")]
    spotify_uris: Option<String>,

    /// File with one catalog uri per line, re-read before every sync
    #[arg(long, env = "SPOTIFY_URIS_FILE", conflicts_with = "spotify_uris")]
    spotify_uris_file: Option<PathBuf>,

    /// Seconds to sleep between syncs
    #[arg(long, default_value = "1800", env = "SECONDS_TO_WAIT")]
    seconds_to_wait: u64,

    /// How Spotify artists are compared with Plex artists
    #[arg(long, value_enum, default_value_t = ArtistMatch::Contains, env = "ARTIST_MATCH")]
    artist_match: ArtistMatch,

    /// Also search "<title> (<mix>)" and, for original mixes, the bare title
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set, env = "REMIX_VARIANTS")]
    remix_variants: bool,

    /// Run a single sync and exit
    #[arg(long)]
    once: bool,

    /// Console log level
    #[arg(long, default_value = "info", env = "LOGLEVEL")]
    log_level: log::LevelFilter,

    /// File log level
    #[arg(long, default_value = "debug")]
    log_file_level: log::LevelFilter,

    /// Path to log file
    #[arg(long, env = "LOG_FILE")]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    setup_logging(args.log_level, args.log_file.clone(), args.log_file_level)?;

    log::info!("Log-Level {}", args.log_level);
    log::debug!("Loading configuration");

    let source = UriSource::from_options(args.spotify_uris.as_deref(), args.spotify_uris_file)
        .wrap_err("Failed to determine spotify uri source")?;
    let server_url = plex_base_url(&args.plex_url)?;
    let policy = MatchPolicy {
        artist_match: args.artist_match,
        remix_variants: args.remix_variants,
    };
    log::debug!("Uri source {:?}, match policy {:?}", source, policy);

    let http = reqwest::Client::new();
    let plex = PlexHttpAdapter::new(http.clone(), server_url, args.plex_token);
    let spotify = SpotifyHttpAdapter::new(
        http,
        SpotifyApiCredentials::new(args.spotify_client_id, args.spotify_client_secret),
    );
    let service = SyncService::new(spotify, plex, policy);

    let max_passes = args.once.then_some(1);
    run_sync_loop(
        &service,
        &source,
        Duration::from_secs(args.seconds_to_wait),
        max_passes,
    )
    .await?;

    log::info!("Sync finished");
    Ok(())
}
