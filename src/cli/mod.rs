//! # CLI Module
//!
//! Command implementations for the `aswa` binary. Each command builds a
//! discovery engine from the environment configuration, runs it and prints
//! the outcome with the coloured console macros.
//!
//! ## Commands
//!
//! - [`discover`] - preload a batch of tracks and print it as a table
//! - [`random`] - print one standalone random track
//! - [`track`] - look a track up by its Deezer id
//! - [`genre`] - one random track of a genre
//! - [`search`] - the most relevant track for a free-text query
//! - [`browse`] - navigate next/previous/random interactively over stdin
//! - [`queries`] - print sample queries from the strategy selector
//! - [`serve`] - run the JSON API for the web front end
//!
//! ## Architecture
//!
//! ```text
//! CLI Layer (User Interface)
//!     ↓
//! Discovery Layer (engine, strategies, history)
//!     ↓
//! Deezer Gateway (HTTP requests)
//! ```
//!
//! Upstream failures never abort a navigation command; the engine degrades
//! to the placeholder track and the CLI says so.

mod browse;
mod discover;
mod queries;
mod serve;

pub use browse::BrowseCommand;
pub use browse::browse;
pub use discover::discover;
pub use discover::genre;
pub use discover::is_placeholder_batch;
pub use discover::random;
pub use discover::search;
pub use discover::track;
pub use queries::queries;
pub use serve::serve;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    config,
    deezer::DeezerClient,
    discovery::DiscoveryEngine,
    error, info,
    types::{Track, TrackTableRow},
};

/// Builds an engine against the configured Deezer endpoint.
fn build_engine() -> DiscoveryEngine<DeezerClient> {
    let cfg = config::discovery_config();
    let client = match DeezerClient::new(config::deezer_api_url(), cfg.retry.request_timeout) {
        Ok(client) => client,
        Err(e) => error!("Cannot create Deezer client. Err: {}", e),
    };
    DiscoveryEngine::new(client, cfg)
}

fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}

fn print_tracks(tracks: &[Track]) {
    let rows: Vec<TrackTableRow> = tracks.iter().map(TrackTableRow::from).collect();
    println!("{}", Table::new(rows));
}

fn print_track(track: &Track) {
    let explicit = if track.is_explicit() { " [explicit]" } else { "" };
    info!(
        "{} - {} ({}){}",
        track.artist(),
        track.title(),
        track.album(),
        explicit
    );
    if !track.permalink().is_empty() {
        println!("    link:    {}", track.permalink());
    }
    if !track.preview_url().is_empty() {
        println!("    preview: {}", track.preview_url());
    }
}
