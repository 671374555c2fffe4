//! # API Module
//!
//! JSON endpoints exposing the discovery engine to a web front end. The
//! routes keep the field names the browser client already expects
//! (`id_deezer`, `track_id`, `cover_xl`, ...).
//!
//! ## Endpoints
//!
//! - `GET /health` - status, version and engine state
//! - `GET /next_track` - advance to the next track
//! - `GET /previous_track` - step back in the history
//! - `GET /random_track` - one standalone random track
//! - `GET /tracks` - the cached history plus the cursor position
//! - `GET /track/{id}` - direct lookup, `404` when the id is unknown
//! - `GET /search?q=` - most relevant track for free text, `404` on no match
//! - `GET /genre/{genre}` - one random track of a genre, `404` on no match
//!
//! ## Concurrency
//!
//! All handlers share one engine behind a `tokio::sync::Mutex`, so
//! requests are served one at a time and every cursor, history and
//! seen-set update of a call is applied together. Lookups by id and
//! free-text searches only borrow the gateway handle and run unlocked.

mod health;
mod tracks;

pub use health::health;
pub use tracks::{
    SearchParams, cached_tracks, genre_track, next_track, previous_track, random_track,
    search_track, track_by_id,
};

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tokio::sync::Mutex;

use crate::{deezer::CatalogGateway, discovery::DiscoveryEngine};

/// Engine handle shared between request handlers.
pub type SharedEngine<G> = Arc<Mutex<DiscoveryEngine<G>>>;

/// Builds the router for all endpoints around one shared engine.
pub fn router<G: CatalogGateway + 'static>(engine: SharedEngine<G>) -> Router {
    Router::new()
        .route("/health", get(health::<G>))
        .route("/next_track", get(next_track::<G>))
        .route("/previous_track", get(previous_track::<G>))
        .route("/random_track", get(random_track::<G>))
        .route("/tracks", get(cached_tracks::<G>))
        .route("/track/{id}", get(track_by_id::<G>))
        .route("/search", get(search_track::<G>))
        .route("/genre/{genre}", get(genre_track::<G>))
        .layer(Extension(engine))
}
