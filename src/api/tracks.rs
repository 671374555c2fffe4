use axum::{
    Extension,
    extract::{Path, Query},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{api::SharedEngine, deezer::CatalogGateway, error::LookupError, types::Track};

pub async fn next_track<G: CatalogGateway + 'static>(
    Extension(engine): Extension<SharedEngine<G>>,
) -> Json<Track> {
    let mut engine = engine.lock().await;
    let track = engine.next().await;
    log::debug!("Next track: {} ({})", track.title(), track.external_id());
    Json(track)
}

pub async fn previous_track<G: CatalogGateway + 'static>(
    Extension(engine): Extension<SharedEngine<G>>,
) -> Json<Track> {
    let mut engine = engine.lock().await;
    Json(engine.previous().await)
}

pub async fn random_track<G: CatalogGateway + 'static>(
    Extension(engine): Extension<SharedEngine<G>>,
) -> Json<Track> {
    let mut engine = engine.lock().await;
    Json(engine.random().await)
}

pub async fn cached_tracks<G: CatalogGateway + 'static>(
    Extension(engine): Extension<SharedEngine<G>>,
) -> Json<Value> {
    let mut engine = engine.lock().await;
    let tracks = engine.cached_batch().await;
    Json(json!({
        "tracks": tracks,
        "current_index": engine.current_index(),
    }))
}

type ApiError = (StatusCode, Json<Value>);

fn lookup_error(what: &str, err: LookupError) -> ApiError {
    match err {
        LookupError::NotFound(key) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("{} {} not found", what, key) })),
        ),
        LookupError::Upstream(err) => {
            log::warn!("Upstream failure for {}: {}", what, err);
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": err.to_string() })),
            )
        }
    }
}

pub async fn track_by_id<G: CatalogGateway + 'static>(
    Path(id): Path<String>,
    Extension(engine): Extension<SharedEngine<G>>,
) -> Result<Json<Track>, ApiError> {
    // the lookup never touches navigation state, so the lock is released first
    let lookup = engine.lock().await.lookup();
    lookup
        .track_by_id(&id)
        .await
        .map(Json)
        .map_err(|e| lookup_error("track", e))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
}

pub async fn search_track<G: CatalogGateway + 'static>(
    Query(params): Query<SearchParams>,
    Extension(engine): Extension<SharedEngine<G>>,
) -> Result<Json<Track>, ApiError> {
    let lookup = engine.lock().await.lookup();
    lookup
        .search_top(&params.q)
        .await
        .map(Json)
        .map_err(|e| lookup_error("search", e))
}

pub async fn genre_track<G: CatalogGateway + 'static>(
    Path(genre): Path<String>,
    Extension(engine): Extension<SharedEngine<G>>,
) -> Result<Json<Track>, ApiError> {
    let mut engine = engine.lock().await;
    engine
        .track_for_genre(&genre)
        .await
        .map(Json)
        .map_err(|e| lookup_error("genre", e))
}
