use crate::{
    error::LookupError,
    success,
    types::Track,
    warning,
};

use super::{build_engine, print_track, print_tracks, spinner};

/// True when a batch holds only placeholder tracks. An empty batch is not
/// a failure, nothing was requested.
pub fn is_placeholder_batch(tracks: &[Track]) -> bool {
    !tracks.is_empty() && tracks.iter().all(Track::is_fallback)
}

pub async fn discover(count: Option<usize>) {
    let mut engine = build_engine();
    let count = count.unwrap_or(engine.preload_count());

    let pb = spinner(format!("Discovering {} tracks...", count));
    let tracks = engine.preload(count).await;
    pb.finish_and_clear();

    if tracks.is_empty() {
        warning!("No tracks requested");
        return;
    }

    if is_placeholder_batch(&tracks) {
        warning!("Deezer could not be reached, showing the placeholder track");
    } else {
        success!("Discovered {} tracks", tracks.len());
    }

    print_tracks(&tracks);
}

pub async fn random() {
    let mut engine = build_engine();

    let pb = spinner("Picking a random track...");
    let track = engine.random().await;
    pb.finish_and_clear();

    if track.is_fallback() {
        warning!("Deezer could not be reached, showing the placeholder track");
    }
    print_track(&track);
}

pub async fn track(id: String) {
    let engine = build_engine();

    match engine.track_by_id(&id).await {
        Ok(track) => print_track(&track),
        Err(LookupError::NotFound(id)) => warning!("Track {} not found", id),
        Err(LookupError::Upstream(e)) => crate::error!("Cannot look up track {}. Err: {}", id, e),
    }
}

pub async fn genre(genre: String) {
    let mut engine = build_engine();

    let pb = spinner(format!("Searching {} tracks...", genre));
    let result = engine.track_for_genre(&genre).await;
    pb.finish_and_clear();

    match result {
        Ok(track) => print_track(&track),
        Err(LookupError::NotFound(_)) => warning!("No tracks found for genre {}", genre),
        Err(LookupError::Upstream(e)) => crate::error!("Cannot search genre {}. Err: {}", genre, e),
    }
}

pub async fn search(query: String) {
    let engine = build_engine();

    let pb = spinner(format!("Searching {:?}...", query));
    let result = engine.search_top(&query).await;
    pb.finish_and_clear();

    match result {
        Ok(track) => print_track(&track),
        Err(LookupError::NotFound(_)) => warning!("Nothing matches {:?}", query),
        Err(LookupError::Upstream(e)) => crate::error!("Cannot search {:?}. Err: {}", query, e),
    }
}
