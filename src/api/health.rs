use axum::{Extension, response::Json};
use serde_json::{Value, json};

use crate::{api::SharedEngine, deezer::CatalogGateway};

pub async fn health<G: CatalogGateway + 'static>(
    Extension(engine): Extension<SharedEngine<G>>,
) -> Json<Value> {
    let engine = engine.lock().await;
    Json(json!({
        "status": if engine.is_degraded() { "degraded" } else { "ok" },
        "version": env!("CARGO_PKG_VERSION"),
        "state": format!("{:?}", engine.state()),
        "history": engine.history().len(),
        "current_index": engine.current_index(),
    }))
}
