use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{config, error, info, server::start_api_server, success};

use super::{build_engine, spinner};

pub async fn serve() {
    let mut engine = build_engine();

    let pb = spinner("Preloading tracks...");
    let preload = engine.preload_count();
    let tracks = engine.preload(preload).await;
    pb.finish_and_clear();
    success!("Preloaded {} tracks", tracks.len());

    let addr = config::server_addr();
    info!("Serving discovery API on http://{}", addr);

    if let Err(e) = start_api_server(Arc::new(Mutex::new(engine)), &addr).await {
        error!("Server stopped. Err: {}", e);
    }
}
