use std::{net::SocketAddr, str::FromStr};

use crate::{
    Res,
    api::{self, SharedEngine},
    deezer::CatalogGateway,
};

/// Serves the [`api`] routes on `addr` until the process is stopped.
pub async fn start_api_server<G: CatalogGateway + 'static>(
    engine: SharedEngine<G>,
    addr: &str,
) -> Res<()> {
    let app = api::router(engine);

    let addr = SocketAddr::from_str(addr)?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
