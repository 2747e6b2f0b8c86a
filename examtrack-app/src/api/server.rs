use axum::{routing::get, Router};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::api::routes::{get_stats, AppState};
use examtrack_core::Repository;

pub async fn run(
    repo: Arc<dyn Repository>,
    papers: Vec<String>,
    addr: SocketAddr,
) -> anyhow::Result<()> {
    let state = Arc::new(AppState { repo, papers });

    let app = Router::new()
        .route("/stats", get(get_stats))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    tracing::info!("listening on {addr}");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
