//! Router assembly and the serve loop.

use std::future::Future;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{chat, steps, RelayState};

/// Builds the relay's routes over `state`.
///
/// Any origin may call the relay; the page that uses it is hosted elsewhere.
pub fn router(state: RelayState) -> Router {
    Router::new()
        .route("/chat", post(chat::chat))
        .route("/health", get(steps::health))
        .route("/data/pipeline.json", get(steps::step_document))
        .route("/steps/{id}", get(steps::step_panel))
        .route("/scene", get(steps::scene))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Serves the relay on `listener` until `shutdown` resolves, then drains
/// in-flight requests.
pub async fn serve<F>(listener: TcpListener, state: RelayState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    tracing::info!(
        addr = %addr,
        provider = %state.provider.name(),
        steps = state.catalog.as_ref().map_or(0, |c| c.len()),
        "Chat relay listening"
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Chat relay stopped");
    Ok(())
}
