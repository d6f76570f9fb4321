//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use smarthome_app::ports::Storage;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<S: Storage>(state: AppState<S>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
