use axum::{Router, http::Method};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::SharedState;

/// Swagger UI and OpenAPI document.
pub mod docs;
/// Health check route.
pub mod health;
/// Read-only board routes.
pub mod public;
/// WebSocket upgrade route.
pub mod websocket;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(public::router())
        .merge(websocket::router());

    let docs_router = docs::router(state.clone());

    api_router.merge(docs_router).with_state(state)
}

/// Build the top-level router and attach cross-cutting middleware layers.
pub fn build_router(state: SharedState) -> Router<()> {
    let cors = CorsLayer::new()
        .allow_origin(state.config().allowed_origin.clone())
        .allow_methods([Method::GET, Method::POST])
        .allow_credentials(true);

    router(state).layer(cors).layer(TraceLayer::new_for_http())
}
