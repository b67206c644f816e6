//! Router assembly for the codeflow HTTP API.
//!
//! [`build_router`] wires all handler functions to their routes with
//! CORS and tracing middleware layers.

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use codeflow_assist::Assistant;

use crate::handlers;
use crate::state::AppState;

/// Builds the complete axum router with all API routes.
///
/// Routes use axum 0.8 `/{param}` path syntax.
pub fn build_router<A: Assistant>(state: AppState<A>) -> Router {
    Router::new()
        // Scripts
        .route(
            "/scripts",
            get(handlers::scripts::list_scripts::<A>).post(handlers::scripts::create_script::<A>),
        )
        .route(
            "/scripts/{id}",
            get(handlers::scripts::get_script::<A>).delete(handlers::scripts::delete_script::<A>),
        )
        .route(
            "/scripts/{id}/content",
            put(handlers::scripts::update_content::<A>),
        )
        .route(
            "/scripts/{id}/export",
            get(handlers::scripts::export_script::<A>),
        )
        // Simulated runs
        .route("/scripts/{id}/run", post(handlers::run::run_script::<A>))
        .route(
            "/scripts/{id}/run/stream",
            get(handlers::run::stream_script::<A>),
        )
        // Console
        .route(
            "/console",
            get(handlers::console::get_console::<A>).delete(handlers::console::clear_console::<A>),
        )
        .route("/console/text", get(handlers::console::console_text::<A>))
        .route("/status", get(handlers::console::status::<A>))
        // AI collaborators
        .route("/assist/generate", post(handlers::assist::generate::<A>))
        .route("/assist/explain", post(handlers::assist::explain::<A>))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
