//! Sintquest HTTP API.
//!
//! JSON endpoints for the landing page, the question pages and the
//! completion status poll, wired to the session store and the puzzle
//! context.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;

use crate::state::AppState;

/// Builds the application router without transport layers.
pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/briefing", routes::briefing::router())
        .nest("/api/v1/authenticate", routes::authenticate::router())
        .nest("/api/v1/questions", routes::questions::router())
        .nest("/api/v1/status", routes::status::router())
        .nest("/api/v1/session", routes::session::router())
        .with_state(app_state)
}
