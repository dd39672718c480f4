//! Ending a player's session.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Router, routing::post};
use tracing::{info, instrument};

use crate::routes::{cookie_header, with_commit};
use crate::state::AppState;

/// POST /logout
///
/// Deletes the stored session and clears the cookie. Succeeds even when
/// there was no session.
#[instrument(skip(state, headers))]
async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session = state.sessions.read(cookie_header(&headers).as_deref()).await;
    let commit = state.sessions.destroy(&session).await;
    info!(had_session = !session.is_new(), "session destroyed");
    with_commit(StatusCode::NO_CONTENT.into_response(), commit)
}

/// Returns the router for session management.
pub fn router() -> Router<AppState> {
    Router::new().route("/logout", post(logout))
}
