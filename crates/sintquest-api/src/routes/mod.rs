//! Route modules, one per page of the game.

pub mod authenticate;
pub mod briefing;
pub mod health;
pub mod questions;
pub mod session;
pub mod status;

use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use axum::response::Response;
use sintquest_session::application::session_store::Commit;
use tracing::warn;

/// Joins every `Cookie` request header into one string.
pub(crate) fn cookie_header(headers: &HeaderMap) -> Option<String> {
    let joined = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect::<Vec<_>>()
        .join("; ");
    (!joined.is_empty()).then_some(joined)
}

/// Adds the commit's `Set-Cookie` header to `response`. A failed commit is
/// logged and otherwise ignored; the player keeps playing.
pub(crate) fn with_commit(mut response: Response, commit: Commit) -> Response {
    if let Err(e) = &commit.outcome {
        warn!(error = %e, "session not persisted; responding anyway");
    }
    if let Some(value) = commit
        .set_cookie
        .and_then(|cookie| HeaderValue::from_str(&cookie).ok())
    {
        response.headers_mut().append(SET_COOKIE, value);
    }
    response
}
