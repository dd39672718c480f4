//! Completion status, polled by the success page.

use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Json, Router, routing::get};
use serde::Serialize;
use tracing::instrument;

use sintquest_puzzle::domain::completion::CompletionStatus;

use crate::error::ApiError;
use crate::state::AppState;

/// Response body while at least one marker is alive.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// `partial` or `complete`.
    pub status: CompletionStatus,
}

/// GET /
///
/// With no marker alive there is nothing to show; the client is sent back to
/// the landing page.
#[instrument(skip(state))]
async fn get_status(State(state): State<AppState>) -> Result<Response, ApiError> {
    let status = state.gate.status(&*state.store).await?;

    if status == CompletionStatus::None {
        return Ok(Redirect::to("/").into_response());
    }

    Ok(Json(StatusResponse { status }).into_response())
}

/// Returns the router for the status poll.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_status))
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use sintquest_core::store::KeyValueStore;
    use sintquest_puzzle::application::command_handlers::{MARKER_TTL, MARKER_VALUE};
    use tower::ServiceExt;

    use crate::routes::test_support::{failing_app_state, json_body, memory_app_state};

    fn get() -> Request<Body> {
        Request::builder().uri("/").body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_no_markers_redirects_home() {
        let (_, state) = memory_app_state();

        let response = router().with_state(state).oneshot(get()).await.unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
    }

    #[tokio::test]
    async fn test_one_marker_is_partial() {
        let (store, state) = memory_app_state();
        store.set_with_ttl("BAIE", MARKER_VALUE, MARKER_TTL).await.unwrap();

        let response = router().with_state(state).oneshot(get()).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "partial");
    }

    #[tokio::test]
    async fn test_both_markers_is_complete() {
        let (store, state) = memory_app_state();
        store.set_with_ttl("DANK", MARKER_VALUE, MARKER_TTL).await.unwrap();
        store.set_with_ttl("BAIE", MARKER_VALUE, MARKER_TTL).await.unwrap();

        let response = router().with_state(state).oneshot(get()).await.unwrap();

        assert_eq!(json_body(response).await["status"], "complete");
    }

    #[tokio::test]
    async fn test_store_failure_returns_500() {
        let response = router()
            .with_state(failing_app_state())
            .oneshot(get())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
