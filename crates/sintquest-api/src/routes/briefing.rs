//! Landing page: who is playing and where they can go.

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing::get};
use serde::Deserialize;
use tracing::{info, instrument};

use sintquest_puzzle::application::query_handlers;

use crate::routes::{cookie_header, with_commit};
use crate::state::AppState;

/// Query string for GET /.
#[derive(Debug, Deserialize)]
pub struct BriefingQuery {
    /// Display name to claim if the session has none yet.
    pub name: Option<String>,
}

/// GET /
///
/// Claims `?name=` for this browser on first visit; later names are ignored.
#[instrument(skip(state, headers, query))]
async fn get_briefing(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<BriefingQuery>,
) -> Response {
    let mut session = state.sessions.read(cookie_header(&headers).as_deref()).await;

    let claimed = query
        .name
        .as_deref()
        .is_some_and(|name| session.claim_name(name));

    let view = query_handlers::get_briefing(&state.book, &session);

    if claimed {
        info!(role = %view.role, "display name claimed");
        let commit = state.sessions.write(&mut session).await;
        return with_commit(Json(view).into_response(), commit);
    }

    Json(view).into_response()
}

/// Returns the router for the landing page.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_briefing))
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use crate::routes::test_support::{
        failing_app_state, json_body, memory_app_state, session_cookie,
    };

    #[tokio::test]
    async fn test_first_visit_claims_name_and_sets_cookie() {
        // Arrange
        let (store, state) = memory_app_state();
        let app = router().with_state(state);

        let request = Request::builder()
            .method("GET")
            .uri("/?name=Marlies")
            .body(Body::empty())
            .unwrap();

        // Act
        let response = app.oneshot(request).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        assert!(session_cookie(&response).starts_with("sinterklaas_session=sid-0."));
        assert_eq!(store.live_keys(), vec!["sid-0".to_owned()]);

        let json = json_body(response).await;
        assert_eq!(json["name"], "Marlies");
        assert_eq!(json["role"], "MARLIES");
        assert_eq!(json["locations"].as_array().unwrap().len(), 4);
        assert_eq!(json["locations"][0]["location"], "VLIEGTUIG");
    }

    #[tokio::test]
    async fn test_second_name_is_ignored() {
        // Arrange
        let (_, state) = memory_app_state();
        let first = router()
            .with_state(state.clone())
            .oneshot(
                Request::builder()
                    .uri("/?name=Roan")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let cookie = session_cookie(&first);

        let request = Request::builder()
            .uri("/?name=Marlies")
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .unwrap();

        // Act
        let response = router().with_state(state).oneshot(request).await.unwrap();

        // Assert
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        let json = json_body(response).await;
        assert_eq!(json["name"], "Roan");
        assert_eq!(json["role"], "ROAN");
    }

    #[tokio::test]
    async fn test_anonymous_visit_does_not_persist() {
        let (store, state) = memory_app_state();

        let response = router()
            .with_state(state)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        assert!(store.live_keys().is_empty());
        let json = json_body(response).await;
        assert!(json["name"].is_null());
        assert_eq!(json["role"], "ROAN");
    }

    #[tokio::test]
    async fn test_store_outage_still_renders() {
        let response = router()
            .with_state(failing_app_state())
            .oneshot(
                Request::builder()
                    .uri("/?name=Roan")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }
}
