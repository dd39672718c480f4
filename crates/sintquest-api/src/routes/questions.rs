//! Question pages: one trivia question per location.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing::get};
use serde::{Deserialize, Serialize};
use sintquest_core::error::DomainError;
use tracing::instrument;

use sintquest_puzzle::application::{command_handlers, query_handlers};
use sintquest_puzzle::domain::commands;
use sintquest_puzzle::domain::roles::Role;

use crate::error::ApiError;
use crate::routes::{cookie_header, with_commit};
use crate::state::AppState;

/// Request body for POST /{question_id}.
#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    /// The answer as typed.
    #[serde(default)]
    pub answer: Option<String>,
}

/// Response body after an answer is checked.
#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    /// Whether the answer was right.
    pub correct: bool,
    /// Success message, or why the answer was rejected.
    pub message: String,
    /// Revealed codeword letter on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_letter: Option<char>,
}

fn question_id(state: &AppState, raw: &str) -> Result<u32, ApiError> {
    state
        .book
        .parse_question_id(raw)
        .ok_or_else(|| ApiError(DomainError::NotFound(format!("question {raw}"))))
}

/// GET /{question_id}
#[instrument(skip(state, headers))]
async fn get_question(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let question_id = question_id(&state, &raw_id)?;
    let session = state.sessions.read(cookie_header(&headers).as_deref()).await;
    let role = Role::from_display_name(session.name());

    let view = query_handlers::get_question(question_id, role, &state.book, &session)?;

    Ok(Json(view).into_response())
}

/// POST /{question_id}
#[instrument(skip(state, headers, payload))]
async fn submit_answer(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    headers: HeaderMap,
    payload: Result<Json<AnswerRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let question_id = question_id(&state, &raw_id)?;
    let Json(request) = payload?;
    let mut session = state.sessions.read(cookie_header(&headers).as_deref()).await;
    let role = Role::from_display_name(session.name());

    let command = commands::SubmitAnswer {
        question_id,
        answer: request.answer.unwrap_or_default(),
    };

    match command_handlers::handle_submit_answer(&command, role, &state.book, &mut session)? {
        command_handlers::AnswerOutcome::Rejected { message } => Ok(Json(AnswerResponse {
            correct: false,
            message: message.to_owned(),
            code_letter: None,
        })
        .into_response()),
        command_handlers::AnswerOutcome::Correct {
            message,
            code_letter,
            ..
        } => {
            let commit = state.sessions.write(&mut session).await;
            let body = Json(AnswerResponse {
                correct: true,
                message,
                code_letter,
            });
            Ok(with_commit(body.into_response(), commit))
        }
    }
}

/// Returns the router for the question pages.
pub fn router() -> Router<AppState> {
    Router::new().route("/{question_id}", get(get_question).post(submit_answer))
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

    fn post_answer(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_owned())).unwrap()
    }

    #[tokio::test]
    async fn test_get_unsolved_question() {
        // Arrange
        let (_, state) = memory_app_state();
        let app = router().with_state(state);

        let request = Request::builder().uri("/1").body(Body::empty()).unwrap();

        // Act
        let response = app.oneshot(request).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["question_id"], 1);
        assert_eq!(json["location"], "PRETORIA");
        assert_eq!(json["role"], "ROAN");
        assert_eq!(json["solved"], false);
        assert!(json["message"].is_null());
        assert!(json["code_letter"].is_null());
    }

    #[tokio::test]
    async fn test_out_of_range_and_garbage_ids_are_404() {
        for uri in ["/4", "/-1", "/abc"] {
            let (_, state) = memory_app_state();

            let response = router()
                .with_state(state)
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
            let json = json_body(response).await;
            assert_eq!(json["error"], "not_found");
        }
    }

    #[tokio::test]
    async fn test_correct_answer_reveals_letter_and_persists() {
        // Arrange
        let (store, state) = memory_app_state();

        // Act
        let response = router()
            .with_state(state.clone())
            .oneshot(post_answer("/0", r#"{"answer":"8"}"#, None))
            .await
            .unwrap();
        let cookie = session_cookie(&response);
        let json = json_body(response).await;

        let revisit = router()
            .with_state(state)
            .oneshot(
                Request::builder()
                    .uri("/0")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        // Assert
        assert_eq!(json["correct"], true);
        assert_eq!(json["code_letter"], "D");
        assert_eq!(store.live_keys(), vec!["sid-0".to_owned()]);

        let revisit = json_body(revisit).await;
        assert_eq!(revisit["solved"], true);
        assert_eq!(revisit["code_letter"], "D");
    }

    #[tokio::test]
    async fn test_wrong_answer_does_not_touch_session() {
        let (store, state) = memory_app_state();

        let response = router()
            .with_state(state)
            .oneshot(post_answer("/0", r#"{"answer":"9"}"#, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        assert!(store.live_keys().is_empty());
        let json = json_body(response).await;
        assert_eq!(json["correct"], false);
        assert_eq!(json["message"], "WRONG ANSWER");
    }

    #[tokio::test]
    async fn test_missing_answer_is_rejected_softly() {
        let (_, state) = memory_app_state();

        let response = router()
            .with_state(state)
            .oneshot(post_answer("/2", "{}", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["message"], "NO ANSWER");
    }

    #[tokio::test]
    async fn test_non_string_answer_is_invalid_input() {
        let (_, state) = memory_app_state();

        let response = router()
            .with_state(state)
            .oneshot(post_answer("/2", r#"{"answer":["x"]}"#, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["message"], "INVALID INPUT");
    }

    #[tokio::test]
    async fn test_correct_answer_survives_store_outage() {
        let response = router()
            .with_state(failing_app_state())
            .oneshot(post_answer("/3", r#"{"answer":"LEKKER WIJNTJE HOOR"}"#, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["correct"], true);
        assert_eq!(json["code_letter"], "K");
    }
}
