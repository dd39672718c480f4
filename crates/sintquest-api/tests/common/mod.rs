//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::TimeZone;
use http_body_util::BodyExt;
use sintquest_puzzle::domain::answer_book::AnswerBook;
use sintquest_session::domain::cookie::CookieSettings;
use sintquest_test_support::{InMemoryKeyValueStore, ManualClock, SequenceTokenSource};
use tower::ServiceExt;

use sintquest_api::build_router;
use sintquest_api::state::AppState;

/// The game as seen by tests: the router plus the clock and store behind it.
pub struct TestGame {
    pub app: Router,
    pub clock: Arc<ManualClock>,
    pub store: Arc<InMemoryKeyValueStore>,
}

/// Build the full app router over an in-memory store and a manual clock
/// starting at 5 December 2026, 18:00 UTC.
pub fn build_test_game() -> TestGame {
    let clock = Arc::new(ManualClock::new(
        chrono::Utc.with_ymd_and_hms(2026, 12, 5, 18, 0, 0).unwrap(),
    ));
    let store = Arc::new(InMemoryKeyValueStore::new(clock.clone()));
    let app_state = AppState::new(
        store.clone(),
        clock.clone(),
        Arc::new(SequenceTokenSource::new("sid")),
        CookieSettings::new("integration-secret", false).unwrap(),
        AnswerBook::bundled().unwrap(),
    );

    TestGame {
        app: build_router(app_state),
        clock,
        store,
    }
}

/// Response pieces the tests look at.
pub struct TestResponse {
    pub status: StatusCode,
    pub json: serde_json::Value,
    /// `name=value` part of `Set-Cookie`, if one was sent.
    pub cookie: Option<String>,
    pub location: Option<String>,
}

async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .map(|v| v.to_str().unwrap().split(';').next().unwrap().to_owned());
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_owned());
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body_bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    TestResponse {
        status,
        json,
        cookie,
        location,
    }
}

/// Send a POST request with a JSON body and optional session cookie.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
    cookie: Option<&str>,
) -> TestResponse {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a GET request with an optional session cookie.
pub async fn get(app: Router, uri: &str, cookie: Option<&str>) -> TestResponse {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = builder.body(Body::empty()).unwrap();

    send(app, request).await
}
