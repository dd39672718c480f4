//! Sintquest API server entry point.

use std::sync::Arc;

use sintquest_api::config::AppConfig;
use sintquest_api::error::AppError;
use sintquest_api::state::AppState;
use sintquest_core::clock::SystemClock;
use sintquest_core::tokens::RandomTokenSource;
use sintquest_kv_store::redis_store::RedisKeyValueStore;
use sintquest_puzzle::domain::answer_book::AnswerBook;
use sintquest_session::domain::cookie::CookieSettings;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Sintquest API server");

    let config = AppConfig::from_env()?;

    let book = match &config.puzzle_file {
        Some(path) => AnswerBook::load(path)?,
        None => AnswerBook::bundled()?,
    };
    tracing::info!(questions = book.question_count(), "answer table loaded");

    // The key-value store connects on first use.
    let store = RedisKeyValueStore::open(&config.redis_url)?;
    let cookie = CookieSettings::new(&config.session_secret, config.secure_cookies)?;

    let app_state = AppState::new(
        Arc::new(store),
        Arc::new(SystemClock),
        Arc::new(RandomTokenSource),
        cookie,
        book,
    );

    // TODO: Replace CorsLayer::permissive() with the game's own origin once it is hosted.
    let app = sintquest_api::build_router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.bind_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
