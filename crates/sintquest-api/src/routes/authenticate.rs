//! Codeword entry.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::{Json, Router, routing::post};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use sintquest_puzzle::application::command_handlers;
use sintquest_puzzle::domain::commands;
use sintquest_puzzle::domain::roles::Role;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /.
#[derive(Debug, Deserialize)]
pub struct AuthenticateRequest {
    /// The code as typed.
    #[serde(default)]
    pub code: Option<String>,
}

/// Response body after a codeword is accepted.
#[derive(Debug, Serialize)]
pub struct AuthenticateResponse {
    /// Role whose codeword was entered.
    pub role: Role,
    /// Where the client goes next.
    pub redirect: &'static str,
}

/// POST /
#[instrument(skip(state, payload))]
async fn authenticate(
    State(state): State<AppState>,
    payload: Result<Json<AuthenticateRequest>, JsonRejection>,
) -> Result<Json<AuthenticateResponse>, ApiError> {
    let Json(request) = payload?;
    let command = commands::Authenticate {
        code: request.code.unwrap_or_default(),
    };

    let role = command_handlers::handle_authenticate(&command, &state.book, &*state.store).await?;

    Ok(Json(AuthenticateResponse {
        role,
        redirect: "/success",
    }))
}

/// Returns the router for codeword entry.
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(authenticate))
}
