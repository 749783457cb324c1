//! Session token endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header::SET_COOKIE, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::auth::cookie::{build_clear_cookie, build_token_cookie};
use crate::auth::token::issue_token;
use crate::state::AppState;

/// Identity claim presented at login
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: String,
}

/// Sign a session token for the claimed identity and set it as an
/// HTTP-only cookie.
pub async fn issue_jwt(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TokenRequest>,
) -> Response {
    match issue_token(
        &request.email,
        &state.config.jwt_secret,
        state.config.token_ttl_hours,
    ) {
        Ok(token) => {
            let cookie = build_token_cookie(&token, state.config.production);
            (
                StatusCode::OK,
                [(SET_COOKIE, cookie)],
                Json(json!({ "success": true })),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("token signing failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "token signing failed" })),
            )
                .into_response()
        }
    }
}

/// Instruct the client to drop the session cookie. The token itself stays
/// cryptographically valid until the signing secret changes; there is no
/// server-side revocation store.
pub async fn logout(State(state): State<Arc<AppState>>) -> Response {
    let cookie = build_clear_cookie(state.config.production);
    (
        StatusCode::OK,
        [(SET_COOKIE, cookie)],
        Json(json!({ "success": true })),
    )
        .into_response()
}
