//! Request authentication guard

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::CookieJar;
use serde_json::json;
use tracing::warn;

use crate::auth::cookie::TOKEN_COOKIE_NAME;
use crate::auth::token::verify_token;
use crate::config::Config;
use crate::state::AppState;

/// Identity decoded from the session token, attached to the request
/// before any protected handler body runs.
#[derive(Clone, Debug)]
pub struct UserContext {
    pub email: String,
}

/// The uniform rejection for every authentication failure.
pub fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "unauthorized access" })),
    )
        .into_response()
}

/// Authenticate a request from its headers: read the token cookie and
/// verify the signature. Fails closed with a 401 response in every error
/// path; no database access happens before this check.
pub fn authenticate(headers: &HeaderMap, config: &Config) -> Result<UserContext, Response> {
    let jar = CookieJar::from_headers(headers);
    let token = match jar.get(TOKEN_COOKIE_NAME) {
        Some(cookie) => cookie.value().to_string(),
        None => {
            warn!("no session token cookie on protected route");
            return Err(unauthorized());
        }
    };

    match verify_token(&token, &config.jwt_secret, config.token_ttl_hours.is_some()) {
        Ok(claims) => Ok(UserContext {
            email: claims.email,
        }),
        Err(e) => {
            warn!("token verification failed: {}", e);
            Err(unauthorized())
        }
    }
}

/// Authorization layered on top of authentication: owner-scoped routes
/// require the verified claim to match the email embedded in the path.
pub fn require_owner(user: &UserContext, path_email: &str) -> Result<(), Response> {
    if user.email != path_email {
        warn!("token email does not match path owner");
        return Err(unauthorized());
    }
    Ok(())
}

impl FromRequestParts<Arc<AppState>> for UserContext {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        authenticate(&parts.headers, &state.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::issue_token;
    use axum::http::header::COOKIE;

    const SECRET: &str = "test-signing-secret";

    fn test_config() -> Config {
        Config {
            host: "127.0.0.1".to_string(),
            port: 5000,
            database_url: "mongodb://localhost:27017".to_string(),
            database_name: "serviceDb".to_string(),
            jwt_secret: SECRET.to_string(),
            production: false,
            cors_allowed_origins: Vec::new(),
            token_ttl_hours: None,
        }
    }

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, value.parse().unwrap());
        headers
    }

    #[test]
    fn test_missing_cookie_is_unauthorized() {
        let result = authenticate(&HeaderMap::new(), &test_config());
        let rejection = result.err().unwrap();
        assert_eq!(rejection.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_valid_token_attaches_email() {
        let token = issue_token("a@x.com", SECRET, None).unwrap();
        let headers = headers_with_cookie(&format!("token={}", token));
        let user = authenticate(&headers, &test_config()).unwrap();
        assert_eq!(user.email, "a@x.com");
    }

    #[test]
    fn test_invalid_token_is_unauthorized() {
        let headers = headers_with_cookie("token=tampered.token.value");
        let rejection = authenticate(&headers, &test_config()).err().unwrap();
        assert_eq!(rejection.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_token_signed_with_other_secret_is_unauthorized() {
        let token = issue_token("a@x.com", "other-secret", None).unwrap();
        let headers = headers_with_cookie(&format!("token={}", token));
        assert!(authenticate(&headers, &test_config()).is_err());
    }

    #[test]
    fn test_owner_mismatch_is_unauthorized() {
        let user = UserContext {
            email: "a@x.com".to_string(),
        };
        assert!(require_owner(&user, "a@x.com").is_ok());

        let rejection = require_owner(&user, "b@x.com").err().unwrap();
        assert_eq!(rejection.status(), StatusCode::UNAUTHORIZED);
    }
}
