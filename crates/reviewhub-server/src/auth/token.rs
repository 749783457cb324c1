//! Session token issuance and verification

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims embedded in every token the server signs.
///
/// `exp` is present only when a token TTL is configured; without one a
/// token stays valid until the signing secret changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

/// Sign a token for the given identity claim.
pub fn issue_token(
    email: &str,
    secret: &str,
    ttl_hours: Option<i64>,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = Claims {
        email: email.to_string(),
        iat: now.timestamp(),
        exp: ttl_hours.map(|hours| (now + Duration::hours(hours)).timestamp()),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verify a token's signature and decode its claims.
///
/// Expiry is validated only when `require_exp` is set; tokens issued
/// without a TTL carry no `exp` claim at all.
pub fn verify_token(
    token: &str,
    secret: &str,
    require_exp: bool,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    if !require_exp {
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
    }
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-signing-secret";

    #[test]
    fn test_round_trip_without_ttl() {
        let token = issue_token("a@x.com", SECRET, None).unwrap();
        let claims = verify_token(&token, SECRET, false).unwrap();
        assert_eq!(claims.email, "a@x.com");
        assert!(claims.exp.is_none());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = issue_token("a@x.com", SECRET, None).unwrap();
        assert!(verify_token(&token, "other-secret", false).is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(verify_token("not.a.token", SECRET, false).is_err());
        assert!(verify_token("", SECRET, false).is_err());
    }

    #[test]
    fn test_ttl_sets_and_validates_expiry() {
        let token = issue_token("a@x.com", SECRET, Some(1)).unwrap();
        let claims = verify_token(&token, SECRET, true).unwrap();
        let exp = claims.exp.unwrap();
        assert!(exp > claims.iat);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let token = issue_token("a@x.com", SECRET, Some(-1)).unwrap();
        assert!(verify_token(&token, SECRET, true).is_err());
    }

    #[test]
    fn test_token_without_exp_fails_when_ttl_configured() {
        let token = issue_token("a@x.com", SECRET, None).unwrap();
        assert!(verify_token(&token, SECRET, true).is_err());
    }
}
