//! Configuration management for the review server

use anyhow::{Context, Result};

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host (default: 0.0.0.0)
    pub host: String,

    /// Server port (default: 5000)
    pub port: u16,

    /// MongoDB connection string (default: mongodb://localhost:27017)
    pub database_url: String,

    /// Logical database name (default: serviceDb)
    pub database_name: String,

    /// HS256 signing secret for session tokens (required)
    pub jwt_secret: String,

    /// Production deployments serve the front-end cross-site; cookies then
    /// carry SameSite=None and Secure instead of SameSite=Strict.
    pub production: bool,

    /// Origins allowed to send credentialed cross-origin requests
    pub cors_allowed_origins: Vec<String>,

    /// Token lifetime in hours. When unset, issued tokens never expire.
    pub token_ttl_hours: Option<i64>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_database_url() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_database_name() -> String {
    "serviceDb".to_string()
}

fn default_cors_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "https://a11-service-review.netlify.app".to_string(),
        "https://service-review-server-eosin.vercel.app".to_string(),
    ]
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(default_port);
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("MONGODB_URL"))
            .unwrap_or_else(|_| default_database_url());
        let database_name =
            std::env::var("DATABASE_NAME").unwrap_or_else(|_| default_database_name());
        let jwt_secret =
            std::env::var("SECRET_API_KEY").context("SECRET_API_KEY must be set")?;
        let production = std::env::var("APP_ENV")
            .map(|s| s.eq_ignore_ascii_case("production"))
            .unwrap_or(false);
        let cors_allowed_origins = match std::env::var("CORS_ALLOWED_ORIGINS") {
            Ok(raw) => parse_origins(&raw),
            Err(_) => default_cors_allowed_origins(),
        };
        let token_ttl_hours = std::env::var("TOKEN_TTL_HOURS")
            .ok()
            .and_then(|s| s.parse().ok());

        Ok(Self {
            host,
            port,
            database_url,
            database_name,
            jwt_secret,
            production,
            cors_allowed_origins,
            token_ttl_hours,
        })
    }
}

/// Parse a comma-separated origin list, dropping blanks
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins("http://localhost:5173, https://app.example.com"),
            vec![
                "http://localhost:5173".to_string(),
                "https://app.example.com".to_string()
            ]
        );
        assert!(parse_origins("").is_empty());
        assert!(parse_origins(" , ,").is_empty());
    }
}
