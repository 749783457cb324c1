//! HTTP routing and shared response plumbing

pub mod reviews;
pub mod services;
pub mod session;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use reviewhub_store::StoreError;
use serde_json::json;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.cors_allowed_origins);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/jwt", post(session::issue_jwt))
        .route("/logout", post(session::logout))
        .route("/addService", post(services::add_service))
        .route("/allService", get(services::list_services))
        // One path pattern, two meanings: the parameter is an owner email
        // for GET and a document id for DELETE (the router rejects two
        // parameter names on the same path).
        .route(
            "/allService/{key}",
            get(services::my_services).delete(services::delete_service),
        )
        .route("/serviceLimit", get(services::service_limit))
        .route("/serviceDetails/{id}", get(services::service_details))
        .route("/updateService/{id}", put(services::update_service))
        .route("/reviewUpdate/{id}", put(reviews::update_review))
        .route("/allReview", post(reviews::add_review))
        .route("/allReview/{category}", get(reviews::reviews_by_category))
        .route("/allReviews/{email}", get(reviews::my_reviews))
        .route("/deleteReview/{id}", delete(reviews::delete_review))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Credentialed CORS restricted to the configured origin allow-list.
/// A wildcard origin cannot be combined with credentials.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

async fn root() -> &'static str {
    "Service Review Server"
}

async fn health_check(State(state): State<Arc<AppState>>) -> Response {
    match state.db.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "database": "connected",
                "version": env!("CARGO_PKG_VERSION")
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unhealthy" })),
            )
                .into_response()
        }
    }
}

/// Convert a store failure into the API's JSON error shape. Malformed ids
/// are the caller's fault; everything else is logged and reported as a
/// server error.
pub(crate) fn store_error_response(err: StoreError) -> Response {
    match err {
        StoreError::InvalidId(id) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": format!("invalid document id: {}", id) })),
        )
            .into_response(),
        other => {
            tracing::error!("database operation failed: {}", other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "database error" })),
            )
                .into_response()
        }
    }
}
