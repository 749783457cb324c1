//! Review endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use reviewhub_store::json::{
    delete_result_json, documents_to_json, insert_result_json, update_result_json,
};
use reviewhub_store::models::{NewReview, ReviewPatch};
use reviewhub_store::ReviewStore;

use crate::auth::guard::{require_owner, UserContext};
use crate::routes::store_error_response;
use crate::state::AppState;

/// POST /allReview
pub async fn add_review(
    State(state): State<Arc<AppState>>,
    Json(review): Json<NewReview>,
) -> Response {
    let store = ReviewStore::new(state.db.clone());
    match store.insert(&review).await {
        Ok(result) => Json(insert_result_json(result)).into_response(),
        Err(e) => store_error_response(e),
    }
}

/// GET /allReview/{category}
pub async fn reviews_by_category(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> Response {
    let store = ReviewStore::new(state.db.clone());
    match store.find_by_category(&category).await {
        Ok(docs) => Json(documents_to_json(docs)).into_response(),
        Err(e) => store_error_response(e),
    }
}

/// GET /allReviews/{email}: reviews authored by the authenticated caller
pub async fn my_reviews(
    State(state): State<Arc<AppState>>,
    user: UserContext,
    Path(email): Path<String>,
) -> Response {
    if let Err(rejection) = require_owner(&user, &email) {
        return rejection;
    }

    let store = ReviewStore::new(state.db.clone());
    match store.find_by_email(&email).await {
        Ok(docs) => Json(documents_to_json(docs)).into_response(),
        Err(e) => store_error_response(e),
    }
}

/// PUT /reviewUpdate/{id}: merge allow-listed fields, creating the
/// document if absent
pub async fn update_review(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<ReviewPatch>,
) -> Response {
    let store = ReviewStore::new(state.db.clone());
    match store.upsert_by_id(&id, &patch).await {
        Ok(result) => Json(update_result_json(result)).into_response(),
        Err(e) => store_error_response(e),
    }
}

/// DELETE /deleteReview/{id}
pub async fn delete_review(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    let store = ReviewStore::new(state.db.clone());
    match store.delete_by_id(&id).await {
        Ok(result) => Json(delete_result_json(result)).into_response(),
        Err(e) => store_error_response(e),
    }
}
