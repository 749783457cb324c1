//! Service listing endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use reviewhub_store::json::{
    delete_result_json, document_to_json, documents_to_json, insert_result_json,
    update_result_json,
};
use reviewhub_store::models::{NewService, ServiceFilter, ServicePatch};
use reviewhub_store::ServiceStore;
use serde::Deserialize;
use serde_json::Value;

use crate::auth::guard::{require_owner, UserContext};
use crate::routes::store_error_response;
use crate::state::AppState;

/// Query parameters for the public service listing
#[derive(Debug, Default, Deserialize)]
pub struct ListServicesQuery {
    /// Exact category filter
    pub filter: Option<String>,
    /// Case-insensitive title substring
    pub search: Option<String>,
}

/// POST /addService
pub async fn add_service(
    State(state): State<Arc<AppState>>,
    Json(service): Json<NewService>,
) -> Response {
    let store = ServiceStore::new(state.db.clone());
    match store.insert(&service).await {
        Ok(result) => Json(insert_result_json(result)).into_response(),
        Err(e) => store_error_response(e),
    }
}

/// GET /allService?filter=&search=
pub async fn list_services(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListServicesQuery>,
) -> Response {
    let filter = ServiceFilter {
        search: query.search,
        category: query.filter,
        email: None,
    };
    let store = ServiceStore::new(state.db.clone());
    match store.find(&filter, None).await {
        Ok(docs) => Json(documents_to_json(docs)).into_response(),
        Err(e) => store_error_response(e),
    }
}

/// GET /allService/{email}: services owned by the authenticated caller
pub async fn my_services(
    State(state): State<Arc<AppState>>,
    user: UserContext,
    Path(email): Path<String>,
) -> Response {
    if let Err(rejection) = require_owner(&user, &email) {
        return rejection;
    }

    let filter = ServiceFilter {
        email: Some(email),
        ..Default::default()
    };
    let store = ServiceStore::new(state.db.clone());
    match store.find(&filter, None).await {
        Ok(docs) => Json(documents_to_json(docs)).into_response(),
        Err(e) => store_error_response(e),
    }
}

/// DELETE /allService/{id}
pub async fn delete_service(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    let store = ServiceStore::new(state.db.clone());
    match store.delete_by_id(&id).await {
        Ok(result) => Json(delete_result_json(result)).into_response(),
        Err(e) => store_error_response(e),
    }
}

/// GET /serviceLimit: the first six services for the landing page
pub async fn service_limit(State(state): State<Arc<AppState>>) -> Response {
    let store = ServiceStore::new(state.db.clone());
    match store.find(&ServiceFilter::default(), Some(6)).await {
        Ok(docs) => Json(documents_to_json(docs)).into_response(),
        Err(e) => store_error_response(e),
    }
}

/// GET /serviceDetails/{id}: an absent document renders as JSON null
pub async fn service_details(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    let store = ServiceStore::new(state.db.clone());
    match store.find_by_id(&id).await {
        Ok(Some(doc)) => Json(document_to_json(doc)).into_response(),
        Ok(None) => Json(Value::Null).into_response(),
        Err(e) => store_error_response(e),
    }
}

/// PUT /updateService/{id}: merge allow-listed fields, creating the
/// document if absent
pub async fn update_service(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<ServicePatch>,
) -> Response {
    let store = ServiceStore::new(state.db.clone());
    match store.upsert_by_id(&id, &patch).await {
        Ok(result) => Json(update_result_json(result)).into_response(),
        Err(e) => store_error_response(e),
    }
}
