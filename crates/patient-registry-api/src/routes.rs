//! Patient registry router and handlers.
//!
//! Every handler delegates to [`Registry`] and maps its error taxonomy onto
//! HTTP statuses via [`ApiError`]. Handlers hold no state beyond the shared
//! registry; each request runs its own load-mutate-save cycle.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{Method, StatusCode};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};

use patient_registry_core::{
    Collection, JsonFileStore, PatientDraft, PatientPatch, PatientRecord, Registry,
};

use crate::error::ApiError;

/// Shared state for the axum application.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<Registry<JsonFileStore>>,
}

/// Build the application router.
pub fn app_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_origin(Any);

    Router::new()
        .route("/", get(root))
        .route("/patients", get(list_patients))
        .route("/view/:patient_id", get(view_patient))
        .route("/sort", get(sort_patients))
        .route("/create", post(create_patient))
        .route("/edit/:patient_id", put(update_patient))
        .route("/delete/:patient_id", delete(delete_patient))
        .with_state(state)
        .layer(cors)
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Patient registry API" }))
}

async fn list_patients(State(state): State<AppState>) -> Result<Json<Collection>, ApiError> {
    Ok(Json(state.registry.list()?))
}

async fn view_patient(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<Json<PatientRecord>, ApiError> {
    Ok(Json(state.registry.get(&patient_id)?))
}

// `sort_by` is optional at the extractor level so that its absence maps
// onto the structured error body rather than axum's plain-text rejection.
#[derive(Debug, Deserialize)]
struct SortParams {
    sort_by: Option<String>,
    #[serde(default = "default_order")]
    order: String,
}

fn default_order() -> String {
    "asc".to_string()
}

async fn sort_patients(
    State(state): State<AppState>,
    Query(params): Query<SortParams>,
) -> Result<Json<Vec<PatientRecord>>, ApiError> {
    let sort_by = params
        .sort_by
        .as_deref()
        .ok_or_else(|| ApiError::BadRequest("missing required query parameter 'sort_by'".into()))?;
    Ok(Json(state.registry.sorted(sort_by, &params.order)?))
}

async fn create_patient(
    State(state): State<AppState>,
    Json(draft): Json<PatientDraft>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let patient = state.registry.create(draft)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "patient created", "id": patient.id })),
    ))
}

async fn update_patient(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
    Json(patch): Json<PatientPatch>,
) -> Result<Json<Value>, ApiError> {
    state.registry.update(&patient_id, &patch)?;
    Ok(Json(json!({ "message": "patient updated" })))
}

async fn delete_patient(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.registry.delete(&patient_id)?;
    Ok(Json(json!({ "message": "patient deleted" })))
}
