//! # API REST
//!
//! REST API implementation for PMS.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, status codes)
//!
//! Uses `api-shared` for wire types and `pms-core` for every patient operation.

#![warn(rust_2018_idioms)]

mod error;

pub use error::ApiError;

use api_shared::{
    CreatePatientReq, ErrorRes, HealthRes, HealthService, MessageRes, PatientRes,
    StoredPatientRes,
};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use pms_core::{PatientService, PatientView};
use serde::Deserialize;
use serde_json::{Map, Value};
use tower_http::cors::CorsLayer;
use utoipa::{IntoParams, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

/// Application state for the REST API server
///
/// Holds the PatientService; it carries configuration only, so every request still reads the
/// data file afresh.
#[derive(Clone)]
pub struct AppState {
    pub patient_service: PatientService,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        home,
        about,
        health,
        view,
        view_patient,
        sort_patients,
        create_patient,
    ),
    components(schemas(
        HealthRes,
        MessageRes,
        ErrorRes,
        CreatePatientReq,
        StoredPatientRes,
        PatientRes,
    ))
)]
pub struct ApiDoc;

/// Query string of `GET /sort`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SortParams {
    /// Sort on the basis of height, weight or bmi
    pub sort_by: Option<String>,
    /// Sort in asc or desc order (default asc)
    pub order: Option<String>,
}

/// Builds the application router with all routes, Swagger UI and CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/about", get(about))
        .route("/health", get(health))
        .route("/view", get(view))
        .route("/patient/:patient_id", get(view_patient))
        .route("/sort", get(sort_patients))
        .route("/create", post(create_patient))
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Welcome message", body = MessageRes)
    )
)]
#[axum::debug_handler]
async fn home() -> Json<MessageRes> {
    Json(MessageRes::new("Patient Management System API"))
}

#[utoipa::path(
    get,
    path = "/about",
    responses(
        (status = 200, description = "Service description", body = MessageRes)
    )
)]
#[axum::debug_handler]
async fn about() -> Json<MessageRes> {
    Json(MessageRes::new(
        "A fully functional API to manage your patient records",
    ))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Liveness only; does not read the patient data file.
#[axum::debug_handler]
async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/view",
    responses(
        (status = 200, description = "Every stored record keyed by patient id", body = std::collections::HashMap<String, StoredPatientRes>),
        (status = 500, description = "Patient data file unreadable", body = ErrorRes)
    )
)]
/// Returns the stored mapping exactly as held in the data file.
///
/// No derived fields are added here; use `/patient/{patient_id}` or `/sort` for those.
#[axum::debug_handler]
async fn view(State(state): State<AppState>) -> Result<Json<Map<String, Value>>, ApiError> {
    let records = state.patient_service.view_all()?;
    Ok(Json(records.into_map()))
}

#[utoipa::path(
    get,
    path = "/patient/{patient_id}",
    params(
        ("patient_id" = String, Path, description = "ID of the patient in the DB", example = "P001")
    ),
    responses(
        (status = 200, description = "Patient record with derived bmi and verdict", body = PatientRes),
        (status = 404, description = "Patient not found", body = ErrorRes),
        (status = 500, description = "Patient data file unreadable", body = ErrorRes)
    )
)]
/// Fetch one patient
///
/// # Errors
/// Returns `404 Not Found` with detail `Patient not found` if the id is absent.
#[axum::debug_handler]
async fn view_patient(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<Json<PatientView>, ApiError> {
    match state.patient_service.get_patient(&patient_id) {
        Ok(view) => Ok(Json(view)),
        Err(e) => {
            tracing::debug!("view patient {} failed: {}", patient_id, e);
            Err(e.into())
        }
    }
}

#[utoipa::path(
    get,
    path = "/sort",
    params(SortParams),
    responses(
        (status = 200, description = "All patients ordered by the chosen field", body = [PatientRes]),
        (status = 400, description = "Invalid sort field or order", body = ErrorRes),
        (status = 422, description = "sort_by missing", body = ErrorRes),
        (status = 500, description = "Patient data file unreadable", body = ErrorRes)
    )
)]
/// Sort all patients by height, weight or bmi
///
/// # Errors
/// - `422` if `sort_by` is missing,
/// - `400` if `sort_by` or `order` is not one of the accepted values.
#[axum::debug_handler]
async fn sort_patients(
    State(state): State<AppState>,
    params: Result<Query<SortParams>, QueryRejection>,
) -> Result<Json<Vec<PatientView>>, ApiError> {
    let Query(params) = params?;
    let sort_by = params.sort_by.ok_or(ApiError::MissingParam("sort_by"))?;

    let views = state
        .patient_service
        .sort_patients(&sort_by, params.order.as_deref())?;
    Ok(Json(views))
}

#[utoipa::path(
    post,
    path = "/create",
    request_body = CreatePatientReq,
    responses(
        (status = 200, description = "Patient created, body is the string \"Data Entered\"", body = String),
        (status = 404, description = "Patient already exists", body = ErrorRes),
        (status = 422, description = "Payload failed validation", body = ErrorRes),
        (status = 500, description = "Patient data file unreadable or unwritable", body = ErrorRes)
    )
)]
/// Create a new patient record
///
/// Validates the payload, rejects an id already present, then rewrites the data file with the
/// new record appended. Answers with the bare JSON string `"Data Entered"`.
///
/// # Errors
/// - `422` if the body is not a valid patient,
/// - `404` with detail `Patient already exists` on a duplicate id,
/// - `500` if the data file cannot be read or written.
#[axum::debug_handler]
async fn create_patient(
    State(state): State<AppState>,
    payload: Result<Json<CreatePatientReq>, JsonRejection>,
) -> Result<(StatusCode, Json<&'static str>), ApiError> {
    let Json(req) = payload?;
    state.patient_service.create_patient(req)?;
    Ok((StatusCode::OK, Json("Data Entered")))
}
