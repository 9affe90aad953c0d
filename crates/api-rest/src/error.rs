//! Mapping of failures onto HTTP responses.
//!
//! Every error body is `{"detail": "<message>"}`. Storage failures are logged and reported
//! with a generic message.

use api_shared::ErrorRes;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pms_core::PatientError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Patient(#[from] PatientError),
    #[error("{}", .0.body_text())]
    Json(#[from] JsonRejection),
    #[error("{}", .0.body_text())]
    Query(#[from] QueryRejection),
    #[error("field required: {0}")]
    MissingParam(&'static str),
}

impl ApiError {
    fn status_and_detail(&self) -> (StatusCode, String) {
        match self {
            ApiError::Patient(err) => match err {
                PatientError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
                // Duplicate ids report 404, not 409.
                PatientError::NotFound(_) | PatientError::AlreadyExists(_) => {
                    (StatusCode::NOT_FOUND, err.to_string())
                }
                _ if err.is_storage() => {
                    tracing::error!("patient store error: {:?}", err);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal Server Error".to_string(),
                    )
                }
                // Sort field, sort order and other malformed input.
                _ => (StatusCode::BAD_REQUEST, err.to_string()),
            },
            ApiError::Json(_) | ApiError::Query(_) | ApiError::MissingParam(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, self.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = self.status_and_detail();
        (status, Json(ErrorRes { detail })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use pms_core::ValidationError;

    async fn detail_of(response: Response) -> String {
        let body = to_bytes(response.into_body(), 4096).await.unwrap();
        let err: ErrorRes = serde_json::from_slice(&body).unwrap();
        err.detail
    }

    #[tokio::test]
    async fn not_found_maps_to_404() {
        let response = ApiError::from(PatientError::NotFound("P9".into())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(detail_of(response).await, "Patient not found");
    }

    #[tokio::test]
    async fn duplicate_maps_to_404() {
        let response = ApiError::from(PatientError::AlreadyExists("P1".into())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(detail_of(response).await, "Patient already exists");
    }

    #[tokio::test]
    async fn validation_maps_to_422() {
        let err = PatientError::from(ValidationError::single("age", "must be greater than 0"));
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(detail_of(response).await, "age: must be greater than 0");
    }

    #[tokio::test]
    async fn storage_error_hides_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "secret path");
        let response = ApiError::from(PatientError::FileRead(io)).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(detail_of(response).await, "Internal Server Error");
    }

    #[tokio::test]
    async fn sort_errors_map_to_400() {
        let response = ApiError::from(PatientError::InvalidSortOrder("up".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            detail_of(response).await,
            "Invalid order, select between asc and desc"
        );
    }

    #[tokio::test]
    async fn invalid_input_is_a_client_error() {
        let err = PatientError::InvalidInput("bad save mode".into());
        assert!(!err.is_storage());
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(detail_of(response).await, "invalid input: bad save mode");
    }

    #[tokio::test]
    async fn malformed_record_is_a_storage_error() {
        let response = ApiError::from(PatientError::MalformedRecord("P1".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(detail_of(response).await, "Internal Server Error");
    }

    #[tokio::test]
    async fn missing_param_maps_to_422() {
        let response = ApiError::MissingParam("sort_by").into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(detail_of(response).await, "field required: sort_by");
    }
}
