//! API error type with envelope-shaped JSON responses.
//!
//! Unlike the uniform-500 behavior this API replaces, failures map to
//! distinct statuses: unresolved keys are 404, structural validation is
//! 400, duplicate natural keys are 409, and only store faults are 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::api::types::ApiResponse;
use crate::records::RecordError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{context}: {detail}")]
    NotFound { context: String, detail: String },

    /// Single-message validation failure raised inside the service.
    #[error("{context}: {detail}")]
    Validation { context: String, detail: String },

    /// Field-level request-shape failures raised at the boundary.
    #[error("validation failed")]
    InvalidInput { errors: Vec<String> },

    /// Natural key already taken.
    #[error("{context}: {detail}")]
    Conflict { context: String, detail: String },

    #[error("{context}: {detail}")]
    Internal { context: String, detail: String },
}

impl ApiError {
    pub fn not_found(context: &str, detail: impl Into<String>) -> Self {
        ApiError::NotFound {
            context: context.to_string(),
            detail: detail.into(),
        }
    }

    pub fn conflict(context: &str, detail: impl Into<String>) -> Self {
        ApiError::Conflict {
            context: context.to_string(),
            detail: detail.into(),
        }
    }

    pub fn internal(context: &str, detail: impl Into<String>) -> Self {
        ApiError::Internal {
            context: context.to_string(),
            detail: detail.into(),
        }
    }

    /// Attach a request context to a service error.
    pub fn from_record(context: &str, err: RecordError) -> Self {
        match err {
            RecordError::NotFound(detail) => ApiError::not_found(context, detail),
            RecordError::Validation(detail) => ApiError::Validation {
                context: context.to_string(),
                detail,
            },
            RecordError::Database(e) => ApiError::internal(context, e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::NotFound { context, detail } => (
                StatusCode::NOT_FOUND,
                ApiResponse::failure(&context, detail),
            ),
            ApiError::Validation { context, detail } => (
                StatusCode::BAD_REQUEST,
                ApiResponse::failure(&context, detail),
            ),
            ApiError::InvalidInput { errors } => (
                StatusCode::BAD_REQUEST,
                ApiResponse::validation_failure(errors),
            ),
            ApiError::Conflict { context, detail } => (
                StatusCode::CONFLICT,
                ApiResponse::failure(&context, detail),
            ),
            ApiError::Internal { context, detail } => {
                tracing::error!(context, detail, "internal API error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::failure(&context, detail),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

impl From<crate::db::DatabaseError> for ApiError {
    fn from(err: crate::db::DatabaseError) -> Self {
        ApiError::internal("database error", err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use crate::db::DatabaseError;

    async fn body_json(response: Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), 4096).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn not_found_returns_404_envelope() {
        let err = ApiError::not_found("error fetching record", "medical record not found with id 9");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "error fetching record");
        assert_eq!(json["error"], "medical record not found with id 9");
    }

    #[tokio::test]
    async fn invalid_input_returns_400_with_error_list() {
        let err = ApiError::InvalidInput {
            errors: vec!["pacDni: must be exactly 8 digits".into()],
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["message"], "validation failed");
        assert_eq!(json["errors"][0], "pacDni: must be exactly 8 digits");
    }

    #[tokio::test]
    async fn conflict_returns_409() {
        let err = ApiError::conflict("error registering patient", "DNI taken");
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn internal_returns_500() {
        let err = ApiError::internal("error listing records", "disk on fire");
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn record_errors_map_by_variant() {
        let not_found = ApiError::from_record(
            "ctx",
            RecordError::NotFound("patient not found with DNI 1".into()),
        );
        assert_eq!(not_found.into_response().status(), StatusCode::NOT_FOUND);

        let validation =
            ApiError::from_record("ctx", RecordError::Validation("too short".into()));
        assert_eq!(validation.into_response().status(), StatusCode::BAD_REQUEST);

        let store = ApiError::from_record(
            "ctx",
            RecordError::Database(DatabaseError::Sqlite(
                rusqlite::Error::QueryReturnedNoRows,
            )),
        );
        assert_eq!(
            store.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
