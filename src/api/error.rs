use crate::models::response::{ErrorBody, ErrorResponse};
use crate::services::dataset::DatasetError;
use crate::utils::pagination::PaginationError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

/// Every failure a handler can answer with, rendered as the
/// `{ "error": { status, message, support? } }` envelope.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    InvalidParameters(String),
    #[error("{0}")]
    NotFound(String),
    /// Non-2xx answer from the city provider, relayed with its status code.
    #[error("{message}")]
    Upstream { status: StatusCode, message: String },
    #[error("Unauthorized")]
    PermissionDenied,
    #[error("{0}")]
    Internal(String),
    #[error("Something unknown went wrong")]
    Unexpected { support: String },
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidArguments(_) | ApiError::InvalidParameters(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream { status, .. } => *status,
            ApiError::PermissionDenied => StatusCode::FORBIDDEN,
            ApiError::Internal(_) | ApiError::Unexpected { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            ApiError::InvalidArguments(_) => "invalid-arguments",
            ApiError::InvalidParameters(_) => "invalid-parameters",
            ApiError::NotFound(_) | ApiError::Upstream { .. } => "not-found",
            ApiError::PermissionDenied => "permission-denied",
            ApiError::Internal(_) | ApiError::Unexpected { .. } => "internal",
        }
    }

    pub fn body(&self) -> ErrorResponse {
        let support = match self {
            ApiError::Unexpected { support } => Some(support.clone()),
            _ => None,
        };

        ErrorResponse {
            error: ErrorBody {
                status: self.status().to_string(),
                message: self.to_string(),
                support,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.body())).into_response()
    }
}

impl From<DatasetError> for ApiError {
    fn from(e: DatasetError) -> Self {
        error!(error = %e, "Dataset unavailable");
        ApiError::Internal("An error occurred retrieving countries info".to_string())
    }
}

impl From<PaginationError> for ApiError {
    fn from(e: PaginationError) -> Self {
        error!(error = %e, "Pagination failed");
        ApiError::Internal("An error occurred paginating results".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ApiError::InvalidArguments("x".into()), 400, "invalid-arguments"),
            (ApiError::InvalidParameters("x".into()), 400, "invalid-parameters"),
            (ApiError::NotFound("x".into()), 404, "not-found"),
            (
                ApiError::Upstream {
                    status: StatusCode::UNPROCESSABLE_ENTITY,
                    message: "x".into(),
                },
                422,
                "not-found",
            ),
            (ApiError::PermissionDenied, 403, "permission-denied"),
            (ApiError::Internal("x".into()), 500, "internal"),
        ];

        for (err, code, status) in cases {
            assert_eq!(err.status_code().as_u16(), code);
            assert_eq!(err.status(), status);
        }
    }

    #[test]
    fn test_envelope_omits_support_unless_unexpected() {
        let json = serde_json::to_value(ApiError::NotFound("No continent".into()).body()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"error": {"status": "not-found", "message": "No continent"}})
        );

        let json = serde_json::to_value(
            ApiError::Unexpected {
                support: "mail us".into(),
            }
            .body(),
        )
        .unwrap();
        assert_eq!(json["error"]["status"], "internal");
        assert_eq!(json["error"]["message"], "Something unknown went wrong");
        assert_eq!(json["error"]["support"], "mail us");
    }

    #[test]
    fn test_internal_errors_hide_details() {
        let err: ApiError = PaginationError::ArgumentsRequired.into();
        assert_eq!(err.status(), "internal");
        assert!(!err.to_string().contains("arguments"));

        let err: ApiError = DatasetError::CountriesUnavailable.into();
        assert_eq!(err.to_string(), "An error occurred retrieving countries info");
    }
}
