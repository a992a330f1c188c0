use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::error;

use service::errors::ServiceError;

/// Error body returned by every loans endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub api_path: String,
    pub error_code: String,
    pub error_message: String,
    pub error_time: String,
}

#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl JsonApiError {
    pub fn new(status: StatusCode, api_path: &str, error_code: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse {
                api_path: format!("uri={}", api_path),
                error_code: error_code.to_string(),
                error_message: message.into(),
                error_time: Utc::now().to_rfc3339(),
            },
        }
    }

    pub fn bad_request(api_path: &str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, api_path, "BAD_REQUEST", message)
    }

    /// Map a domain outcome onto an HTTP status.
    pub fn from_service(api_path: &str, e: ServiceError) -> Self {
        let status = match &e {
            ServiceError::Validation(_) | ServiceError::AlreadyExists(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Db(_) => {
                error!(api_path, err = %e, "loan storage failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let message = match &e {
            ServiceError::Validation(m) | ServiceError::AlreadyExists(m) | ServiceError::NotFound(m) => m.clone(),
            ServiceError::Db(_) => e.to_string(),
        };
        Self::new(status, api_path, e.code(), message)
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_statuses() {
        let cases = [
            (ServiceError::Validation("bad".into()), StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            (ServiceError::AlreadyExists("dup".into()), StatusCode::BAD_REQUEST, "ALREADY_EXISTS"),
            (ServiceError::NotFound("gone".into()), StatusCode::NOT_FOUND, "NOT_FOUND"),
            (ServiceError::Db("down".into()), StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        ];
        for (err, status, code) in cases {
            let mapped = JsonApiError::from_service("/api/fetch", err);
            assert_eq!(mapped.status, status);
            assert_eq!(mapped.body.error_code, code);
            assert_eq!(mapped.body.api_path, "uri=/api/fetch");
        }
    }
}
