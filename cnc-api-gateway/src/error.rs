use std::collections::BTreeMap;

use axum::{http::StatusCode, response::Json};
use cnc_restaurant_service::error::ServiceError;
use tracing::{error, warn};

use crate::models::ApiErrorResponse;

pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    UnknownResource(String),
    #[error("{0}")]
    ResourceDuplication(String),
    #[error("{message}")]
    Validation { message: String, errors: FieldErrors },
    #[error("{message}")]
    TypeMismatch { message: String, errors: FieldErrors },
    #[error("{0}")]
    MalformedPayload(String),
    #[error("Authentication failed")]
    AuthenticationFailed,
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl ApiError {
    fn kind(&self) -> &'static str {
        match self {
            ApiError::UnknownResource(_) => "UnknownResource",
            ApiError::ResourceDuplication(_) => "ResourceDuplication",
            ApiError::Validation { .. } => "Validation",
            ApiError::TypeMismatch { .. } => "TypeMismatch",
            ApiError::MalformedPayload(_) => "MalformedPayload",
            ApiError::AuthenticationFailed => "AuthenticationFailed",
            ApiError::InternalError(_) => "InternalError",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::UnknownResource(_) => StatusCode::NOT_FOUND,
            ApiError::ResourceDuplication(_) => StatusCode::CONFLICT,
            ApiError::Validation { .. }
            | ApiError::TypeMismatch { .. }
            | ApiError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            ApiError::AuthenticationFailed => StatusCode::UNAUTHORIZED,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::UnknownResource(message) => ApiError::UnknownResource(message),
            ServiceError::ResourceDuplication(message) => ApiError::ResourceDuplication(message),
            ServiceError::InvalidCredentials => ApiError::AuthenticationFailed,
            ServiceError::Internal(message) => ApiError::InternalError(message),
            ServiceError::Repository(err) => ApiError::InternalError(err.to_string()),
        }
    }
}

/// `NOT_FOUND` for 404, `BAD_REQUEST` for 400, ...
fn status_name(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("UNKNOWN")
        .to_uppercase()
        .replace([' ', '-'], "_")
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let (message, errors) = match self {
            ApiError::InternalError(ref detail) => {
                error!("Catching {} for {}", self.kind(), detail);
                ("Internal server error".to_string(), None)
            }
            ApiError::Validation { ref errors, .. } | ApiError::TypeMismatch { ref errors, .. } => {
                warn!("Catching {} for {}", self.kind(), self);
                (self.to_string(), Some(errors.clone()).filter(|e| !e.is_empty()))
            }
            _ => {
                warn!("Catching {} for {}", self.kind(), self);
                (self.to_string(), None)
            }
        };

        let body = Json(ApiErrorResponse {
            status: status_name(status),
            message,
            errors,
        });

        (status, body).into_response()
    }
}
