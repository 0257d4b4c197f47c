use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use thiserror::Error;
use tracing::error;

use adboard_db::StoreError;
use adboard_types::api::{FieldError, error_envelope};

/// Why a request could not be tied to a user. All of these answer 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthFailure {
    #[error("token not found")]
    MissingToken,
    #[error("invalid token")]
    InvalidToken,
    #[error("invalid password")]
    InvalidPassword,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(FieldError),

    #[error("{0}")]
    MalformedBody(String),

    #[error("{0}")]
    Unauthenticated(AuthFailure),

    #[error("access denied")]
    Forbidden,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::MalformedBody(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => Self::NotFound(err.to_string()),
            StoreError::Conflict { .. } => Self::Conflict(err.to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let description = match self {
            Self::Validation(field) => serde_json::to_value(field).unwrap_or(Value::Null),
            Self::Internal(detail) => {
                // Log the actual error, return a generic message
                error!("Request failed: {}", detail);
                Value::from("internal server error")
            }
            other => Value::from(other.to_string()),
        };

        (status, Json(error_envelope(status.as_u16(), description))).into_response()
    }
}
