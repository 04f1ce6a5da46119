use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::any::Any;
use tracing::{error, warn};

use crate::upstream::{FlagScope, UpstreamError};

/// Every failure the API reports. Rendered as `{"error": "..."}`.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("Missing required search param: org")]
    MissingOrg,

    #[error("{0}")]
    InvalidQuery(String),

    #[error("{scope}: {error}")]
    Upstream { scope: String, error: UpstreamError },

    #[error("{0}")]
    Configuration(UpstreamError),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Attribute a failed fetch to its scope. Missing credentials are our
    /// problem, not the upstream's, so they stay unprefixed.
    pub fn fetch(scope: FlagScope<'_>, error: UpstreamError) -> Self {
        if error.is_configuration() {
            ApiError::Configuration(error)
        } else {
            ApiError::Upstream {
                scope: scope.to_string(),
                error,
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingOrg | ApiError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            ApiError::Configuration(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            error!(%status, error = %self, "request failed");
        } else {
            warn!(%status, error = %self, "request rejected");
        }

        let body = Json(ErrorBody {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

/// Turns a handler panic into the same JSON error shape as every other
/// failure.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unexpected error".to_string()
    };

    ApiError::Internal(message).into_response()
}
