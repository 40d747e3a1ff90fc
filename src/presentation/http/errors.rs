//! HTTP error mapping.
//!
//! Every failure leaving a handler is translated here into the wire shape
//! `{"success":false,"message":...}` with the appropriate status code. Store
//! and driver details are logged, never returned to the caller.

use crate::domain::like::errors::DomainError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    /// Visitor already recorded (400, verbatim user-facing message).
    AlreadyLiked,

    /// Request is malformed or carries no resolvable identity (400).
    BadRequest(String),

    /// The like store did not answer (500).
    StoreUnavailable(String),

    /// Unclassified internal failure (500).
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyLiked => write!(f, "Already liked"),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::StoreUnavailable(msg) => write!(f, "Store unavailable: {}", msg),
            Self::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::AlreadyLiked | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::StoreUnavailable(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// User-safe message, free of driver and connection details.
    fn user_message(&self) -> String {
        match self {
            Self::AlreadyLiked => "You have already liked this portfolio".into(),
            Self::BadRequest(msg) => msg.clone(),
            Self::StoreUnavailable(_) => "Like store is unavailable".into(),
            Self::Internal(_) => "Internal server error".into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.user_message();

        match status {
            StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!("error={}", self);
            }
            _ => {
                tracing::warn!("error={}", self);
            }
        }

        (
            status,
            Json(json!({ "success": false, "message": message })),
        )
            .into_response()
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::AlreadyLiked => AppError::AlreadyLiked,
            DomainError::MissingIdentity => {
                AppError::BadRequest("Could not resolve a visitor identity".into())
            }
            DomainError::StoreUnavailable(msg) => AppError::StoreUnavailable(msg),
        }
    }
}
