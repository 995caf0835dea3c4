//! # HTTP Errors
//!
//! Every failed request answers `{"error": <message>}` with a fixed public
//! message per status. Details of server-side failures go to the log only.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

use crate::product_actor::ProductError;

/// Errors a request can end in.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// The body is not a JSON object.
    #[error("Invalid request body: {0}")]
    InvalidInput(String),

    /// No product has the requested id.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// No route matches the path.
    #[error("No route for path")]
    RouteNotFound,

    /// The path exists but not with this method.
    #[error("Method not allowed")]
    MethodNotAllowed,

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Store, id allocation or actor failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message clients see.
    pub fn public_message(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "Invalid request body",
            ApiError::NotFound(_) => "Product not found",
            ApiError::RouteNotFound => "Not Found",
            ApiError::MethodNotAllowed => "Method Not Allowed",
            ApiError::Internal(_) => "Internal Server Error",
        }
    }
}

impl From<ProductError> for ApiError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::InvalidBody(msg) => ApiError::InvalidInput(msg),
            ProductError::NotFound(id) => ApiError::NotFound(id),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        } else {
            debug!(error = %self, status = status.as_u16(), "Request rejected");
        }
        let body = Json(ErrorResponse {
            error: self.public_message(),
        });
        (status, body).into_response()
    }
}
