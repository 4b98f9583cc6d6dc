//! # Errors
//!
//! Every failure a handler can produce, with two projections:
//!
//! - the wire body (`ErrorResponse`): public message and status code only
//! - the operator view (`Diagnostic`): call-site tag and underlying cause,
//!   attached to the response extensions for the access log and never
//!   serialised

use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Public message for every internal failure
pub const INTERNAL_MESSAGE: &str = "OOOOOPPPSSSS! error happen. don't panic! we will be back soon :)";

/// Entities that can be looked up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Quote,
    Author,
    Tag,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Quote => write!(f, "Quote"),
            Entity::Author => write!(f, "Author"),
            Entity::Tag => write!(f, "Tag"),
        }
    }
}

/// API errors
#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Requested entity does not exist
    #[error("{entity} not found")]
    NotFound { tag: &'static str, entity: Entity },

    /// No route matches the path
    #[error("no route matches the request")]
    RouteNotFound,

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Store could not answer
    #[error("storage failure: {source}")]
    Storage {
        tag: &'static str,
        #[source]
        source: StoreError,
    },

    /// Payload could not be encoded
    #[error("serialization failure: {source}")]
    Serialization {
        tag: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    pub fn not_found(tag: &'static str, entity: Entity) -> Self {
        ApiError::NotFound { tag, entity }
    }

    /// Adapter for `map_err` that records the failing call site.
    pub fn storage(tag: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| ApiError::Storage { tag, source }
    }

    pub fn serialization(tag: &'static str) -> impl FnOnce(serde_json::Error) -> Self {
        move |source| ApiError::Serialization { tag, source }
    }

    /// Call-site tag, for logs only
    pub fn tag(&self) -> &'static str {
        match self {
            ApiError::NotFound { tag, .. } => *tag,
            ApiError::RouteNotFound => "router.not_found",
            ApiError::Storage { tag, .. } => *tag,
            ApiError::Serialization { tag, .. } => *tag,
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Serialization { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to clients
    pub fn public_message(&self) -> String {
        match self {
            ApiError::NotFound { entity, .. } => format!("{entity} not found"),
            ApiError::RouteNotFound => "Not Found".to_string(),
            ApiError::Storage { .. } | ApiError::Serialization { .. } => {
                INTERNAL_MESSAGE.to_string()
            }
        }
    }

    /// Operator view of this error
    pub fn diagnostic(&self) -> Diagnostic {
        Diagnostic {
            tag: self.tag(),
            cause: self.to_string(),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            error: err.public_message(),
            code: err.status_code().as_u16(),
        }
    }
}

/// Internal detail of a failed request, carried in response extensions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub tag: &'static str,
    pub cause: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let mut response = match serde_json::to_vec(&ErrorResponse::from(&self)) {
            Ok(body) => (status, body).into_response(),
            Err(e) => {
                tracing::error!(err = ?e, tag = self.tag(), "encoding the error response failed");
                status.into_response()
            }
        };
        response.extensions_mut().insert(self.diagnostic());
        response
    }
}
