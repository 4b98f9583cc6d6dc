//! # HTTP Server Module
//!
//! Router, handlers and response formatting for the quotes API. Errors map
//! to responses through `crate::errors`. Every response carries the same
//! three headers (see `middleware`).

pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;

pub use crate::errors::{ApiError, ApiResult, ErrorResponse};
pub use response::JsonpParams;
pub use server::{HttpServer, ServerError};
