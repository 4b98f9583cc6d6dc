//! API Routes
//!
//! | Path                         | Response                          |
//! |------------------------------|-----------------------------------|
//! | `/`                          | 302 to the documentation page     |
//! | `/v1/random`                 | one random quote                  |
//! | `/v1/authors`                | every author                      |
//! | `/v1/author/:handle`         | every quote of the author         |
//! | `/v1/author/:handle/random`  | one random quote of the author    |
//! | `/v1/tags`                   | every tag                         |
//!
//! Known paths answer every method the same way. Anything else is a JSON
//! 404, as is a handle that does not decode to UTF-8.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path, State},
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};

use crate::errors::{ApiError, ApiResult, Entity};
use super::response::{respond, JsonpParams};
use crate::assembler::Assembler;

// ==================
// Shared State
// ==================

/// State shared by every handler. Built once, never mutated.
#[derive(Clone)]
pub struct ApiState {
    pub assembler: Assembler,
    pub docs_url: Arc<str>,
}

impl ApiState {
    pub fn new(assembler: Assembler, docs_url: impl Into<Arc<str>>) -> Self {
        Self {
            assembler,
            docs_url: docs_url.into(),
        }
    }
}

// ==================
// API Routes
// ==================

/// Create API routes
pub fn api_routes(state: ApiState) -> Router {
    Router::new()
        .route("/", any(index))
        .route("/v1/random", any(random_quote))
        .route("/v1/authors", any(authors))
        .route("/v1/author/:handle", any(author_quotes))
        .route("/v1/author/:handle/random", any(author_random_quote))
        .route("/v1/tags", any(tags))
        .fallback(not_found)
        .with_state(state)
}

// ==================
// Extractors
// ==================

/// The `:handle` path segment. A segment that fails to decode names no
/// author, so it is reported as one that does not exist.
pub struct AuthorHandle(pub String);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for AuthorHandle {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(handle) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                tracing::debug!(err = %e, "undecodable author handle");
                ApiError::not_found("author.handle_path", Entity::Author)
            })?;
        Ok(Self(handle))
    }
}

// ==================
// Handlers
// ==================

async fn index(State(state): State<ApiState>) -> Response {
    (
        StatusCode::FOUND,
        [(header::LOCATION, state.docs_url.to_string())],
    )
        .into_response()
}

async fn random_quote(
    State(state): State<ApiState>,
    params: JsonpParams,
) -> ApiResult<Response> {
    let quote = state.assembler.random_quote().await?;
    respond(&quote, &params)
}

async fn authors(
    State(state): State<ApiState>,
    params: JsonpParams,
) -> ApiResult<Response> {
    let authors = state.assembler.authors().await?;
    respond(&authors, &params)
}

async fn author_quotes(
    State(state): State<ApiState>,
    AuthorHandle(handle): AuthorHandle,
    params: JsonpParams,
) -> ApiResult<Response> {
    let quotes = state.assembler.author_with_quotes(&handle).await?;
    respond(&quotes, &params)
}

async fn author_random_quote(
    State(state): State<ApiState>,
    AuthorHandle(handle): AuthorHandle,
    params: JsonpParams,
) -> ApiResult<Response> {
    let quote = state.assembler.author_with_random_quote(&handle).await?;
    respond(&quote, &params)
}

async fn tags(
    State(state): State<ApiState>,
    params: JsonpParams,
) -> ApiResult<Response> {
    let tags = state.assembler.tags().await?;
    respond(&tags, &params)
}

async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}
