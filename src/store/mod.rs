//! # Storage Accessor
//!
//! One operation per access pattern, returning raw rows. A missing row is an
//! ordinary outcome (`Ok(None)` or an empty `Vec`); `StoreError` is reserved
//! for connectivity, query execution and row decoding failures.
//!
//! Implementations are shared by every in-flight request and must not need
//! external locking.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage failures
#[derive(Debug, Error)]
pub enum StoreError {
    /// Driver reported an error while connecting, executing or decoding
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Backing store cannot serve requests
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// A row of the `quotes` table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct QuoteRow {
    pub id: i32,
    pub author_id: i32,
    pub post_id: String,
    pub content: String,
    pub permalink: String,
    pub picture_url: String,
}

/// A row of the `authors` table. Every text column is nullable.
#[derive(Debug, Clone, Default, PartialEq, Eq, sqlx::FromRow)]
pub struct AuthorRow {
    pub id: i32,
    pub avatar_url: Option<String>,
    pub name: Option<String>,
    pub company: Option<String>,
    pub twitter_username: Option<String>,
}

/// A row of the `tags` table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct TagRow {
    pub id: i32,
    pub label: String,
}

/// Read-only access to quotes, authors and tags.
#[async_trait]
pub trait QuoteStore: Send + Sync {
    /// One quote chosen uniformly at random, or `None` if there are no quotes.
    async fn random_quote(&self) -> StoreResult<Option<QuoteRow>>;

    async fn author_by_id(&self, id: i32) -> StoreResult<Option<AuthorRow>>;

    /// Exact match on the social-media handle.
    async fn author_by_handle(&self, handle: &str) -> StoreResult<Option<AuthorRow>>;

    async fn authors(&self) -> StoreResult<Vec<AuthorRow>>;

    /// Tag ids from the quote/tag association table.
    async fn tag_ids_for_quote(&self, quote_id: i32) -> StoreResult<Vec<i32>>;

    async fn tag_by_id(&self, id: i32) -> StoreResult<Option<TagRow>>;

    async fn tags(&self) -> StoreResult<Vec<TagRow>>;

    async fn quotes_by_author(&self, author_id: i32) -> StoreResult<Vec<QuoteRow>>;
}
