//! PostgreSQL-backed store
//!
//! Each access pattern is a fixed parameterised statement. The driver prepares
//! a statement the first time a pooled connection runs it and reuses the
//! prepared form afterwards, so concurrent requests share precompiled queries
//! without any locking on our side.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Connection;

use super::{AuthorRow, QuoteRow, QuoteStore, StoreResult, TagRow};
use crate::config::ServerConfig;

const RANDOM_QUOTE: &str = r#"
    SELECT id, author_id, post_id, content, permalink, picture_url
    FROM quotes
    ORDER BY RANDOM()
    LIMIT 1;
"#;

const AUTHOR_BY_ID: &str = r#"
    SELECT id, avatar_url, name, company, twitter_username
    FROM authors
    WHERE id = $1;
"#;

const AUTHOR_BY_HANDLE: &str = r#"
    SELECT id, avatar_url, name, company, twitter_username
    FROM authors
    WHERE twitter_username = $1;
"#;

const AUTHORS: &str = r#"
    SELECT id, avatar_url, name, company, twitter_username
    FROM authors;
"#;

const TAG_IDS_BY_QUOTE: &str = r#"
    SELECT tag_id
    FROM quotes_tags
    WHERE quote_id = $1;
"#;

const TAG_BY_ID: &str = r#"
    SELECT id, label
    FROM tags
    WHERE id = $1;
"#;

const TAGS: &str = r#"
    SELECT id, label
    FROM tags;
"#;

const QUOTES_BY_AUTHOR: &str = r#"
    SELECT id, author_id, post_id, content, permalink, picture_url
    FROM quotes
    WHERE author_id = $1;
"#;

/// Store backed by a PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wrap an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open the pool described by `config` and verify it with a ping.
    pub async fn connect(config: &ServerConfig) -> StoreResult<Self> {
        tracing::info!(
            max_connections = config.max_connections,
            "opening connection to database..."
        );
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await
            .inspect_err(|e| tracing::error!(err = ?e, "an error occurred when opening database"))?;

        tracing::info!("pinging database connection...");
        let mut conn = pool.acquire().await.inspect_err(
            |e| tracing::error!(err = ?e, "an error occurred when acquiring a connection"),
        )?;
        conn.ping()
            .await
            .inspect_err(|e| tracing::error!(err = ?e, "database ping failed"))?;
        tracing::info!("database ping succeeded");

        Ok(Self::new(pool))
    }

    /// The underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl QuoteStore for PgStore {
    async fn random_quote(&self) -> StoreResult<Option<QuoteRow>> {
        let row = sqlx::query_as::<_, QuoteRow>(RANDOM_QUOTE)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn author_by_id(&self, id: i32) -> StoreResult<Option<AuthorRow>> {
        let row = sqlx::query_as::<_, AuthorRow>(AUTHOR_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn author_by_handle(&self, handle: &str) -> StoreResult<Option<AuthorRow>> {
        let row = sqlx::query_as::<_, AuthorRow>(AUTHOR_BY_HANDLE)
            .bind(handle)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn authors(&self) -> StoreResult<Vec<AuthorRow>> {
        let rows = sqlx::query_as::<_, AuthorRow>(AUTHORS)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn tag_ids_for_quote(&self, quote_id: i32) -> StoreResult<Vec<i32>> {
        let ids = sqlx::query_scalar::<_, i32>(TAG_IDS_BY_QUOTE)
            .bind(quote_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(ids)
    }

    async fn tag_by_id(&self, id: i32) -> StoreResult<Option<TagRow>> {
        let row = sqlx::query_as::<_, TagRow>(TAG_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn tags(&self) -> StoreResult<Vec<TagRow>> {
        let rows = sqlx::query_as::<_, TagRow>(TAGS)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn quotes_by_author(&self, author_id: i32) -> StoreResult<Vec<QuoteRow>> {
        let rows = sqlx::query_as::<_, QuoteRow>(QUOTES_BY_AUTHOR)
            .bind(author_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}
