//! # Domain Assembler
//!
//! Turns raw rows into wire entities and resolves relationships:
//!
//! - quote -> author is a foreign-key lookup
//! - quote -> tags goes through the association table: tag ids are collected
//!   first, then every tag is fetched by id
//!
//! Resolution is sequential and stops at the first failure. A quote is either
//! returned fully populated or not at all.

use std::sync::Arc;

use rand::Rng;

use crate::errors::{ApiError, ApiResult, Entity};
use crate::model::{Author, Quote, Tag};
use crate::store::{AuthorRow, QuoteRow, QuoteStore, TagRow};

impl From<AuthorRow> for Author {
    fn from(row: AuthorRow) -> Self {
        Self {
            id: row.id,
            avatar_url: row.avatar_url.unwrap_or_default(),
            name: row.name.unwrap_or_default(),
            company: row.company.unwrap_or_default(),
            twitter_username: row.twitter_username.unwrap_or_default(),
        }
    }
}

impl From<TagRow> for Tag {
    fn from(row: TagRow) -> Self {
        Self {
            id: row.id,
            label: row.label,
        }
    }
}

/// Builds entities on top of a shared store.
#[derive(Clone)]
pub struct Assembler {
    store: Arc<dyn QuoteStore>,
}

impl Assembler {
    pub fn new(store: Arc<dyn QuoteStore>) -> Self {
        Self { store }
    }

    /// One random quote from the whole population.
    pub async fn random_quote(&self) -> ApiResult<Quote> {
        let row = self
            .store
            .random_quote()
            .await
            .map_err(ApiError::storage("random_quote.fetch"))?
            .ok_or_else(|| ApiError::not_found("random_quote.fetch", Entity::Quote))?;

        let author = self
            .store
            .author_by_id(row.author_id)
            .await
            .map_err(ApiError::storage("random_quote.author_by_id"))?
            .ok_or_else(|| ApiError::not_found("random_quote.author_by_id", Entity::Author))?;

        self.quote(row, author.into()).await
    }

    /// Every author, optional columns normalised.
    pub async fn authors(&self) -> ApiResult<Vec<Author>> {
        let rows = self
            .store
            .authors()
            .await
            .map_err(ApiError::storage("authors.fetch"))?;
        Ok(rows.into_iter().map(Author::from).collect())
    }

    /// Every tag.
    pub async fn tags(&self) -> ApiResult<Vec<Tag>> {
        let rows = self
            .store
            .tags()
            .await
            .map_err(ApiError::storage("tags.fetch"))?;
        Ok(rows.into_iter().map(Tag::from).collect())
    }

    pub async fn author_by_handle(&self, handle: &str) -> ApiResult<Author> {
        let row = self
            .store
            .author_by_handle(handle)
            .await
            .map_err(ApiError::storage("author.by_handle"))?
            .ok_or_else(|| ApiError::not_found("author.by_handle", Entity::Author))?;
        Ok(row.into())
    }

    /// All quotes of the author with `handle`; an author without quotes
    /// gives an empty list.
    pub async fn author_with_quotes(&self, handle: &str) -> ApiResult<Vec<Quote>> {
        let author = self.author_by_handle(handle).await?;
        self.quotes_for_author(&author).await
    }

    /// One quote picked at random among the author's quotes.
    pub async fn author_with_random_quote(&self, handle: &str) -> ApiResult<Quote> {
        let author = self.author_by_handle(handle).await?;
        let mut quotes = self.quotes_for_author(&author).await?;
        if quotes.is_empty() {
            return Err(ApiError::not_found(
                "author_random.no_quotes",
                Entity::Quote,
            ));
        }

        let index = rand::thread_rng().gen_range(0..quotes.len());
        Ok(quotes.swap_remove(index))
    }

    /// Resolve every quote written by `author`.
    pub async fn quotes_for_author(&self, author: &Author) -> ApiResult<Vec<Quote>> {
        let rows = self
            .store
            .quotes_by_author(author.id)
            .await
            .map_err(ApiError::storage("author.quotes_by_author"))?;

        let mut quotes = Vec::with_capacity(rows.len());
        for row in rows {
            quotes.push(self.quote(row, author.clone()).await?);
        }
        Ok(quotes)
    }

    /// Attach `author` and the resolved tags to a quote row.
    pub async fn quote(&self, row: QuoteRow, author: Author) -> ApiResult<Quote> {
        let tags = self.tags_for_quote(row.id).await?;

        Ok(Quote {
            id: row.id,
            post_id: row.post_id,
            author,
            content: row.content,
            permalink: row.permalink,
            picture_url: row.picture_url,
            tags,
        })
    }

    async fn tags_for_quote(&self, quote_id: i32) -> ApiResult<Vec<Tag>> {
        let ids = self
            .store
            .tag_ids_for_quote(quote_id)
            .await
            .map_err(ApiError::storage("quote.tag_ids"))?;

        let mut tags = Vec::with_capacity(ids.len());
        for id in ids {
            let row = self
                .store
                .tag_by_id(id)
                .await
                .map_err(ApiError::storage("quote.tag_by_id"))?
                .ok_or_else(|| ApiError::not_found("quote.tag_by_id", Entity::Tag))?;
            tags.push(row.into());
        }
        Ok(tags)
    }
}
