//! In-process store
//!
//! Holds rows in plain vectors. Used by the test suites and for running the
//! API without a database. `failing()` turns every call into a
//! `StoreError::Unavailable`, which exercises the internal-error path.

use async_trait::async_trait;
use rand::seq::SliceRandom;

use super::{AuthorRow, QuoteRow, QuoteStore, StoreError, StoreResult, TagRow};

/// Store whose tables live in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    authors: Vec<AuthorRow>,
    tags: Vec<TagRow>,
    quotes: Vec<QuoteRow>,
    /// (quote_id, tag_id)
    quote_tags: Vec<(i32, i32)>,
    failing: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that refuses every operation
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Default::default()
        }
    }

    pub fn with_author(mut self, author: AuthorRow) -> Self {
        self.authors.push(author);
        self
    }

    pub fn with_tag(mut self, id: i32, label: impl Into<String>) -> Self {
        self.tags.push(TagRow {
            id,
            label: label.into(),
        });
        self
    }

    /// Add a quote and associate it with `tag_ids`. Tag ids are not checked
    /// against the tag table, so dangling associations can be modelled.
    pub fn with_quote(mut self, quote: QuoteRow, tag_ids: &[i32]) -> Self {
        for tag_id in tag_ids {
            self.quote_tags.push((quote.id, *tag_id));
        }
        self.quotes.push(quote);
        self
    }

    fn check(&self) -> StoreResult<()> {
        if self.failing {
            return Err(StoreError::Unavailable("memory store is failing".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl QuoteStore for MemoryStore {
    async fn random_quote(&self) -> StoreResult<Option<QuoteRow>> {
        self.check()?;
        Ok(self.quotes.choose(&mut rand::thread_rng()).cloned())
    }

    async fn author_by_id(&self, id: i32) -> StoreResult<Option<AuthorRow>> {
        self.check()?;
        Ok(self.authors.iter().find(|a| a.id == id).cloned())
    }

    async fn author_by_handle(&self, handle: &str) -> StoreResult<Option<AuthorRow>> {
        self.check()?;
        Ok(self
            .authors
            .iter()
            .find(|a| a.twitter_username.as_deref() == Some(handle))
            .cloned())
    }

    async fn authors(&self) -> StoreResult<Vec<AuthorRow>> {
        self.check()?;
        Ok(self.authors.clone())
    }

    async fn tag_ids_for_quote(&self, quote_id: i32) -> StoreResult<Vec<i32>> {
        self.check()?;
        Ok(self
            .quote_tags
            .iter()
            .filter(|(q, _)| *q == quote_id)
            .map(|(_, t)| *t)
            .collect())
    }

    async fn tag_by_id(&self, id: i32) -> StoreResult<Option<TagRow>> {
        self.check()?;
        Ok(self.tags.iter().find(|t| t.id == id).cloned())
    }

    async fn tags(&self) -> StoreResult<Vec<TagRow>> {
        self.check()?;
        Ok(self.tags.clone())
    }

    async fn quotes_by_author(&self, author_id: i32) -> StoreResult<Vec<QuoteRow>> {
        self.check()?;
        Ok(self
            .quotes
            .iter()
            .filter(|q| q.author_id == author_id)
            .cloned()
            .collect())
    }
}
