//! Wire entities
//!
//! These are the shapes written to clients. Every optional column has already
//! been normalised to an empty string by the time one of these exists.

use serde::{Deserialize, Serialize};

/// A quoted person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: i32,
    pub avatar_url: String,
    pub name: String,
    pub company: String,
    pub twitter_username: String,
}

/// A label attached to quotes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub id: i32,
    pub label: String,
}

/// A quote with its author embedded and its tags resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: i32,
    pub post_id: String,
    pub author: Author,
    pub content: String,
    pub permalink: String,
    pub picture_url: String,
    pub tags: Vec<Tag>,
}
