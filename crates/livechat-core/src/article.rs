//! Knowledge base articles.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::{Collection, Record};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub helpful: u64,
    #[serde(default)]
    pub not_helpful: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub published: bool,
}

impl Article {
    /// Creates an unpublished article with zeroed counters.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            category: category.into(),
            tags: Vec::new(),
            views: 0,
            helpful: 0,
            not_helpful: 0,
            created_at: now,
            updated_at: now,
            published: false,
        }
    }

    /// Share of "helpful" votes, or `None` before the first vote.
    pub fn helpful_ratio(&self) -> Option<f64> {
        let total = self.helpful + self.not_helpful;
        if total == 0 {
            return None;
        }
        Some(self.helpful as f64 / total as f64)
    }
}

impl Record for Article {
    const COLLECTION: Collection = Collection::Articles;

    fn key(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.id)
    }
}
