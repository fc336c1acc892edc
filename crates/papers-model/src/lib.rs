//! Paper listing model shared by the backend contract and the display layer.

use chrono::{DateTime, FixedOffset, TimeDelta, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One paper as served by the listing backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paper {
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub summary: String,
    /// RFC 3339 timestamp, e.g. `2024-05-01T17:59:59+00:00`.
    #[serde(default)]
    pub published: String,
    #[serde(default)]
    pub link: String,
}

impl Paper {
    pub fn new(title: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            authors: Vec::new(),
            summary: summary.into(),
            published: String::new(),
            link: String::new(),
        }
    }

    pub fn with_authors(mut self, authors: Vec<String>) -> Self {
        self.authors = authors;
        self
    }

    pub fn with_published(mut self, published: impl Into<String>) -> Self {
        self.published = published.into();
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }

    /// Parse the `published` field. Returns `None` for empty or malformed values.
    pub fn published_at(&self) -> Option<DateTime<FixedOffset>> {
        let raw = self.published.trim();
        if raw.is_empty() {
            return None;
        }
        DateTime::parse_from_rfc3339(raw).ok()
    }
}

/// Response of `GET /papers/{category}` when the backend wraps the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub category: String,
    pub papers: Vec<Paper>,
}

/// Response of `GET /papers/categories`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
}

/// Keep papers published at or after `cutoff`.
///
/// Papers whose timestamp cannot be parsed are dropped, matching the
/// backend's seven-day window which only admits dated entries.
pub fn recent_since<Tz: chrono::TimeZone>(papers: &[Paper], cutoff: DateTime<Tz>) -> Vec<Paper> {
    papers
        .iter()
        .filter(|p| match p.published_at() {
            Some(at) => at >= cutoff,
            None => false,
        })
        .cloned()
        .collect()
}

/// Start of a window of `days` days ending at `now`.
///
/// `None` for a negative span or one chrono cannot represent.
pub fn window_start(now: DateTime<Utc>, days: i64) -> Option<DateTime<Utc>> {
    if days < 0 {
        return None;
    }
    now.checked_sub_signed(TimeDelta::try_days(days)?)
}

/// Papers grouped by subject category, in the order categories were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PapersByCategory {
    groups: IndexMap<String, Vec<Paper>>,
}

impl PapersByCategory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append papers to a category, creating it at the end if it is new.
    pub fn insert(&mut self, category: impl Into<String>, papers: Vec<Paper>) {
        self.groups.entry(category.into()).or_default().extend(papers);
    }

    pub fn get(&self, category: &str) -> Option<&[Paper]> {
        self.groups.get(category).map(Vec::as_slice)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Paper])> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of papers across all categories.
    pub fn total(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

impl From<CategoryResponse> for PapersByCategory {
    fn from(resp: CategoryResponse) -> Self {
        let mut grouped = Self::new();
        grouped.insert(resp.category, resp.papers);
        grouped
    }
}
