use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub content: String,
    pub author: String,
    pub published_at: DateTime<Utc>,
    pub is_published: bool,
    pub views_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Output of the `blog` schema; defaults are already applied.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogInput {
    pub title: String,
    pub category: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub content: String,
    pub author: String,
    pub published_at: DateTime<Utc>,
    pub is_published: bool,
    pub views_count: i64,
}

#[derive(Debug, Clone)]
pub struct NewBlog {
    pub title: String,
    pub slug: String,
    pub category: String,
    pub description: Option<String>,
    pub content: String,
    pub author: String,
    pub published_at: DateTime<Utc>,
    pub is_published: bool,
    pub views_count: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPatch {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub is_published: Option<bool>,
    pub views_count: Option<i64>,
}

impl BlogPatch {
    pub(crate) fn apply(self, b: &mut Blog) {
        if let Some(v) = self.title { b.title = v; }
        if let Some(v) = self.slug { b.slug = v; }
        if let Some(v) = self.category { b.category = v; }
        if let Some(v) = self.description { b.description = Some(v); }
        if let Some(v) = self.content { b.content = v; }
        if let Some(v) = self.author { b.author = v; }
        if let Some(v) = self.published_at { b.published_at = v; }
        if let Some(v) = self.is_published { b.is_published = v; }
        if let Some(v) = self.views_count { b.views_count = v; }
    }
}
