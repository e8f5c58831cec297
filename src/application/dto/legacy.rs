use crate::domain::article::StoredTimestamp;
use serde::Deserialize;

/// One article as exported from the previous document store. Field names
/// follow the export (camelCase); `readTime` is ignored and recomputed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyArticleDocument {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub read_time: Option<String>,
    pub created_at: StoredTimestamp,
    #[serde(default)]
    pub updated_at: Option<StoredTimestamp>,
}
