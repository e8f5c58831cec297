use crate::domain::article::Article;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ArticleDto {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    pub author: String,
    pub published: bool,
    pub featured: bool,
    /// Display form, e.g. `"4 min read"`.
    pub read_time: String,
    #[serde(with = "serde_time")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}

impl From<Article> for ArticleDto {
    fn from(article: Article) -> Self {
        Self {
            id: article.id.into(),
            title: article.title.into_inner(),
            slug: article.slug.into_inner(),
            excerpt: article.excerpt,
            content: article.content.into_inner(),
            category: article.category.as_str().to_string(),
            cover_image: article.cover_image.map(|cover| cover.into_inner()),
            author: article.author,
            published: article.published,
            featured: article.featured,
            read_time: article.read_time.to_string(),
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArticleListDto {
    pub items: Vec<ArticleDto>,
    pub total: usize,
}

impl ArticleListDto {
    pub fn new(items: Vec<ArticleDto>) -> Self {
        let total = items.len();
        Self { items, total }
    }
}

/// Admin dashboard: every article, newest first, with publish counters.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardDto {
    pub articles: Vec<ArticleDto>,
    pub published_count: usize,
    pub draft_count: usize,
}

impl DashboardDto {
    pub fn from_articles(articles: Vec<ArticleDto>) -> Self {
        let published_count = articles.iter().filter(|a| a.published).count();
        let draft_count = articles.len() - published_count;
        Self {
            articles,
            published_count,
            draft_count,
        }
    }
}
