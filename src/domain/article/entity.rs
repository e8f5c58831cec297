// src/domain/article/entity.rs
use crate::domain::article::value_objects::{
    ArticleContent, ArticleId, ArticleSlug, ArticleTitle, Category, CoverImage, ReadTime,
};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub id: ArticleId,
    pub title: ArticleTitle,
    pub slug: ArticleSlug,
    pub excerpt: String,
    pub content: ArticleContent,
    pub category: Category,
    pub cover_image: Option<CoverImage>,
    pub author: String,
    pub published: bool,
    pub featured: bool,
    pub read_time: ReadTime,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    /// Merge a partial update. `created_at` is never touched.
    pub fn apply(&mut self, update: &ArticleUpdate) {
        if let Some(title) = &update.title {
            self.title = title.clone();
        }
        if let Some(slug) = &update.slug {
            self.slug = slug.clone();
        }
        if let Some(excerpt) = &update.excerpt {
            self.excerpt = excerpt.clone();
        }
        if let Some(content) = &update.content {
            self.content = content.clone();
            self.read_time = content.read_time();
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(cover_image) = &update.cover_image {
            self.cover_image = cover_image.clone();
        }
        if let Some(author) = &update.author {
            self.author = author.clone();
        }
        if let Some(published) = update.published {
            self.published = published;
        }
        if let Some(featured) = update.featured {
            self.featured = featured;
        }
        self.updated_at = update.updated_at;
    }
}

#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: ArticleTitle,
    pub slug: ArticleSlug,
    pub excerpt: String,
    pub content: ArticleContent,
    pub category: Category,
    pub cover_image: Option<CoverImage>,
    pub author: String,
    pub published: bool,
    pub featured: bool,
    pub read_time: ReadTime,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewArticle {
    pub fn into_article(self, id: ArticleId) -> Article {
        Article {
            id,
            title: self.title,
            slug: self.slug,
            excerpt: self.excerpt,
            content: self.content,
            category: self.category,
            cover_image: self.cover_image,
            author: self.author,
            published: self.published,
            featured: self.featured,
            read_time: self.read_time,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Partial update. `expected_updated_at` turns the write into a compare-and-swap.
#[derive(Debug, Clone)]
pub struct ArticleUpdate {
    pub id: ArticleId,
    pub title: Option<ArticleTitle>,
    pub slug: Option<ArticleSlug>,
    pub excerpt: Option<String>,
    pub content: Option<ArticleContent>,
    pub category: Option<Category>,
    pub cover_image: Option<Option<CoverImage>>,
    pub author: Option<String>,
    pub published: Option<bool>,
    pub featured: Option<bool>,
    pub expected_updated_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl ArticleUpdate {
    pub fn new(id: ArticleId, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: None,
            slug: None,
            excerpt: None,
            content: None,
            category: None,
            cover_image: None,
            author: None,
            published: None,
            featured: None,
            expected_updated_at: None,
            updated_at,
        }
    }

    pub fn with_title(mut self, title: ArticleTitle) -> Self {
        self.title = Some(title);
        self
    }

    pub fn with_slug(mut self, slug: ArticleSlug) -> Self {
        self.slug = Some(slug);
        self
    }

    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }

    pub fn with_content(mut self, content: ArticleContent) -> Self {
        self.content = Some(content);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_cover_image(mut self, cover_image: Option<CoverImage>) -> Self {
        self.cover_image = Some(cover_image);
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_published(mut self, published: bool) -> Self {
        self.published = Some(published);
        self
    }

    pub fn with_featured(mut self, featured: bool) -> Self {
        self.featured = Some(featured);
        self
    }

    pub fn expecting(mut self, updated_at: DateTime<Utc>) -> Self {
        self.expected_updated_at = Some(updated_at);
        self
    }

    pub fn read_time(&self) -> Option<ReadTime> {
        self.content.as_ref().map(ArticleContent::read_time)
    }
}
