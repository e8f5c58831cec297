// tests/support/builders.rs
use chrono::{DateTime, Duration, Utc};

use folio_core::domain::article::*;
use folio_core::domain::user::{Email, PasswordHash, User, UserId};

use super::mocks::fixed_now;

pub struct ArticleBuilder {
    id: String,
    title: String,
    slug: Option<String>,
    excerpt: String,
    content: String,
    category: Category,
    published: bool,
    featured: bool,
    created_at: DateTime<Utc>,
}

impl ArticleBuilder {
    pub fn new() -> Self {
        Self {
            id: "article-1".into(),
            title: "Test Article".into(),
            slug: None,
            excerpt: "A short summary".into(),
            content: "<p>Test body</p>".into(),
            category: Category::Cloud,
            published: false,
            featured: false,
            created_at: fixed_now(),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = excerpt.into();
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn published(mut self) -> Self {
        self.published = true;
        self
    }

    pub fn featured(mut self) -> Self {
        self.featured = true;
        self
    }

    /// Offsets `created_at` from the shared fixed instant.
    pub fn minutes_after_epoch(mut self, minutes: i64) -> Self {
        self.created_at = fixed_now() + Duration::minutes(minutes);
        self
    }

    pub fn build(self) -> Article {
        let slug = self
            .slug
            .unwrap_or_else(|| services::generate_slug(&self.title));
        let content = ArticleContent::new(self.content);
        Article {
            id: ArticleId::new(self.id).unwrap(),
            title: ArticleTitle::new(self.title).unwrap(),
            slug: ArticleSlug::new(slug).unwrap(),
            excerpt: self.excerpt,
            read_time: content.read_time(),
            content,
            category: self.category,
            cover_image: None,
            author: value_objects::DEFAULT_AUTHOR.into(),
            published: self.published,
            featured: self.featured,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// Active admin whose stored hash matches `StrictPasswordHasher`.
pub fn admin_record(id: i64, email: &str, password: &str) -> User {
    User {
        id: UserId(id),
        email: Email::new(email).unwrap(),
        password_hash: PasswordHash::new(format!("hash::{password}")).unwrap(),
        is_active: true,
        created_at: fixed_now(),
    }
}
