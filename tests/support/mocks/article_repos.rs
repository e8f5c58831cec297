// tests/support/mocks/article_repos.rs
use async_trait::async_trait;
use folio_core::domain::article::{
    Article, ArticleId, ArticleReadRepository, ArticleSlug, ArticleUpdate, ArticleWriteRepository,
    NewArticle,
};
use folio_core::domain::errors::{DomainError, DomainResult};
use std::sync::Mutex;

/// Behaves like the SQLite store: unique slugs, compare-and-swap on
/// `updated_at`, newest-first listing with later inserts winning ties.
#[derive(Debug, Default)]
pub struct InMemoryArticleStore {
    // insertion order stands in for rowid
    rows: Mutex<Vec<Article>>,
}

impl InMemoryArticleStore {
    pub fn with_articles(articles: Vec<Article>) -> Self {
        Self {
            rows: Mutex::new(articles),
        }
    }

    pub fn snapshot(&self) -> Vec<Article> {
        self.rows.lock().unwrap().clone()
    }
}

fn slug_taken(rows: &[Article], slug: &ArticleSlug, except: Option<&ArticleId>) -> bool {
    rows.iter()
        .any(|a| &a.slug == slug && except.is_none_or(|id| &a.id != id))
}

#[async_trait]
impl ArticleWriteRepository for InMemoryArticleStore {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        let mut rows = self.rows.lock().unwrap();
        if slug_taken(&rows, &article.slug, None) {
            return Err(DomainError::Conflict(format!(
                "slug '{}' is already in use",
                article.slug
            )));
        }
        let created = article.into_article(ArticleId::generate());
        rows.push(created.clone());
        Ok(created)
    }

    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(slug) = &update.slug {
            if slug_taken(&rows, slug, Some(&update.id)) {
                return Err(DomainError::Conflict(format!(
                    "slug '{slug}' is already in use"
                )));
            }
        }
        let article = rows
            .iter_mut()
            .find(|a| a.id == update.id)
            .ok_or_else(|| DomainError::NotFound(format!("article {} not found", update.id)))?;
        if let Some(expected) = update.expected_updated_at {
            if expected != article.updated_at {
                return Err(DomainError::Conflict(
                    "article was modified by someone else".into(),
                ));
            }
        }
        article.apply(&update);
        Ok(article.clone())
    }

    async fn delete(&self, id: &ArticleId) -> DomainResult<()> {
        self.rows.lock().unwrap().retain(|a| &a.id != id);
        Ok(())
    }
}

#[async_trait]
impl ArticleReadRepository for InMemoryArticleStore {
    async fn find_by_id(&self, id: &ArticleId) -> DomainResult<Option<Article>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|a| &a.id == id)
            .cloned())
    }

    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Option<Article>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|a| &a.slug == slug)
            .cloned())
    }

    async fn list(&self, published_only: bool) -> DomainResult<Vec<Article>> {
        let mut listed: Vec<Article> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|a| !published_only || a.published)
            .cloned()
            .collect();
        // stable sort keeps the reversed insertion order among equal timestamps
        listed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(listed)
    }
}
