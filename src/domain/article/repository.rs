use crate::domain::article::entity::{Article, ArticleUpdate, NewArticle};
use crate::domain::article::value_objects::{ArticleId, ArticleSlug};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

#[async_trait]
pub trait ArticleWriteRepository: Send + Sync {
    /// Persists a new article; the store assigns the id.
    async fn insert(&self, article: NewArticle) -> DomainResult<Article>;
    /// `NotFound` for an unknown id, `Conflict` when `expected_updated_at` no longer matches.
    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article>;
    /// Deleting an unknown id succeeds.
    async fn delete(&self, id: &ArticleId) -> DomainResult<()>;
}

#[async_trait]
pub trait ArticleReadRepository: Send + Sync {
    async fn find_by_id(&self, id: &ArticleId) -> DomainResult<Option<Article>>;
    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Option<Article>>;
    /// Newest first. `published_only` must be applied by the store query itself.
    async fn list(&self, published_only: bool) -> DomainResult<Vec<Article>>;
}
