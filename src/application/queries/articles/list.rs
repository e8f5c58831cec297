use super::ArticleQueryService;
use crate::{
    application::{
        dto::{ArticleDto, ArticleListDto, AuthenticatedUser},
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::{
        Category,
        specifications::{ArticleFilter, ArticleSpecification},
    },
};

pub struct ListArticlesQuery {
    pub published_only: bool,
    pub search: Option<String>,
    pub category: Option<String>,
}

impl Default for ListArticlesQuery {
    fn default() -> Self {
        Self {
            published_only: true,
            search: None,
            category: None,
        }
    }
}

impl ArticleQueryService {
    /// Newest first. Drafts are only listed for an authenticated admin.
    pub async fn list_articles(
        &self,
        actor: Option<&AuthenticatedUser>,
        query: ListArticlesQuery,
    ) -> ApplicationResult<ArticleListDto> {
        if !query.published_only && actor.is_none() {
            return Err(ApplicationError::forbidden(
                "authentication required for draft access",
            ));
        }

        let category = query
            .category
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .map(str::parse::<Category>)
            .transpose()?;
        let filter = ArticleFilter::new(query.search.as_deref(), category);

        let records = self.read_repo.list(query.published_only).await?;
        let items: Vec<ArticleDto> = records
            .into_iter()
            .filter(|article| filter.is_empty() || filter.is_satisfied_by(article))
            .map(Into::into)
            .collect();

        Ok(ArticleListDto::new(items))
    }

    /// Categories that have at least one published article, in menu order.
    pub async fn list_categories(&self) -> ApplicationResult<Vec<String>> {
        let published = self.read_repo.list(true).await?;
        Ok(Category::ALL
            .into_iter()
            .filter(|category| published.iter().any(|a| a.category == *category))
            .map(|category| category.as_str().to_string())
            .collect())
    }
}
