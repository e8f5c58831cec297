use super::ArticleQueryService;
use crate::{
    application::{
        dto::{ArticleDto, AuthenticatedUser},
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::{
        ArticleSlug,
        specifications::{ArticleSpecification, PubliclyVisibleSpec},
    },
};

pub struct GetArticleBySlugQuery {
    pub slug: String,
}

impl ArticleQueryService {
    pub async fn get_article_by_slug(
        &self,
        actor: Option<&AuthenticatedUser>,
        query: GetArticleBySlugQuery,
    ) -> ApplicationResult<ArticleDto> {
        // a malformed slug cannot match anything
        let slug = ArticleSlug::new(query.slug)
            .map_err(|_| ApplicationError::not_found("article not found"))?;
        let article = self
            .read_repo
            .find_by_slug(&slug)
            .await?
            .filter(|article| actor.is_some() || PubliclyVisibleSpec.is_satisfied_by(article))
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        Ok(article.into())
    }
}
