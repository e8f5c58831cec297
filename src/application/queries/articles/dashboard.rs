use super::ArticleQueryService;
use crate::application::{
    dto::{AuthenticatedUser, DashboardDto},
    error::ApplicationResult,
};

impl ArticleQueryService {
    pub async fn dashboard_summary(
        &self,
        _actor: &AuthenticatedUser,
    ) -> ApplicationResult<DashboardDto> {
        let articles = self.read_repo.list(false).await?;
        Ok(DashboardDto::from_articles(
            articles.into_iter().map(Into::into).collect(),
        ))
    }
}
