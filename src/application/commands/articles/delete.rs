use super::ArticleCommandService;
use crate::{
    application::{dto::AuthenticatedUser, error::ApplicationResult},
    domain::article::ArticleId,
};
use tracing::info;

pub struct DeleteArticleCommand {
    pub id: String,
}

impl ArticleCommandService {
    /// Permanent. An id that no longer exists is not an error.
    pub async fn delete_article(
        &self,
        actor: &AuthenticatedUser,
        command: DeleteArticleCommand,
    ) -> ApplicationResult<()> {
        let id = ArticleId::new(command.id)?;
        self.write_repo.delete(&id).await?;
        info!(article_id = %id, user_id = actor.id.0, "article deleted");
        Ok(())
    }
}
