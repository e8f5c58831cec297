use super::UserCommandService;
use crate::application::{
    dto::{AuthenticatedUser, SessionEvent},
    error::ApplicationResult,
};
use tracing::info;

impl UserCommandService {
    /// Revokes the caller's session; its token is refused from then on.
    pub async fn logout(&self, actor: &AuthenticatedUser) -> ApplicationResult<()> {
        if let Some(session_id) = &actor.session_id {
            self.session_store
                .revoke(session_id, actor.expires_at)
                .await?;
        }
        info!(user_id = actor.id.0, "admin signed out");
        self.publish(SessionEvent::SignedOut {
            user_id: actor.id.0,
        });
        Ok(())
    }
}
