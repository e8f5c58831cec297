use super::{UserCommandService, password::validate_password};
use crate::{
    application::{dto::UserDto, error::ApplicationResult},
    domain::user::{Email, NewUser, PasswordHash},
};
use tracing::info;

pub struct BootstrapAdminCommand {
    pub email: String,
    pub password: String,
}

impl UserCommandService {
    /// Creates the admin account when no user exists yet. Returns `None` when
    /// the store already has users.
    pub async fn bootstrap_admin(
        &self,
        command: BootstrapAdminCommand,
    ) -> ApplicationResult<Option<UserDto>> {
        if self.user_repo.count().await? > 0 {
            return Ok(None);
        }

        let email = Email::new(command.email)?;
        validate_password(&command.password)?;
        let hashed = self.password_hasher.hash(&command.password).await?;
        let new_user = NewUser::new(email, PasswordHash::new(hashed)?, self.clock.now());
        let user = self.user_repo.insert(new_user).await?;

        info!(user_id = user.id.0, email = %user.email, "admin account provisioned");
        Ok(Some(user.into()))
    }
}
