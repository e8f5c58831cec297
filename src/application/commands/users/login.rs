use super::UserCommandService;
use crate::{
    application::{
        dto::{AuthTokenDto, SessionEvent, TokenSubject, UserDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::{Email, User},
};
use tracing::info;
use uuid::Uuid;

pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

pub struct LoginResult {
    pub token: AuthTokenDto,
    pub user: UserDto,
}

impl UserCommandService {
    pub async fn login(&self, command: LoginCommand) -> ApplicationResult<LoginResult> {
        if !self.token_manager.is_enabled() {
            return Err(ApplicationError::unavailable(
                "sign-in is disabled: token signing key is not configured",
            ));
        }

        let email = Email::new(command.email)
            .map_err(|_| ApplicationError::unauthorized("invalid credentials"))?;
        let user = self
            .find_and_authenticate_user(&email, &command.password)
            .await?;

        let session_id = Uuid::new_v4().to_string();
        let subject = TokenSubject {
            user_id: user.id,
            email: user.email.to_string(),
            session_id: Some(session_id),
        };
        let token = self.token_manager.issue(subject).await?;

        info!(user_id = user.id.0, "admin signed in");
        self.publish(SessionEvent::SignedIn {
            user_id: user.id.0,
            email: user.email.to_string(),
        });

        Ok(LoginResult {
            token,
            user: user.into(),
        })
    }

    async fn find_and_authenticate_user(
        &self,
        email: &Email,
        password: &str,
    ) -> ApplicationResult<User> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| ApplicationError::unauthorized("invalid credentials"))?;

        if !user.is_active {
            return Err(ApplicationError::forbidden("account is disabled"));
        }

        self.password_hasher
            .verify(password, user.password_hash.as_str())
            .await?;

        Ok(user)
    }
}
