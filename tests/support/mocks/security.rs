// tests/support/mocks/security.rs
use async_trait::async_trait;
use chrono::Duration;
use folio_core::application::{
    ApplicationResult,
    dto::{AuthTokenDto, AuthenticatedUser, TokenSubject},
    error::ApplicationError,
    ports::security::{PasswordHasher, TokenManager},
};
use folio_core::domain::user::UserId;

use super::time::fixed_now;

pub const TEST_TOKEN: &str = "test-token";
pub const EXPIRED_TOKEN: &str = "expired-token";

/// The admin every `TEST_TOKEN` request runs as.
pub fn admin_user() -> AuthenticatedUser {
    let now = fixed_now();
    AuthenticatedUser {
        id: UserId(1),
        email: "admin@example.com".into(),
        issued_at: now,
        expires_at: now + Duration::hours(1),
        session_id: None,
    }
}

/* -------------------------------- TokenManager -------------------------------- */

/// Accepts `TEST_TOKEN` and tokens it issued itself (`session:<id>`).
#[derive(Clone, Debug, Default)]
pub struct DummyTokenManager;

#[async_trait]
impl TokenManager for DummyTokenManager {
    async fn issue(&self, subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        let now = fixed_now();
        let session_id = subject.session_id.unwrap_or_else(|| "none".into());
        Ok(AuthTokenDto {
            token: format!("session:{session_id}"),
            issued_at: now,
            expires_at: now + Duration::hours(1),
            expires_in: 3600,
            session_id: Some(session_id),
        })
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        match token {
            TEST_TOKEN => Ok(admin_user()),
            EXPIRED_TOKEN => Err(ApplicationError::unauthorized("expired token")),
            other => match other.strip_prefix("session:") {
                Some(session_id) => Ok(AuthenticatedUser {
                    session_id: Some(session_id.to_string()),
                    ..admin_user()
                }),
                None => Err(ApplicationError::unauthorized("invalid token")),
            },
        }
    }
}

/* -------------------------------- PasswordHasher -------------------------------- */

/// Accepts any password.
#[derive(Clone, Debug, Default)]
pub struct DummyPasswordHasher;

#[async_trait]
impl PasswordHasher for DummyPasswordHasher {
    async fn hash(&self, _password: &str) -> ApplicationResult<String> {
        Ok("hash".into())
    }

    async fn verify(&self, _password: &str, _expected_hash: &str) -> ApplicationResult<()> {
        Ok(())
    }
}

/// Deterministic `hash::<password>` scheme for negative-path tests.
#[derive(Clone, Debug, Default)]
pub struct StrictPasswordHasher;

#[async_trait]
impl PasswordHasher for StrictPasswordHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<String> {
        Ok(format!("hash::{password}"))
    }

    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()> {
        if format!("hash::{password}") == expected_hash {
            Ok(())
        } else {
            Err(ApplicationError::unauthorized("invalid credentials"))
        }
    }
}
