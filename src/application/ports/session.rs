// src/application/ports/session.rs
use crate::application::ApplicationResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Return true if the given session id has been revoked.
    async fn is_revoked(&self, session_id: &str) -> ApplicationResult<bool>;

    /// Revoke the given session id (e.g. on logout). The entry only needs to
    /// outlive `expires_at`, after which the token is rejected anyway.
    async fn revoke(&self, session_id: &str, expires_at: DateTime<Utc>) -> ApplicationResult<()>;
}
