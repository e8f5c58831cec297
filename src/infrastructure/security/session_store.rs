use crate::application::{
    ApplicationResult,
    error::ApplicationError,
    ports::{session::SessionStore, time::Clock},
};
use crate::infrastructure::time::SystemClock;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Process-local revocation list keyed by session id. An entry is kept only
/// until the revoked token would have expired on its own.
pub struct InMemorySessionStore {
    revoked: Mutex<HashMap<String, DateTime<Utc>>>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            revoked: Mutex::new(HashMap::new()),
            clock,
        }
    }

    pub fn into_arc(self) -> Arc<dyn SessionStore> {
        Arc::new(self)
    }

    /// Number of revocations still being tracked.
    pub fn tracked(&self) -> ApplicationResult<usize> {
        let now = self.clock.now();
        let mut revoked = self.guard()?;
        prune(&mut revoked, now);
        Ok(revoked.len())
    }

    fn guard(&self) -> ApplicationResult<MutexGuard<'_, HashMap<String, DateTime<Utc>>>> {
        self.revoked
            .lock()
            .map_err(|_| ApplicationError::infrastructure("session store lock poisoned"))
    }
}

fn prune(revoked: &mut HashMap<String, DateTime<Utc>>, now: DateTime<Utc>) {
    revoked.retain(|_, expires_at| *expires_at > now);
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn is_revoked(&self, session_id: &str) -> ApplicationResult<bool> {
        let now = self.clock.now();
        let mut revoked = self.guard()?;
        prune(&mut revoked, now);
        Ok(revoked.contains_key(session_id))
    }

    async fn revoke(&self, session_id: &str, expires_at: DateTime<Utc>) -> ApplicationResult<()> {
        let now = self.clock.now();
        let mut revoked = self.guard()?;
        prune(&mut revoked, now);
        if expires_at > now {
            revoked.insert(session_id.to_string(), expires_at);
        }
        Ok(())
    }
}
