use std::sync::Arc;

use tokio::sync::broadcast;

use crate::application::{
    dto::SessionEvent,
    ports::{
        security::{PasswordHasher, TokenManager},
        session::SessionStore,
        time::Clock,
    },
};
use crate::domain::user::UserRepository;

const SESSION_EVENT_CAPACITY: usize = 32;

pub struct UserCommandService {
    pub(super) user_repo: Arc<dyn UserRepository>,
    pub(super) password_hasher: Arc<dyn PasswordHasher>,
    pub(super) token_manager: Arc<dyn TokenManager>,
    pub(super) session_store: Arc<dyn SessionStore>,
    pub(super) clock: Arc<dyn Clock>,
    events: broadcast::Sender<SessionEvent>,
}

impl UserCommandService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_manager: Arc<dyn TokenManager>,
        session_store: Arc<dyn SessionStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let (events, _) = broadcast::channel(SESSION_EVENT_CAPACITY);
        Self {
            user_repo,
            password_hasher,
            token_manager,
            session_store,
            clock,
            events,
        }
    }

    /// Starts receiving sign-in/sign-out notifications. Dropping the receiver unsubscribes.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub(super) fn publish(&self, event: SessionEvent) {
        // no subscribers is fine
        let _ = self.events.send(event);
    }
}
