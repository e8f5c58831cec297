// src/application/services/mod.rs
use std::sync::Arc;

use tokio::sync::broadcast;

use crate::{
    application::{
        ApplicationResult,
        commands::{
            articles::ArticleCommandService, media::MediaCommandService, users::UserCommandService,
        },
        dto::{AuthenticatedUser, SessionEvent},
        editor::EditorSession,
        error::ApplicationError,
        ports::{
            security::{PasswordHasher, TokenManager},
            session::SessionStore,
            storage::ObjectStore,
            time::Clock,
            util::SlugGenerator,
        },
        queries::{articles::ArticleQueryService, users::UserQueryService},
    },
    domain::{
        article::{ArticleReadRepository, ArticleWriteRepository, services::ArticleSlugService},
        user::UserRepository,
    },
};

pub struct ApplicationServices {
    pub user_commands: Arc<UserCommandService>,
    pub user_queries: Arc<UserQueryService>,
    pub article_commands: Arc<ArticleCommandService>,
    pub article_queries: Arc<ArticleQueryService>,
    pub media_commands: Arc<MediaCommandService>,
    token_manager: Arc<dyn TokenManager>,
    session_store: Arc<dyn SessionStore>,
    object_store: Arc<dyn ObjectStore>,
}

impl ApplicationServices {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        article_write_repo: Arc<dyn ArticleWriteRepository>,
        article_read_repo: Arc<dyn ArticleReadRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_manager: Arc<dyn TokenManager>,
        session_store: Arc<dyn SessionStore>,
        object_store: Arc<dyn ObjectStore>,
        clock: Arc<dyn Clock>,
        slugger: Arc<dyn SlugGenerator>,
        max_upload_bytes: usize,
    ) -> Self {
        let user_commands = Arc::new(UserCommandService::new(
            Arc::clone(&user_repo),
            Arc::clone(&password_hasher),
            Arc::clone(&token_manager),
            Arc::clone(&session_store),
            Arc::clone(&clock),
        ));
        let user_queries = Arc::new(UserQueryService::new(Arc::clone(&user_repo)));

        let slug_service = Arc::new(ArticleSlugService::new(
            Arc::clone(&article_read_repo),
            Arc::clone(&slugger),
        ));

        let article_commands = Arc::new(ArticleCommandService::new(
            Arc::clone(&article_write_repo),
            Arc::clone(&article_read_repo),
            Arc::clone(&slug_service),
            Arc::clone(&clock),
        ));
        let article_queries = Arc::new(ArticleQueryService::new(Arc::clone(&article_read_repo)));

        let media_commands = Arc::new(MediaCommandService::new(
            Arc::clone(&object_store),
            Arc::clone(&clock),
            max_upload_bytes,
        ));

        Self {
            user_commands,
            user_queries,
            article_commands,
            article_queries,
            media_commands,
            token_manager,
            session_store,
            object_store,
        }
    }

    pub fn object_store(&self) -> Arc<dyn ObjectStore> {
        Arc::clone(&self.object_store)
    }

    /// False when no usable token signing key was configured.
    pub fn auth_enabled(&self) -> bool {
        self.token_manager.is_enabled()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.user_commands.subscribe()
    }

    pub fn new_editor(&self, author: Option<&str>) -> EditorSession {
        EditorSession::new_article(Arc::clone(&self.article_commands), author)
    }

    pub async fn open_editor(&self, id: impl Into<String>) -> ApplicationResult<EditorSession> {
        EditorSession::open(
            Arc::clone(&self.article_commands),
            &self.article_queries,
            id,
        )
        .await
    }

    /// Verifies a bearer token and rejects sessions revoked by logout.
    pub async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        let user = self.token_manager.authenticate(token).await?;

        if let Some(session_id) = &user.session_id {
            if self.session_store.is_revoked(session_id).await? {
                return Err(ApplicationError::unauthorized("session revoked"));
            }
        }

        Ok(user)
    }
}
