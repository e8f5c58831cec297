// src/application/commands/articles/service.rs
use std::sync::Arc;

use chrono::{DateTime, Duration, SubsecRound, Utc};

use crate::{
    application::{error::ApplicationResult, ports::time::Clock},
    domain::article::{
        ArticleId, ArticleReadRepository, ArticleSlug, ArticleTitle, ArticleWriteRepository,
        services::ArticleSlugService,
    },
};

pub struct ArticleCommandService {
    pub(super) write_repo: Arc<dyn ArticleWriteRepository>,
    pub(super) read_repo: Arc<dyn ArticleReadRepository>,
    pub(super) slug_service: Arc<ArticleSlugService>,
    pub(super) clock: Arc<dyn Clock>,
}

impl ArticleCommandService {
    pub fn new(
        write_repo: Arc<dyn ArticleWriteRepository>,
        read_repo: Arc<dyn ArticleReadRepository>,
        slug_service: Arc<ArticleSlugService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            write_repo,
            read_repo,
            slug_service,
            clock,
        }
    }

    /// An explicit, non-blank slug must be free; otherwise one is derived from the title.
    pub(super) async fn resolve_slug(
        &self,
        title: &ArticleTitle,
        requested: Option<String>,
        ignore_id: Option<&ArticleId>,
    ) -> ApplicationResult<ArticleSlug> {
        match requested.map(|raw| raw.trim().to_string()) {
            Some(raw) if !raw.is_empty() => {
                let slug = ArticleSlug::new(raw)?;
                self.slug_service.ensure_available(&slug, ignore_id).await?;
                Ok(slug)
            }
            _ => Ok(self
                .slug_service
                .generate_unique_slug(title, ignore_id)
                .await?),
        }
    }

    /// `updated_at` must move forward even when the clock does not.
    pub(super) fn next_updated_at(&self, previous: DateTime<Utc>) -> DateTime<Utc> {
        let now = self.clock.now().trunc_subsecs(6);
        if now > previous {
            now
        } else {
            previous + Duration::microseconds(1)
        }
    }
}
