// src/application/commands/articles/update.rs
use super::ArticleCommandService;
use crate::{
    application::{
        dto::{ArticleDto, AuthenticatedUser},
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::{
        Article, ArticleContent, ArticleId, ArticleTitle, ArticleUpdate, Category, CoverImage,
        value_objects::normalize_author,
    },
};
use chrono::{DateTime, SubsecRound, Utc};
use tracing::info;

/// Partial update; `None` leaves a field untouched. An empty `cover_image` clears it
/// and an empty `slug` re-derives one from the title.
#[derive(Debug, Clone, Default)]
pub struct UpdateArticleCommand {
    pub id: String,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub cover_image: Option<String>,
    pub author: Option<String>,
    pub published: Option<bool>,
    pub featured: Option<bool>,
    pub expected_updated_at: Option<DateTime<Utc>>,
}

impl ArticleCommandService {
    pub async fn update_article(
        &self,
        actor: &AuthenticatedUser,
        mut command: UpdateArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        // Stored timestamps carry microseconds; finer client precision must still match.
        command.expected_updated_at = command
            .expected_updated_at
            .map(|expected| expected.trunc_subsecs(6));
        let id = ArticleId::new(command.id.clone())?;
        let current = self
            .read_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        if let Some(expected) = command.expected_updated_at {
            if expected != current.updated_at {
                return Err(ApplicationError::conflict(
                    "article was modified by someone else",
                ));
            }
        }

        let update = self.build_update(&current, command).await?;
        let updated = self.write_repo.update(update).await?;
        info!(
            article_id = %updated.id,
            published = updated.published,
            user_id = actor.id.0,
            "article updated"
        );
        Ok(updated.into())
    }

    async fn build_update(
        &self,
        current: &Article,
        command: UpdateArticleCommand,
    ) -> ApplicationResult<ArticleUpdate> {
        let UpdateArticleCommand {
            id: _,
            title,
            slug,
            excerpt,
            content,
            category,
            cover_image,
            author,
            published,
            featured,
            expected_updated_at,
        } = command;

        let mut update =
            ArticleUpdate::new(current.id.clone(), self.next_updated_at(current.updated_at));
        if let Some(expected) = expected_updated_at {
            update = update.expecting(expected);
        }

        let title = title.map(ArticleTitle::new).transpose()?;
        if let Some(requested) = slug {
            let basis = title.as_ref().unwrap_or(&current.title);
            let slug = self
                .resolve_slug(basis, Some(requested), Some(&current.id))
                .await?;
            if slug != current.slug {
                update = update.with_slug(slug);
            }
        }
        if let Some(title) = title {
            update = update.with_title(title);
        }
        if let Some(excerpt) = excerpt {
            update = update.with_excerpt(excerpt);
        }
        if let Some(content) = content {
            update = update.with_content(ArticleContent::new(content));
        }
        if let Some(category) = category {
            update = update.with_category(category.parse::<Category>()?);
        }
        if let Some(cover_image) = cover_image {
            update = update.with_cover_image(CoverImage::parse_optional(Some(cover_image))?);
        }
        if let Some(author) = author {
            update = update.with_author(normalize_author(author));
        }
        if let Some(published) = published {
            update = update.with_published(published);
        }
        if let Some(featured) = featured {
            update = update.with_featured(featured);
        }

        Ok(update)
    }
}
