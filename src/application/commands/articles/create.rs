// src/application/commands/articles/create.rs
use super::ArticleCommandService;
use crate::{
    application::{
        dto::{ArticleDto, AuthenticatedUser},
        error::ApplicationResult,
    },
    domain::article::{
        ArticleContent, ArticleTitle, Category, CoverImage, NewArticle,
        value_objects::normalize_author,
    },
};
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct CreateArticleCommand {
    pub title: String,
    pub slug: Option<String>,
    pub excerpt: String,
    pub content: String,
    pub category: Option<String>,
    pub cover_image: Option<String>,
    pub author: Option<String>,
    pub published: bool,
    pub featured: bool,
}

impl CreateArticleCommand {
    pub fn builder() -> CreateArticleCommandBuilder {
        CreateArticleCommandBuilder::default()
    }
}

#[derive(Default)]
pub struct CreateArticleCommandBuilder {
    title: Option<String>,
    command: CreateArticleCommand,
}

impl CreateArticleCommandBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.command.slug = Some(slug.into());
        self
    }

    pub fn excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.command.excerpt = excerpt.into();
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.command.content = content.into();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.command.category = Some(category.into());
        self
    }

    pub fn cover_image(mut self, cover_image: impl Into<String>) -> Self {
        self.command.cover_image = Some(cover_image.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.command.author = Some(author.into());
        self
    }

    pub fn published(mut self, published: bool) -> Self {
        self.command.published = published;
        self
    }

    pub fn featured(mut self, featured: bool) -> Self {
        self.command.featured = featured;
        self
    }

    pub fn build(self) -> Result<CreateArticleCommand, &'static str> {
        Ok(CreateArticleCommand {
            title: self.title.ok_or("title is required")?,
            ..self.command
        })
    }
}

impl ArticleCommandService {
    pub async fn create_article(
        &self,
        actor: &AuthenticatedUser,
        command: CreateArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        let title = ArticleTitle::new(command.title)?;
        let content = ArticleContent::new(command.content);
        let category = command
            .category
            .as_deref()
            .map(str::parse::<Category>)
            .transpose()?
            .unwrap_or_default();
        let cover_image = CoverImage::parse_optional(command.cover_image)?;
        let slug = self.resolve_slug(&title, command.slug, None).await?;
        let now = self.clock.now();

        let new_article = NewArticle {
            title,
            slug,
            excerpt: command.excerpt,
            read_time: content.read_time(),
            content,
            category,
            cover_image,
            author: normalize_author(command.author.unwrap_or_default()),
            published: command.published,
            featured: command.featured,
            created_at: now,
            updated_at: now,
        };

        let created = self.write_repo.insert(new_article).await?;
        info!(
            article_id = %created.id,
            slug = %created.slug,
            published = created.published,
            user_id = actor.id.0,
            "article created"
        );
        Ok(created.into())
    }
}
