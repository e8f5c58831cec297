//! Admin editor workflow: one `EditorSession` per open editor form.
//!
//! The session owns the form fields, derives the slug from the title until the
//! article exists, and routes saves to create or update.
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{
    application::{
        commands::articles::{ArticleCommandService, CreateArticleCommand, UpdateArticleCommand},
        dto::{ArticleDto, AuthenticatedUser},
        error::{ApplicationError, ApplicationResult},
        queries::articles::{ArticleQueryService, GetArticleByIdQuery},
    },
    domain::article::{Category, services::generate_slug, value_objects::DEFAULT_AUTHOR},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Loading,
    Ready,
    Saving,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    /// Always stored unpublished, whatever the toggle says.
    Draft,
    /// Stored with the current `published` toggle.
    Publish,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditorForm {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub category: Category,
    pub cover_image: String,
    pub author: String,
    pub published: bool,
    pub featured: bool,
}

impl EditorForm {
    fn blank(author: impl Into<String>) -> Self {
        Self {
            title: String::new(),
            slug: String::new(),
            excerpt: String::new(),
            content: String::new(),
            category: Category::default(),
            cover_image: String::new(),
            author: author.into(),
            published: false,
            featured: false,
        }
    }

    fn from_article(article: &ArticleDto) -> ApplicationResult<Self> {
        Ok(Self {
            title: article.title.clone(),
            slug: article.slug.clone(),
            excerpt: article.excerpt.clone(),
            content: article.content.clone(),
            category: article.category.parse()?,
            cover_image: article.cover_image.clone().unwrap_or_default(),
            author: article.author.clone(),
            published: article.published,
            featured: article.featured,
        })
    }
}

pub struct EditorSession {
    commands: Arc<ArticleCommandService>,
    state: EditorState,
    article_id: Option<String>,
    last_saved_at: Option<DateTime<Utc>>,
    // Set once the slug is typed by hand instead of following the title.
    slug_edited: bool,
    form: EditorForm,
}

impl EditorSession {
    pub fn new_article(commands: Arc<ArticleCommandService>, author: Option<&str>) -> Self {
        let author = author
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or(DEFAULT_AUTHOR);
        Self {
            commands,
            state: EditorState::Ready,
            article_id: None,
            last_saved_at: None,
            slug_edited: false,
            form: EditorForm::blank(author),
        }
    }

    /// Loads an existing article into the form.
    pub async fn open(
        commands: Arc<ArticleCommandService>,
        queries: &ArticleQueryService,
        id: impl Into<String>,
    ) -> ApplicationResult<Self> {
        let mut session = Self {
            commands,
            state: EditorState::Loading,
            article_id: None,
            last_saved_at: None,
            slug_edited: false,
            form: EditorForm::blank(DEFAULT_AUTHOR),
        };

        let article = queries
            .get_article_by_id(GetArticleByIdQuery { id: id.into() })
            .await?;
        session.adopt(&article)?;
        session.state = EditorState::Ready;
        Ok(session)
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn article_id(&self) -> Option<&str> {
        self.article_id.as_deref()
    }

    pub fn form(&self) -> &EditorForm {
        &self.form
    }

    /// The slug follows the title only until the article has been saved once.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.form.title = title.into();
        if self.article_id.is_none() {
            self.form.slug = generate_slug(&self.form.title);
        }
    }

    pub fn set_slug(&mut self, slug: impl Into<String>) {
        self.form.slug = slug.into();
        self.slug_edited = true;
    }

    pub fn set_excerpt(&mut self, excerpt: impl Into<String>) {
        self.form.excerpt = excerpt.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.form.content = content.into();
    }

    pub fn set_category(&mut self, category: Category) {
        self.form.category = category;
    }

    pub fn set_cover_image(&mut self, cover_image: impl Into<String>) {
        self.form.cover_image = cover_image.into();
    }

    pub fn set_author(&mut self, author: impl Into<String>) {
        self.form.author = author.into();
    }

    pub fn set_published(&mut self, published: bool) {
        self.form.published = published;
    }

    pub fn set_featured(&mut self, featured: bool) {
        self.form.featured = featured;
    }

    pub async fn save(
        &mut self,
        actor: &AuthenticatedUser,
        mode: SaveMode,
    ) -> ApplicationResult<ArticleDto> {
        match self.state {
            EditorState::Ready => {}
            EditorState::Saving => {
                return Err(ApplicationError::conflict("save already in progress"));
            }
            EditorState::Loading => {
                return Err(ApplicationError::conflict("article is still loading"));
            }
        }
        if self.form.title.trim().is_empty() {
            return Err(ApplicationError::validation(
                "please enter a title for your article",
            ));
        }

        self.state = EditorState::Saving;
        let outcome = self.persist(actor, mode).await;
        self.state = EditorState::Ready;

        let saved = outcome?;
        self.adopt(&saved)?;
        Ok(saved)
    }

    async fn persist(
        &self,
        actor: &AuthenticatedUser,
        mode: SaveMode,
    ) -> ApplicationResult<ArticleDto> {
        let form = &self.form;
        let typed_slug = Some(form.slug.clone()).filter(|slug| !slug.trim().is_empty());
        let published = match mode {
            SaveMode::Draft => false,
            SaveMode::Publish => form.published,
        };

        match &self.article_id {
            None => {
                let command = CreateArticleCommand {
                    title: form.title.clone(),
                    // A title-derived slug is left to the store so it can add a suffix.
                    slug: typed_slug.filter(|_| self.slug_edited),
                    excerpt: form.excerpt.clone(),
                    content: form.content.clone(),
                    category: Some(form.category.as_str().to_string()),
                    cover_image: Some(form.cover_image.clone()),
                    author: Some(form.author.clone()),
                    published,
                    featured: form.featured,
                };
                self.commands.create_article(actor, command).await
            }
            Some(id) => {
                let command = UpdateArticleCommand {
                    id: id.clone(),
                    title: Some(form.title.clone()),
                    slug: Some(typed_slug.unwrap_or_else(|| generate_slug(&form.title))),
                    excerpt: Some(form.excerpt.clone()),
                    content: Some(form.content.clone()),
                    category: Some(form.category.as_str().to_string()),
                    cover_image: Some(form.cover_image.clone()),
                    author: Some(form.author.clone()),
                    published: Some(published),
                    featured: Some(form.featured),
                    expected_updated_at: self.last_saved_at,
                };
                self.commands.update_article(actor, command).await
            }
        }
    }

    /// Takes id, slug and version from the stored article. The `published`
    /// toggle keeps whatever the form had so a draft save does not flip it.
    fn adopt(&mut self, article: &ArticleDto) -> ApplicationResult<()> {
        let published = self.form.published;
        let loading = self.state == EditorState::Loading;
        self.form = EditorForm::from_article(article)?;
        if !loading {
            self.form.published = published;
        }
        self.article_id = Some(article.id.clone());
        self.last_saved_at = Some(article.updated_at);
        Ok(())
    }
}
