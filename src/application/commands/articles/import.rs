use super::ArticleCommandService;
use crate::{
    application::{dto::LegacyArticleDocument, error::ApplicationResult},
    domain::article::{
        ArticleContent, ArticleSlug, ArticleTitle, Category, CoverImage, NewArticle,
        value_objects::normalize_author,
    },
};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    Imported { id: String, slug: String },
    /// An article with the same slug already exists.
    Skipped { slug: String },
}

impl ArticleCommandService {
    /// Loads one exported document, keeping its original timestamps. Read time
    /// is recomputed from the content. Re-running an import skips slugs that
    /// are already present.
    pub async fn import_article(
        &self,
        document: LegacyArticleDocument,
    ) -> ApplicationResult<ImportOutcome> {
        let title = ArticleTitle::new(document.title)?;
        let requested = document
            .slug
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty());

        let slug = match requested {
            Some(raw) => {
                let slug = ArticleSlug::new(raw)?;
                if self.read_repo.find_by_slug(&slug).await?.is_some() {
                    return Ok(ImportOutcome::Skipped {
                        slug: slug.into_inner(),
                    });
                }
                slug
            }
            None => self.slug_service.generate_unique_slug(&title, None).await?,
        };

        let category = match document.category.as_deref() {
            Some(raw) if !raw.trim().is_empty() => raw.parse::<Category>().unwrap_or_else(|_| {
                warn!(category = raw, slug = %slug, "unknown category, using default");
                Category::default()
            }),
            _ => Category::default(),
        };

        let created_at = document.created_at.normalize()?;
        let updated_at = match document.updated_at {
            Some(ts) => ts.normalize()?.max(created_at),
            None => created_at,
        };
        let content = ArticleContent::new(document.content);

        let new_article = NewArticle {
            title,
            slug,
            excerpt: document.excerpt,
            read_time: content.read_time(),
            content,
            category,
            cover_image: CoverImage::parse_optional(document.cover_image)?,
            author: normalize_author(document.author.unwrap_or_default()),
            published: document.published,
            featured: document.featured,
            created_at,
            updated_at,
        };

        let created = self.write_repo.insert(new_article).await?;
        info!(
            article_id = %created.id,
            legacy_id = document.id.as_deref().unwrap_or("-"),
            "article imported"
        );
        Ok(ImportOutcome::Imported {
            id: created.id.into(),
            slug: created.slug.into_inner(),
        })
    }
}
