// src/domain/article/services/mod.rs
use std::sync::Arc;

use crate::application::ports::util::SlugGenerator;
use crate::domain::article::repository::ArticleReadRepository;
use crate::domain::article::value_objects::{ArticleId, ArticleSlug, ArticleTitle};
use crate::domain::errors::{DomainError, DomainResult};

const FALLBACK_SLUG: &str = "article";

/// Lowercases `title`, collapses every run of characters outside `[a-z0-9]`
/// into a single hyphen and trims hyphens from both ends.
pub fn generate_slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;
    for c in title.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

/// Domain service responsible for producing unique slugs for articles.
pub struct ArticleSlugService {
    read_repo: Arc<dyn ArticleReadRepository>,
    generator: Arc<dyn SlugGenerator>,
}

impl ArticleSlugService {
    pub fn new(
        read_repo: Arc<dyn ArticleReadRepository>,
        generator: Arc<dyn SlugGenerator>,
    ) -> Self {
        Self {
            read_repo,
            generator,
        }
    }

    /// Derives a slug from `title`, appending `-1`, `-2`, ... until no other
    /// article owns it.
    pub async fn generate_unique_slug(
        &self,
        title: &ArticleTitle,
        ignore_id: Option<&ArticleId>,
    ) -> DomainResult<ArticleSlug> {
        let base = self.generator.slugify(title.as_str());
        let base_slug = if base.is_empty() {
            FALLBACK_SLUG.to_string()
        } else {
            base
        };

        let mut candidate = base_slug.clone();
        let mut counter = 1u64;

        loop {
            let slug = ArticleSlug::new(candidate.clone())?;
            match self.read_repo.find_by_slug(&slug).await? {
                Some(existing) if ignore_id.is_some_and(|id| *id == existing.id) => {
                    return Ok(slug);
                }
                Some(_) => {
                    candidate = format!("{base_slug}-{counter}");
                    counter += 1;
                }
                None => return Ok(slug),
            }
        }
    }

    /// Rejects an explicitly chosen slug that another article already owns.
    pub async fn ensure_available(
        &self,
        slug: &ArticleSlug,
        ignore_id: Option<&ArticleId>,
    ) -> DomainResult<()> {
        match self.read_repo.find_by_slug(slug).await? {
            Some(existing) if ignore_id.is_some_and(|id| *id == existing.id) => Ok(()),
            Some(_) => Err(DomainError::Conflict(format!(
                "slug '{slug}' is already in use"
            ))),
            None => Ok(()),
        }
    }
}
