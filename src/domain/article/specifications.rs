use crate::domain::article::entity::Article;
use crate::domain::article::value_objects::Category;

pub trait ArticleSpecification {
    fn is_satisfied_by(&self, article: &Article) -> bool;
}

pub struct PubliclyVisibleSpec;

impl ArticleSpecification for PubliclyVisibleSpec {
    fn is_satisfied_by(&self, article: &Article) -> bool {
        article.published
    }
}

/// Case-insensitive substring match on title or excerpt.
pub struct MatchesSearchSpec {
    needle: String,
}

impl MatchesSearchSpec {
    pub fn new(query: &str) -> Option<Self> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            None
        } else {
            Some(Self { needle })
        }
    }
}

impl ArticleSpecification for MatchesSearchSpec {
    fn is_satisfied_by(&self, article: &Article) -> bool {
        article.title.as_str().to_lowercase().contains(&self.needle)
            || article.excerpt.to_lowercase().contains(&self.needle)
    }
}

pub struct InCategorySpec(pub Category);

impl ArticleSpecification for InCategorySpec {
    fn is_satisfied_by(&self, article: &Article) -> bool {
        article.category == self.0
    }
}

/// Conjunction of optional search and category filters.
#[derive(Default)]
pub struct ArticleFilter {
    search: Option<MatchesSearchSpec>,
    category: Option<InCategorySpec>,
}

impl ArticleFilter {
    pub fn new(search: Option<&str>, category: Option<Category>) -> Self {
        Self {
            search: search.and_then(MatchesSearchSpec::new),
            category: category.map(InCategorySpec),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.category.is_none()
    }
}

impl ArticleSpecification for ArticleFilter {
    fn is_satisfied_by(&self, article: &Article) -> bool {
        self.search
            .as_ref()
            .is_none_or(|spec| spec.is_satisfied_by(article))
            && self
                .category
                .as_ref()
                .is_none_or(|spec| spec.is_satisfied_by(article))
    }
}
