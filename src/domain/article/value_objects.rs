use crate::domain::errors::{DomainError, DomainResult};
use std::{fmt, str::FromStr};

/// Store-assigned article identifier. Opaque to everything above the repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArticleId(String);

impl ArticleId {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("article id cannot be empty"));
        }
        if trimmed.contains('/') {
            return Err(DomainError::validation("article id cannot contain '/'"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ArticleId> for String {
    fn from(value: ArticleId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleTitle(String);

impl ArticleTitle {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::validation("title cannot be empty"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ArticleTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// URL-safe slug: lowercase ASCII letters and digits separated by single hyphens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleSlug(String);

impl ArticleSlug {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::validation("slug cannot be empty"));
        }
        if value.starts_with('-') || value.ends_with('-') || value.contains("--") {
            return Err(DomainError::validation(
                "slug cannot start or end with a hyphen or contain consecutive hyphens",
            ));
        }
        if !value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(DomainError::validation(
                "slug may only contain lowercase letters, digits and hyphens",
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ArticleSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Serialized rich-text markup as emitted by the editor widget. May be empty for drafts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArticleContent(String);

impl ArticleContent {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn read_time(&self) -> ReadTime {
        ReadTime::from_markup(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    Cloud,
    AiMl,
    FullStack,
    DevOps,
    Tutorial,
    Career,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Cloud,
        Category::AiMl,
        Category::FullStack,
        Category::DevOps,
        Category::Tutorial,
        Category::Career,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Cloud => "Cloud",
            Category::AiMl => "AI/ML",
            Category::FullStack => "Full Stack",
            Category::DevOps => "DevOps",
            Category::Tutorial => "Tutorial",
            Category::Career => "Career",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Category::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| DomainError::Validation(format!("unknown category '{needle}'")))
    }
}

/// Cover image reference: an absolute http(s) URI or a root-relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverImage(String);

impl CoverImage {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let value = value.trim();
        let accepted = value.starts_with("https://")
            || value.starts_with("http://")
            || (value.starts_with('/') && !value.starts_with("//"));
        if !accepted || value.chars().any(char::is_whitespace) {
            return Err(DomainError::Validation(format!(
                "invalid cover image uri '{value}'"
            )));
        }
        Ok(Self(value.to_string()))
    }

    /// Empty input means "no cover image".
    pub fn parse_optional(value: Option<String>) -> DomainResult<Option<Self>> {
        match value {
            Some(raw) if !raw.trim().is_empty() => Self::new(raw).map(Some),
            _ => Ok(None),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

pub const DEFAULT_AUTHOR: &str = "Admin";

pub fn normalize_author(value: impl Into<String>) -> String {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        DEFAULT_AUTHOR.to_string()
    } else {
        trimmed.to_string()
    }
}

pub const WORDS_PER_MINUTE: usize = 200;

/// Estimated reading duration, displayed as `"N min read"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct ReadTime(u32);

impl ReadTime {
    pub fn from_minutes(minutes: u32) -> Self {
        Self(minutes)
    }

    pub fn from_markup(markup: &str) -> Self {
        Self::from_word_count(count_words(markup))
    }

    pub fn from_word_count(words: usize) -> Self {
        let minutes = words.div_ceil(WORDS_PER_MINUTE);
        Self(u32::try_from(minutes).unwrap_or(u32::MAX))
    }

    pub fn minutes(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ReadTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min read", self.0)
    }
}

/// Removes every `<...>` tag. An unterminated `<` is kept as text.
pub fn strip_tags(markup: &str) -> String {
    let mut text = String::with_capacity(markup.len());
    let mut rest = markup;
    while let Some(open) = rest.find('<') {
        match rest[open..].find('>') {
            Some(close) => {
                text.push_str(&rest[..open]);
                rest = &rest[open + close + 1..];
            }
            None => break,
        }
    }
    text.push_str(rest);
    text
}

pub fn count_words(markup: &str) -> usize {
    strip_tags(markup).split_whitespace().count()
}
