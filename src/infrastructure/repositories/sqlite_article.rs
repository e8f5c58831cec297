use super::{map_sqlx, timestamp};
use crate::domain::article::{
    Article, ArticleContent, ArticleId, ArticleReadRepository, ArticleSlug, ArticleTitle,
    ArticleUpdate, ArticleWriteRepository, Category, CoverImage, NewArticle, ReadTime,
};
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};
use std::sync::Arc;

const ARTICLE_COLUMNS: &str = "id, title, slug, excerpt, content, category, cover_image, author, \
     published, featured, read_time_minutes, created_at, updated_at";

#[derive(Clone)]
pub struct SqliteArticleWriteRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteArticleWriteRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct SqliteArticleReadRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteArticleReadRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ArticleRow {
    id: String,
    title: String,
    slug: String,
    excerpt: String,
    content: String,
    category: String,
    cover_image: Option<String>,
    author: String,
    published: i64,
    featured: i64,
    read_time_minutes: i64,
    created_at: String,
    updated_at: String,
}

impl TryFrom<ArticleRow> for Article {
    type Error = DomainError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        let minutes = u32::try_from(row.read_time_minutes)
            .map_err(|_| DomainError::persistence("read time out of range"))?;
        Ok(Article {
            id: ArticleId::new(row.id)?,
            title: ArticleTitle::new(row.title)?,
            slug: ArticleSlug::new(row.slug)?,
            excerpt: row.excerpt,
            content: ArticleContent::new(row.content),
            category: row.category.parse::<Category>()?,
            cover_image: CoverImage::parse_optional(row.cover_image)?,
            author: row.author,
            published: row.published != 0,
            featured: row.featured != 0,
            read_time: ReadTime::from_minutes(minutes),
            created_at: timestamp::decode(&row.created_at)?,
            updated_at: timestamp::decode(&row.updated_at)?,
        })
    }
}

fn flag(value: bool) -> i64 {
    i64::from(value)
}

#[async_trait]
impl ArticleWriteRepository for SqliteArticleWriteRepository {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        let NewArticle {
            title,
            slug,
            excerpt,
            content,
            category,
            cover_image,
            author,
            published,
            featured,
            read_time,
            created_at,
            updated_at,
        } = article;

        let sql = format!(
            "INSERT INTO articles ({ARTICLE_COLUMNS}) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING {ARTICLE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ArticleRow>(&sql)
            .bind(ArticleId::generate().as_str())
            .bind(title.as_str())
            .bind(slug.as_str())
            .bind(excerpt)
            .bind(content.as_str())
            .bind(category.as_str())
            .bind(cover_image.as_ref().map(CoverImage::as_str))
            .bind(author)
            .bind(flag(published))
            .bind(flag(featured))
            .bind(i64::from(read_time.minutes()))
            .bind(timestamp::encode(&created_at))
            .bind(timestamp::encode(&updated_at))
            .fetch_one(&*self.pool)
            .await
            .map_err(map_sqlx)?;

        Article::try_from(row)
    }

    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article> {
        let read_time = update.read_time();
        let ArticleUpdate {
            id,
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
            updated_at,
        } = update;

        let expected = expected_updated_at.as_ref().map(timestamp::encode);
        let sql = format!(
            "UPDATE articles SET \
                title = COALESCE(?, title), \
                slug = COALESCE(?, slug), \
                excerpt = COALESCE(?, excerpt), \
                content = COALESCE(?, content), \
                read_time_minutes = COALESCE(?, read_time_minutes), \
                category = COALESCE(?, category), \
                cover_image = CASE WHEN ? THEN ? ELSE cover_image END, \
                author = COALESCE(?, author), \
                published = COALESCE(?, published), \
                featured = COALESCE(?, featured), \
                updated_at = ? \
             WHERE id = ? AND (? IS NULL OR updated_at = ?) \
             RETURNING {ARTICLE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ArticleRow>(&sql)
            .bind(title.as_ref().map(ArticleTitle::as_str))
            .bind(slug.as_ref().map(ArticleSlug::as_str))
            .bind(excerpt)
            .bind(content.as_ref().map(ArticleContent::as_str))
            .bind(read_time.map(|rt| i64::from(rt.minutes())))
            .bind(category.map(|c| c.as_str()))
            .bind(flag(cover_image.is_some()))
            .bind(cover_image.flatten().map(CoverImage::into_inner))
            .bind(author)
            .bind(published.map(flag))
            .bind(featured.map(flag))
            .bind(timestamp::encode(&updated_at))
            .bind(id.as_str())
            .bind(expected.clone())
            .bind(expected)
            .fetch_optional(&*self.pool)
            .await
            .map_err(map_sqlx)?;

        match row {
            Some(row) => Article::try_from(row),
            None => {
                let exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(1) FROM articles WHERE id = ?")
                    .bind(id.as_str())
                    .fetch_one(&*self.pool)
                    .await
                    .map_err(map_sqlx)?;
                if exists > 0 {
                    Err(DomainError::Conflict(
                        "article was modified by someone else".into(),
                    ))
                } else {
                    Err(DomainError::NotFound(format!("article {id} not found")))
                }
            }
        }
    }

    async fn delete(&self, id: &ArticleId) -> DomainResult<()> {
        sqlx::query("DELETE FROM articles WHERE id = ?")
            .bind(id.as_str())
            .execute(&*self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(())
    }
}

#[async_trait]
impl ArticleReadRepository for SqliteArticleReadRepository {
    async fn find_by_id(&self, id: &ArticleId) -> DomainResult<Option<Article>> {
        let sql = format!("SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = ?");
        let row = sqlx::query_as::<_, ArticleRow>(&sql)
            .bind(id.as_str())
            .fetch_optional(&*self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(Article::try_from).transpose()
    }

    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Option<Article>> {
        let sql = format!("SELECT {ARTICLE_COLUMNS} FROM articles WHERE slug = ? LIMIT 1");
        let row = sqlx::query_as::<_, ArticleRow>(&sql)
            .bind(slug.as_str())
            .fetch_optional(&*self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(Article::try_from).transpose()
    }

    async fn list(&self, published_only: bool) -> DomainResult<Vec<Article>> {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {ARTICLE_COLUMNS} FROM articles"));
        if published_only {
            builder.push(" WHERE published = 1");
        }
        builder.push(" ORDER BY created_at DESC, rowid DESC");

        let rows = builder
            .build_query_as::<ArticleRow>()
            .fetch_all(&*self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.into_iter().map(Article::try_from).collect()
    }
}
