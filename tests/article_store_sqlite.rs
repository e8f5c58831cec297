use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::Duration;
use sqlx::SqlitePool;

mod support;

use folio_core::application::commands::articles::CreateArticleCommand;
use folio_core::application::commands::users::{BootstrapAdminCommand, LoginCommand};
use folio_core::application::queries::articles::ListArticlesQuery;
use folio_core::application::services::ApplicationServices;
use folio_core::domain::article::{
    ArticleContent, ArticleId, ArticleReadRepository, ArticleSlug, ArticleTitle, ArticleUpdate,
    ArticleWriteRepository, Category, NewArticle,
};
use folio_core::domain::errors::DomainError;
use folio_core::domain::user::{Email, NewUser, PasswordHash, UserRepository};
use folio_core::infrastructure::{
    database,
    repositories::{SqliteArticleReadRepository, SqliteArticleWriteRepository, SqliteUserRepository},
    security::{password::Argon2PasswordHasher, session_store::InMemorySessionStore, token},
    time::SystemClock,
    util::DefaultSlugGenerator,
};
use support::{InMemoryObjectStore, fixed_now};

const KEY: &str = "c2a4e1d7b0f3968a5e7c1d2b3a4f5e6d7c8b9a0f1e2d3c4b5a69788796a5b4c3";

async fn test_pool() -> (tempfile::TempDir, Arc<SqlitePool>) {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("folio-test.db").display());
    let pool = database::init_pool(&url, 4).await.unwrap();
    database::run_migrations(&pool).await.unwrap();
    (dir, Arc::new(pool))
}

fn new_article(title: &str, slug: &str, published: bool, minute: i64) -> NewArticle {
    let at = fixed_now() + Duration::minutes(minute);
    let content = ArticleContent::new("<p>alpha beta gamma</p>");
    NewArticle {
        title: ArticleTitle::new(title).unwrap(),
        slug: ArticleSlug::new(slug).unwrap(),
        excerpt: format!("about {title}"),
        read_time: content.read_time(),
        content,
        category: Category::Cloud,
        cover_image: None,
        author: "Admin".into(),
        published,
        featured: false,
        created_at: at,
        updated_at: at,
    }
}

#[tokio::test]
async fn insert_then_find_round_trips_all_fields() {
    let (_dir, pool) = test_pool().await;
    let writer = SqliteArticleWriteRepository::new(Arc::clone(&pool));
    let reader = SqliteArticleReadRepository::new(Arc::clone(&pool));

    let created = writer
        .insert(new_article("First", "first", true, 0))
        .await
        .unwrap();
    assert_eq!(created.created_at, fixed_now());

    let by_id = reader.find_by_id(&created.id).await.unwrap().unwrap();
    assert_eq!(by_id, created);
    let by_slug = reader
        .find_by_slug(&ArticleSlug::new("first").unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_slug.id, created.id);
    assert_eq!(by_slug.read_time.minutes(), 1);

    assert!(
        reader
            .find_by_id(&ArticleId::new("missing").unwrap())
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn duplicate_slug_is_a_conflict() {
    let (_dir, pool) = test_pool().await;
    let writer = SqliteArticleWriteRepository::new(Arc::clone(&pool));

    writer.insert(new_article("One", "same", false, 0)).await.unwrap();
    let err = writer
        .insert(new_article("Two", "same", false, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)), "{err:?}");
}

#[tokio::test]
async fn listing_is_newest_first_with_insert_order_breaking_ties() {
    let (_dir, pool) = test_pool().await;
    let writer = SqliteArticleWriteRepository::new(Arc::clone(&pool));
    let reader = SqliteArticleReadRepository::new(Arc::clone(&pool));

    let old = writer.insert(new_article("Old", "old", true, 0)).await.unwrap();
    let tie_a = writer.insert(new_article("Tie A", "tie-a", true, 5)).await.unwrap();
    let tie_b = writer.insert(new_article("Tie B", "tie-b", true, 5)).await.unwrap();
    let draft = writer.insert(new_article("Draft", "draft", false, 9)).await.unwrap();

    let published: Vec<_> = reader
        .list(true)
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.id)
        .collect();
    assert_eq!(published, [tie_b.id.clone(), tie_a.id.clone(), old.id.clone()]);

    let all = reader.list(false).await.unwrap();
    assert_eq!(all.len(), 4);
    assert_eq!(all[0].id, draft.id);
}

#[tokio::test]
async fn update_is_partial_and_compare_and_swap() {
    let (_dir, pool) = test_pool().await;
    let writer = SqliteArticleWriteRepository::new(Arc::clone(&pool));

    let created = writer
        .insert(new_article("Editable", "editable", false, 0))
        .await
        .unwrap();
    let later = created.updated_at + Duration::seconds(30);

    let updated = writer
        .update(
            ArticleUpdate::new(created.id.clone(), later)
                .with_excerpt("fresh")
                .with_published(true)
                .expecting(created.updated_at),
        )
        .await
        .unwrap();
    assert_eq!(updated.excerpt, "fresh");
    assert!(updated.published);
    assert_eq!(updated.title, created.title);
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.updated_at, later);

    let stale = writer
        .update(
            ArticleUpdate::new(created.id.clone(), later + Duration::seconds(1))
                .with_excerpt("stale")
                .expecting(created.updated_at),
        )
        .await
        .unwrap_err();
    assert!(matches!(stale, DomainError::Conflict(_)));

    let missing = writer
        .update(ArticleUpdate::new(ArticleId::new("nope").unwrap(), later))
        .await
        .unwrap_err();
    assert!(matches!(missing, DomainError::NotFound(_)));
}

#[tokio::test]
async fn delete_is_idempotent() {
    let (_dir, pool) = test_pool().await;
    let writer = SqliteArticleWriteRepository::new(Arc::clone(&pool));
    let reader = SqliteArticleReadRepository::new(Arc::clone(&pool));

    let created = writer.insert(new_article("Gone", "gone", true, 0)).await.unwrap();
    writer.delete(&created.id).await.unwrap();
    writer.delete(&created.id).await.unwrap();
    assert!(reader.find_by_id(&created.id).await.unwrap().is_none());
}

#[tokio::test]
async fn user_emails_are_unique() {
    let (_dir, pool) = test_pool().await;
    let users = SqliteUserRepository::new(Arc::clone(&pool));
    let new_user = || {
        NewUser::new(
            Email::new("admin@example.com").unwrap(),
            PasswordHash::new("$argon2id$stub").unwrap(),
            fixed_now(),
        )
    };

    let created = users.insert(new_user()).await.unwrap();
    assert_eq!(users.count().await.unwrap(), 1);
    assert_eq!(
        users.find_by_id(created.id).await.unwrap().unwrap().email,
        created.email
    );
    let err = users.insert(new_user()).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));
}

#[tokio::test]
async fn full_stack_bootstrap_login_and_publish() {
    let (_dir, pool) = test_pool().await;
    let articles_write = Arc::new(SqliteArticleWriteRepository::new(Arc::clone(&pool)));
    let articles_read = Arc::new(SqliteArticleReadRepository::new(Arc::clone(&pool)));
    let services = ApplicationServices::new(
        Arc::new(SqliteUserRepository::new(Arc::clone(&pool))),
        articles_write,
        articles_read,
        Arc::new(Argon2PasswordHasher),
        token::token_manager_from_key(Some(KEY), StdDuration::from_secs(300)),
        InMemorySessionStore::new().into_arc(),
        Arc::new(InMemoryObjectStore::default()),
        Arc::new(SystemClock),
        Arc::new(DefaultSlugGenerator),
        1024,
    );

    services
        .user_commands
        .bootstrap_admin(BootstrapAdminCommand {
            email: "admin@example.com".into(),
            password: "correct-horse-42".into(),
        })
        .await
        .unwrap()
        .unwrap();
    let login = services
        .user_commands
        .login(LoginCommand {
            email: "admin@example.com".into(),
            password: "correct-horse-42".into(),
        })
        .await
        .ok()
        .unwrap();
    let actor = services.authenticate(&login.token.token).await.unwrap();

    let created = services
        .article_commands
        .create_article(
            &actor,
            CreateArticleCommand::builder()
                .title("Straight to the store")
                .published(true)
                .build()
                .unwrap(),
        )
        .await
        .unwrap();

    let public = services
        .article_queries
        .list_articles(None, ListArticlesQuery::default())
        .await
        .unwrap();
    assert_eq!(public.total, 1);
    assert_eq!(public.items[0].id, created.id);
    assert_eq!(public.items[0].slug, "straight-to-the-store");
    // stored timestamps carry microsecond precision
    assert_eq!(public.items[0].created_at, created.created_at);

}
