// src/bin/import_articles.rs
//! Imports a JSON array of exported articles into the configured database.
//!
//! Usage: `import_articles <export.json>`
use anyhow::{Context, Result, bail};
use folio_core::application::{
    commands::articles::{ArticleCommandService, ImportOutcome},
    dto::LegacyArticleDocument,
    ports::{time::Clock, util::SlugGenerator},
};
use folio_core::config::AppConfig;
use folio_core::domain::article::{
    ArticleReadRepository, ArticleWriteRepository, services::ArticleSlugService,
};
use folio_core::infrastructure::{
    database,
    repositories::{SqliteArticleReadRepository, SqliteArticleWriteRepository},
    time::SystemClock,
    util::DefaultSlugGenerator,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,sqlx=warn".to_string()),
        ))
        .init();

    let Some(input) = std::env::args().nth(1) else {
        bail!("usage: import_articles <export.json>");
    };
    let raw = tokio::fs::read_to_string(&input)
        .await
        .with_context(|| format!("reading {input}"))?;
    let documents: Vec<LegacyArticleDocument> =
        serde_json::from_str(&raw).with_context(|| format!("parsing {input}"))?;

    let config = AppConfig::from_env()?;
    let pool = database::init_pool(config.database_url(), config.database_max_connections())
        .await
        .context("connecting to the article database")?;
    database::run_migrations(&pool).await?;
    let pool = Arc::new(pool);

    let write_repo: Arc<dyn ArticleWriteRepository> =
        Arc::new(SqliteArticleWriteRepository::new(Arc::clone(&pool)));
    let read_repo: Arc<dyn ArticleReadRepository> =
        Arc::new(SqliteArticleReadRepository::new(Arc::clone(&pool)));
    let slugger: Arc<dyn SlugGenerator> = Arc::new(DefaultSlugGenerator);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let slug_service = Arc::new(ArticleSlugService::new(Arc::clone(&read_repo), slugger));
    let commands = ArticleCommandService::new(write_repo, read_repo, slug_service, clock);

    let (mut imported, mut skipped) = (0usize, 0usize);
    for (index, document) in documents.into_iter().enumerate() {
        let title = document.title.clone();
        match commands
            .import_article(document)
            .await
            .with_context(|| format!("document #{index} ('{title}')"))?
        {
            ImportOutcome::Imported { .. } => imported += 1,
            ImportOutcome::Skipped { slug } => {
                tracing::warn!(%slug, "slug already present, skipped");
                skipped += 1;
            }
        }
    }

    println!("imported {imported} article(s), skipped {skipped}");
    Ok(())
}
