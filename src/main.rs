use folio_core::application::{
    commands::users::BootstrapAdminCommand,
    dto::SessionEvent,
    ports::{
        security::PasswordHasher, session::SessionStore, storage::ObjectStore, time::Clock,
        util::SlugGenerator,
    },
    services::ApplicationServices,
};
use folio_core::config::AppConfig;
use folio_core::domain::{
    article::{ArticleReadRepository, ArticleWriteRepository},
    user::UserRepository,
};
use folio_core::infrastructure::{
    database,
    repositories::{
        SqliteArticleReadRepository, SqliteArticleWriteRepository, SqliteUserRepository,
    },
    security::{
        password::Argon2PasswordHasher, session_store::InMemorySessionStore,
        token::token_manager_from_key,
    },
    storage::LocalObjectStore,
    time::SystemClock,
    util::DefaultSlugGenerator,
};
use folio_core::presentation::http::{routes::build_router, state::HttpState};
use anyhow::{Context, Result};
use std::{net::SocketAddr, sync::Arc};
use tokio::{signal, sync::broadcast::error::RecvError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err:#}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool = database::init_pool(config.database_url(), config.database_max_connections())
        .await
        .context("connecting to the article database")?;
    database::run_migrations(&pool).await?;
    let pool = Arc::new(pool);

    let user_repo: Arc<dyn UserRepository> = Arc::new(SqliteUserRepository::new(Arc::clone(&pool)));
    let article_write_repo: Arc<dyn ArticleWriteRepository> =
        Arc::new(SqliteArticleWriteRepository::new(Arc::clone(&pool)));
    let article_read_repo: Arc<dyn ArticleReadRepository> =
        Arc::new(SqliteArticleReadRepository::new(Arc::clone(&pool)));

    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher);
    let token_manager = token_manager_from_key(config.biscuit_private_key(), config.token_ttl());
    let session_store: Arc<dyn SessionStore> = InMemorySessionStore::new().into_arc();
    let object_store: Arc<dyn ObjectStore> = Arc::new(LocalObjectStore::new(
        config.media_dir().clone(),
        config.public_base_url(),
    ));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let slugger: Arc<dyn SlugGenerator> = Arc::new(DefaultSlugGenerator);

    let services = Arc::new(ApplicationServices::new(
        user_repo,
        article_write_repo,
        article_read_repo,
        password_hasher,
        token_manager,
        session_store,
        object_store,
        clock,
        slugger,
        config.max_upload_bytes(),
    ));

    if let Some((email, password)) = config.admin_credentials() {
        let command = BootstrapAdminCommand {
            email: email.to_string(),
            password: password.to_string(),
        };
        if services.user_commands.bootstrap_admin(command).await?.is_none() {
            tracing::debug!("admin account already present; skipping bootstrap");
        }
    }

    spawn_session_logger(&services);

    let state = HttpState {
        services: Arc::clone(&services),
    };
    let app = build_router(state, config.allowed_origins());

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!(
        auth_enabled = services.auth_enabled(),
        media_dir = %config.media_dir().display(),
        "listening on {address}"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

fn spawn_session_logger(services: &ApplicationServices) {
    let mut events = services.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(SessionEvent::SignedIn { user_id, email }) => {
                    tracing::info!(user_id, %email, "session started");
                }
                Ok(SessionEvent::SignedOut { user_id }) => {
                    tracing::info!(user_id, "session ended");
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "session event log fell behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
