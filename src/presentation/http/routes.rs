// src/presentation/http/routes.rs
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::{articles, auth, dashboard, media},
    middleware::rate_limit::login_rate_limit_layer,
    openapi::{self, HealthResponse},
};
use axum::{
    Extension, Json, Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

// room for multipart boundaries and the `path` field on top of the file itself
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600))
}

pub fn build_router(state: HttpState, allowed_origins: &[String]) -> Router {
    let upload_limit = state
        .services
        .media_commands
        .max_upload_bytes()
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .merge(openapi::docs_router())
        .route("/health", get(health))
        .route(
            "/api/v1/auth/login",
            post(auth::login).layer(login_rate_limit_layer()),
        )
        .route("/api/v1/auth/logout", post(auth::logout))
        .route("/api/v1/auth/me", get(auth::profile))
        .route(
            "/api/v1/articles",
            get(articles::list_articles).post(articles::create_article),
        )
        .route("/api/v1/articles/categories", get(articles::list_categories))
        .route(
            "/api/v1/articles/by-slug/{slug}",
            get(articles::get_article_by_slug),
        )
        .route(
            "/api/v1/articles/{id}",
            get(articles::get_article_by_id)
                .put(articles::update_article)
                .delete(articles::delete_article),
        )
        .route("/api/v1/admin/dashboard", get(dashboard::dashboard))
        .route(
            "/api/v1/media",
            post(media::upload_image).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/media/{*path}", get(media::serve_media))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors_layer(allowed_origins))
        .layer(Extension(state))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health and sign-in availability.", body = HealthResponse)
    ),
    security(()),
    tag = "System"
)]
pub async fn health(Extension(state): Extension<HttpState>) -> Json<HealthResponse> {
    let auth = if state.services.auth_enabled() {
        "enabled"
    } else {
        "disabled"
    };
    Json(HealthResponse {
        status: "ok".into(),
        auth: auth.into(),
    })
}
