// tests/support/helpers.rs
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use axum::Router;
use axum::body::{self, Body};
use axum::http::{Request, StatusCode, header};
use serde_json::Value;

use folio_core::application::ports::{
    security::{PasswordHasher, TokenManager},
    session::SessionStore,
    time::Clock,
};
use folio_core::application::services::ApplicationServices;
use folio_core::infrastructure::security::session_store::InMemorySessionStore;
use folio_core::presentation::http::{routes::build_router, state::HttpState};

use super::mocks::{
    DummyPasswordHasher, DummySlug, DummyTokenManager, InMemoryArticleStore, InMemoryObjectStore,
    InMemoryUserRepo, SteppingClock,
};

pub const TEST_MAX_UPLOAD_BYTES: usize = 1024 * 1024;

/// Application services over in-memory stores, with handles kept for assertions.
pub struct TestContext {
    pub services: Arc<ApplicationServices>,
    pub articles: Arc<InMemoryArticleStore>,
    pub users: Arc<InMemoryUserRepo>,
    pub objects: Arc<InMemoryObjectStore>,
}

pub struct TestContextBuilder {
    token_manager: Arc<dyn TokenManager>,
    password_hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock>,
    articles: InMemoryArticleStore,
    users: InMemoryUserRepo,
}

impl TestContextBuilder {
    pub fn token_manager(mut self, token_manager: Arc<dyn TokenManager>) -> Self {
        self.token_manager = token_manager;
        self
    }

    pub fn password_hasher(mut self, password_hasher: Arc<dyn PasswordHasher>) -> Self {
        self.password_hasher = password_hasher;
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn articles(mut self, articles: InMemoryArticleStore) -> Self {
        self.articles = articles;
        self
    }

    pub fn users(mut self, users: InMemoryUserRepo) -> Self {
        self.users = users;
        self
    }

    pub fn build(self) -> TestContext {
        let articles = Arc::new(self.articles);
        let users = Arc::new(self.users);
        let objects = Arc::new(InMemoryObjectStore::default());
        let session_store: Arc<dyn SessionStore> =
            InMemorySessionStore::with_clock(self.clock.clone()).into_arc();

        let services = Arc::new(ApplicationServices::new(
            users.clone(),
            articles.clone(),
            articles.clone(),
            self.password_hasher,
            self.token_manager,
            session_store,
            objects.clone(),
            self.clock,
            Arc::new(DummySlug),
            TEST_MAX_UPLOAD_BYTES,
        ));

        TestContext {
            services,
            articles,
            users,
            objects,
        }
    }
}

impl TestContext {
    pub fn builder() -> TestContextBuilder {
        TestContextBuilder {
            token_manager: Arc::new(DummyTokenManager),
            password_hasher: Arc::new(DummyPasswordHasher),
            clock: Arc::new(SteppingClock::default()),
            articles: InMemoryArticleStore::default(),
            users: InMemoryUserRepo::default(),
        }
    }

    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn state(&self) -> HttpState {
        HttpState {
            services: Arc::clone(&self.services),
        }
    }

    pub fn router(&self) -> Router {
        build_router(self.state(), &["http://localhost:3000".to_string()])
    }
}

pub async fn build_test_state() -> HttpState {
    TestContext::new().state()
}

pub async fn make_test_router() -> Router {
    TestContext::new().router()
}

/// The login route is rate limited per client address; give every request its own.
pub fn next_client_ip() -> String {
    static NEXT: AtomicU32 = AtomicU32::new(1);
    let n = NEXT.fetch_add(1, Ordering::Relaxed);
    format!("10.{}.{}.{}", (n >> 16) & 0xff, (n >> 8) & 0xff, n & 0xff)
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub fn login_request(email: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-forwarded-for", next_client_ip())
        .body(Body::from(
            serde_json::json!({ "email": email, "password": password }).to_string(),
        ))
        .unwrap()
}

pub async fn read_json(resp: axum::response::Response) -> Value {
    let bytes = body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("expected a JSON body")
}

/// Assert that a response is an ErrorResponse JSON with the expected status and error string.
pub async fn assert_error_response(
    resp: axum::response::Response,
    expected_status: StatusCode,
    expected_error: &str,
) {
    assert_eq!(resp.status(), expected_status);
    let (parts, body_stream) = resp.into_parts();
    let body_bytes = body::to_bytes(body_stream, 1024 * 1024)
        .await
        .expect("read body");
    let ct = parts
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(ct.starts_with("application/json"), "unexpected content-type: {ct}");
    let json: Value =
        serde_json::from_slice(&body_bytes).expect("expected valid json body for error");
    let err_field = json.get("error").and_then(|v| v.as_str()).unwrap_or("");
    let msg_field = json.get("message").and_then(|v| v.as_str()).unwrap_or("");
    assert_eq!(err_field, expected_error, "unexpected error field: {err_field}");
    assert!(!msg_field.is_empty(), "expected non-empty message field in ErrorResponse");
}
