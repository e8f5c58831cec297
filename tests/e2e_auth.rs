use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use tower::util::ServiceExt as _;

mod support;

use folio_core::infrastructure::security::token::{BiscuitTokenManager, DisabledTokenManager};
use support::{
    InMemoryUserRepo, StrictPasswordHasher, TestContext, admin_record, assert_error_response,
    json_request, login_request, read_json,
};

const KEY: &str = "c2a4e1d7b0f3968a5e7c1d2b3a4f5e6d7c8b9a0f1e2d3c4b5a69788796a5b4c3";
const PASSWORD: &str = "correct-horse-42";

fn signing_context() -> TestContext {
    TestContext::builder()
        .token_manager(Arc::new(
            BiscuitTokenManager::new(KEY, Duration::from_secs(600)).unwrap(),
        ))
        .password_hasher(Arc::new(StrictPasswordHasher))
        .users(InMemoryUserRepo::with_users(vec![admin_record(
            1,
            "admin@example.com",
            PASSWORD,
        )]))
        .build()
}

#[tokio::test]
async fn login_me_logout_round_trip() {
    let app = signing_context().router();

    let resp = app
        .clone()
        .oneshot(login_request("admin@example.com", PASSWORD))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = read_json(resp).await;
    let token = json["token"]["token"].as_str().unwrap().to_string();
    assert_eq!(json["token"]["expires_in"], 600);
    assert_eq!(json["user"]["email"], "admin@example.com");

    let resp = app
        .clone()
        .oneshot(json_request("GET", "/api/v1/auth/me", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(read_json(resp).await["id"], 1);

    let resp = app
        .clone()
        .oneshot(json_request("POST", "/api/v1/auth/logout", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = app
        .oneshot(json_request("GET", "/api/v1/auth/me", Some(&token), None))
        .await
        .unwrap();
    assert_error_response(resp, StatusCode::UNAUTHORIZED, "Unauthorized").await;
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let app = signing_context().router();
    let resp = app
        .oneshot(login_request("admin@example.com", "not-the-password-1"))
        .await
        .unwrap();
    assert_error_response(resp, StatusCode::UNAUTHORIZED, "Unauthorized").await;
}

#[tokio::test]
async fn forged_token_is_unauthorized() {
    let other_key = "0f1e2d3c4b5a69788796a5b4c3d2e1f00112233445566778899aabbccddeeff0";
    let forged = {
        use folio_core::application::dto::TokenSubject;
        use folio_core::application::ports::security::TokenManager;
        let manager = BiscuitTokenManager::new(other_key, Duration::from_secs(600)).unwrap();
        manager
            .issue(TokenSubject {
                user_id: folio_core::domain::user::UserId(1),
                email: "admin@example.com".into(),
                session_id: None,
            })
            .await
            .unwrap()
            .token
    };

    let app = signing_context().router();
    let resp = app
        .oneshot(json_request("GET", "/api/v1/admin/dashboard", Some(&forged), None))
        .await
        .unwrap();
    assert_error_response(resp, StatusCode::UNAUTHORIZED, "Unauthorized").await;
}

#[tokio::test]
async fn disabled_auth_is_reported_and_login_returns_503() {
    let app = TestContext::builder()
        .token_manager(Arc::new(DisabledTokenManager::new("no key")))
        .build()
        .router();

    let resp = app
        .clone()
        .oneshot(json_request("GET", "/health", None, None))
        .await
        .unwrap();
    assert_eq!(read_json(resp).await["auth"], "disabled");

    let resp = app
        .clone()
        .oneshot(login_request("admin@example.com", PASSWORD))
        .await
        .unwrap();
    assert_error_response(resp, StatusCode::SERVICE_UNAVAILABLE, "Service Unavailable").await;

    // public reads keep working
    let resp = app
        .oneshot(json_request("GET", "/api/v1/articles", None, None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn logins_past_the_burst_are_throttled_until_replenished() {
    let app = signing_context().router();
    let client = support::next_client_ip();

    let mut statuses = Vec::new();
    for _ in 0..8 {
        let mut req = login_request("admin@example.com", "not-the-password-1");
        req.headers_mut()
            .insert("x-forwarded-for", client.parse().unwrap());
        statuses.push(app.clone().oneshot(req).await.unwrap().status());
    }

    // a burst of five, then nothing until the next two-second period
    assert!(statuses[..5].iter().all(|s| *s == StatusCode::UNAUTHORIZED));
    assert!(statuses[5..]
        .iter()
        .all(|s| *s == StatusCode::TOO_MANY_REQUESTS));
}
