mod common;

use axum::{Router, http::StatusCode, middleware};
use axum_test::TestServer;
use login_service::api::middleware::auth;
use login_service::api::routes::{protected_routes, public_routes};
use login_service::application::services::login_service::session_key;
use login_service::infrastructure::session::SessionStore;
use serde_json::json;

fn server(state: login_service::AppState) -> TestServer {
    let protected =
        protected_routes().route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    let app = Router::new()
        .nest("/api", public_routes().merge(protected))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_token_from_login_opens_session() {
    let ctx = common::create_test_context().await;
    let server = server(ctx.state);

    let login = server
        .post("/api/login")
        .json(&json!({
            "email": common::TEST_EMAIL,
            "password": common::TEST_PASSWORD
        }))
        .await;
    login.assert_status_ok();

    let token = login.json::<serde_json::Value>()["token"]
        .as_str()
        .unwrap()
        .to_string();

    let session = server
        .get("/api/session")
        .add_header("Authorization", format!("Bearer {}", token))
        .await;

    session.assert_status_ok();
    assert_eq!(session.json::<serde_json::Value>()["user_id"], ctx.user.id);
}

#[tokio::test]
async fn test_rejected_login_yields_no_usable_token() {
    let ctx = common::create_test_context().await;
    let server = server(ctx.state);

    let login = server
        .post("/api/login")
        .json(&json!({
            "email": common::TEST_EMAIL,
            "password": "guess"
        }))
        .await;
    login.assert_status(StatusCode::UNAUTHORIZED);
    assert!(login.json::<serde_json::Value>().get("token").is_none());

    let session = server.get("/api/session").await;
    session.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_repeated_logins_replace_stored_token() {
    let ctx = common::create_test_context().await;
    let server = server(ctx.state);

    let mut tokens = Vec::new();
    for _ in 0..2 {
        let response = server
            .post("/api/login")
            .json(&json!({
                "email": common::TEST_EMAIL,
                "password": common::TEST_PASSWORD
            }))
            .await;
        response.assert_status_ok();

        let token = response.json::<serde_json::Value>()["token"]
            .as_str()
            .unwrap()
            .to_string();
        tokens.push(token);
    }

    let stored = ctx
        .sessions
        .get_value(&session_key(ctx.user.id))
        .await
        .unwrap();
    assert_eq!(stored.as_deref(), tokens.last().map(String::as_str));
    assert_eq!(ctx.users.history_len(ctx.user.id).await, 2);
}

#[tokio::test]
async fn test_session_reports_last_login() {
    let ctx = common::create_test_context().await;
    let server = server(ctx.state);

    let login = server
        .post("/api/login")
        .json(&json!({
            "email": common::TEST_EMAIL,
            "password": common::TEST_PASSWORD
        }))
        .await;
    let token = login.json::<serde_json::Value>()["token"]
        .as_str()
        .unwrap()
        .to_string();

    let session = server
        .get("/api/session")
        .add_header("Authorization", format!("Bearer {}", token))
        .await;

    session.assert_status_ok();
    assert!(session.json::<serde_json::Value>()["last_login_at"].is_string());
}
