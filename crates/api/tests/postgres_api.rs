//! End-to-end tests over the PostgreSQL store.
//!
//! The same router as `main.rs`, backed by a fresh migrated database per test.

mod common;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use common::{
    admin_token, body_json, build_test_app_with, get, get_auth, post_json, put_json_auth,
    test_config, ADMIN_PASSWORD,
};
use folio_api::auth::password::hash_password;
use folio_api::error::AppError;
use folio_api::services::auth::{AuthGate, BootstrapAdmin};
use folio_core::error::CoreError;
use folio_db::models::user::CreateUser;
use folio_db::repositories::UserRepo;
use folio_db::store::Stores;
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Admin bootstrap and login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn concurrent_bootstraps_leave_one_admin(pool: PgPool) {
    let config = test_config();
    let gate = AuthGate::new(
        Stores::postgres(pool.clone()).users,
        config.jwt,
        config.min_password_length,
    );
    let input = |name: &str| BootstrapAdmin {
        username: name.to_string(),
        email: format!("{name}@example.com"),
        password: ADMIN_PASSWORD.to_string(),
    };

    let (first, second) = tokio::join!(
        gate.bootstrap_admin(input("first")),
        gate.bootstrap_admin(input("second")),
    );

    assert_eq!([first.is_ok(), second.is_ok()].iter().filter(|ok| **ok).count(), 1);
    let err = first.err().or(second.err()).unwrap();
    assert_matches!(err, AppError::Core(CoreError::AlreadyExists(_)));

    let admins: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = 'admin'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(admins, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn second_bootstrap_over_http_is_rejected(pool: PgPool) {
    let app = build_test_app_with(Stores::postgres(pool));
    admin_token(&app).await;

    let response = post_json(
        app,
        "/api/admin/create",
        json!({ "username": "other", "email": "other@example.com", "password": ADMIN_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "ALREADY_EXISTS");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn non_admin_login_is_forbidden(pool: PgPool) {
    UserRepo::create(
        &pool,
        &CreateUser {
            username: "editor".to_string(),
            email: "editor@example.com".to_string(),
            password_hash: hash_password("editor-password").unwrap(),
            role: "editor".to_string(),
        },
    )
    .await
    .unwrap();

    let app = build_test_app_with(Stores::postgres(pool));
    let response = post_json(
        app,
        "/api/admin/login",
        json!({ "email": "editor@example.com", "password": "editor-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");
}

// ---------------------------------------------------------------------------
// Contact triage
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn viewing_then_responding_moves_stats(pool: PgPool) {
    let app = build_test_app_with(Stores::postgres(pool));
    let token = admin_token(&app).await;

    let response = post_json(
        app.clone(),
        "/api/contact",
        json!({ "name": "Ana", "email": "ana@x.com", "subject": "Hi", "message": "test" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["id"].as_i64().unwrap();

    let stats = body_json(get_auth(app.clone(), "/api/contact/stats", &token).await).await;
    assert_eq!(stats["newMessages"], 1);
    assert_eq!(stats["totalMessages"], 1);

    let viewed = body_json(get_auth(app.clone(), &format!("/api/contact/{id}"), &token).await).await;
    assert_eq!(viewed["status"], "read");

    let response = put_json_auth(
        app.clone(),
        &format!("/api/contact/{id}"),
        json!({ "status": "responded", "adminNotes": "Replied" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let stats = body_json(get_auth(app, "/api/contact/stats", &token).await).await;
    assert_eq!(stats["newMessages"], 0);
    assert_eq!(stats["readMessages"], 0);
    assert_eq!(stats["respondedMessages"], 1);
    assert_eq!(stats["totalMessages"], 1);
}

// ---------------------------------------------------------------------------
// Public portfolio
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn featured_feed_hides_inactive_projects(pool: PgPool) {
    let app = build_test_app_with(Stores::postgres(pool));
    let token = admin_token(&app).await;

    for (title, status) in [("live", "active"), ("paused", "inactive")] {
        let mut payload = common::project_payload(title);
        payload["featured"] = json!(true);
        payload["status"] = json!(status);
        let response =
            common::post_json_auth(app.clone(), "/api/admin/projects", payload, &token).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get(app.clone(), "/api/portfolio/projects/featured").await;
    assert_eq!(response.status(), StatusCode::OK);
    let feed = body_json(response).await;
    let titles: Vec<_> = feed
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["live"]);

    let response = get(app, "/api/portfolio/projects?status=inactive").await;
    let listed = body_json(response).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["title"], "paused");
}
