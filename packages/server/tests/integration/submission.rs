use chrono::Utc;
use ::common::SubmissionStatus;
use sea_orm::{DatabaseBackend, MockDatabase};
use serde_json::json;

use server::config::SubmissionConfig;
use server::entity::{problem, submission};

use crate::common::{auth_token, spawn_app, spawn_app_with_config, test_config};

fn problem_row(id: i32) -> problem::Model {
    problem::Model {
        id,
        title: "Two Sum".into(),
        description: "Add two numbers.".into(),
        difficulty: "easy".into(),
        time_limit: 1000,
        memory_limit: 262144,
        tags: "math".into(),
        created_at: Utc::now(),
    }
}

fn pending_submission(id: i32, problem_id: i32, user_id: i32) -> submission::Model {
    submission::Model {
        id,
        language: "python".into(),
        code: "print(1)".into(),
        status: SubmissionStatus::Pending,
        run_time: None,
        memory: None,
        error_message: None,
        user_id,
        problem_id,
        submitted_at: Utc::now(),
        judged_at: None,
    }
}

/// Happy path: the pending row is persisted and the generated id comes back.
/// MQ is disabled in the test config, so this also proves the degraded
/// publisher path leaves the response untouched.
#[tokio::test]
async fn test_submit_persists_pending_and_returns_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![problem_row(1)]])
        .append_query_results([vec![pending_submission(101, 1, 7)]])
        .into_connection();

    let app = spawn_app(db).await;

    let response = app
        .client
        .post(app.url("/submit"))
        .header("Authorization", format!("Bearer {}", auth_token(7, "alice")))
        .json(&json!({"problem_id": 1, "language": "python", "code": "print(1)"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["id"], 101);
    assert_eq!(body["status"], "success");
}

#[tokio::test]
async fn test_submit_without_token_rejected() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = spawn_app(db).await;

    let response = app
        .client
        .post(app.url("/submit"))
        .json(&json!({"problem_id": 1, "language": "python", "code": "print(1)"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 401);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["code"], "TOKEN_MISSING");
}

#[tokio::test]
async fn test_submit_with_garbage_token_rejected() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = spawn_app(db).await;

    let response = app
        .client
        .post(app.url("/submit"))
        .header("Authorization", "Bearer not-a-jwt")
        .json(&json!({"problem_id": 1, "language": "python", "code": "print(1)"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 401);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["code"], "TOKEN_INVALID");
}

#[tokio::test]
async fn test_submit_empty_code_rejected_before_store() {
    // No query results scripted: validation must fail before any DB call.
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = spawn_app(db).await;

    let response = app
        .client
        .post(app.url("/submit"))
        .header("Authorization", format!("Bearer {}", auth_token(7, "alice")))
        .json(&json!({"problem_id": 1, "language": "python", "code": "  "}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_submit_unsupported_language_rejected() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let mut config = test_config();
    config.submission = SubmissionConfig {
        allowed_languages: vec!["python".into(), "cpp".into()],
        ..Default::default()
    };
    let app = spawn_app_with_config(db, config).await;

    let response = app
        .client
        .post(app.url("/submit"))
        .header("Authorization", format!("Bearer {}", auth_token(7, "alice")))
        .json(&json!({"problem_id": 1, "language": "brainfuck", "code": "+++"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_submit_unknown_problem_rejected() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<problem::Model>::new()])
        .into_connection();
    let app = spawn_app(db).await;

    let response = app
        .client
        .post(app.url("/submit"))
        .header("Authorization", format!("Bearer {}", auth_token(7, "alice")))
        .json(&json!({"problem_id": 999, "language": "python", "code": "print(1)"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["code"], "NOT_FOUND");
}
