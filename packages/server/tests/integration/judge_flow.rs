use chrono::Utc;
use ::common::{SubmissionStatus, TestCaseStatus};
use sea_orm::{DatabaseBackend, MockDatabase};

use server::entity::{problem, submission, test_case, test_case_result};

use crate::common::{auth_token, spawn_app};

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

fn judged_submission(id: i32) -> submission::Model {
    submission::Model {
        id,
        language: "python".into(),
        code: "print(1)".into(),
        status: SubmissionStatus::Accepted,
        run_time: Some(12),
        memory: Some(2048),
        error_message: None,
        user_id: 7,
        problem_id: 1,
        submitted_at: Utc::now(),
        judged_at: Some(Utc::now()),
    }
}

fn pending_submission(id: i32) -> submission::Model {
    submission::Model {
        id,
        language: "python".into(),
        code: "print(1)".into(),
        status: SubmissionStatus::Pending,
        run_time: None,
        memory: None,
        error_message: None,
        user_id: 7,
        problem_id: 1,
        submitted_at: Utc::now(),
        judged_at: None,
    }
}

fn passed_result(submission_id: i32, test_case_id: i32) -> test_case_result::Model {
    test_case_result::Model {
        id: 1,
        submission_id,
        test_case_id,
        input: Some("".into()),
        expected_output: Some("1".into()),
        user_output: Some("1".into()),
        status: TestCaseStatus::Passed,
        run_time: Some(12),
        memory: Some(2048),
        error_message: None,
        created_at: Utc::now(),
    }
}

fn reference_case(id: i32, problem_id: i32) -> test_case::Model {
    test_case::Model {
        id,
        input: "".into(),
        expected_output: "1".into(),
        is_sample: true,
        weight: 1,
        problem_id,
        created_at: Utc::now(),
    }
}

/// The read-back half of the end-to-end flow: a reconciled submission shows
/// its terminal status and the persisted per-test-case verdicts.
#[tokio::test]
async fn test_result_for_judged_submission() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![judged_submission(101)]])
        .append_query_results([vec![problem_row(1)]])
        .append_query_results([vec![passed_result(101, 5)]])
        .into_connection();

    let app = spawn_app(db).await;

    let response = app
        .client
        .get(app.url("/submissions/101/result"))
        .header("Authorization", format!("Bearer {}", auth_token(7, "alice")))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["submission"]["status"], "accepted");
    assert_eq!(body["submission"]["run_time"], 12);
    assert_eq!(body["problem"]["id"], 1);

    let test_cases = body["test_cases"].as_array().unwrap();
    assert_eq!(test_cases.len(), 1);
    assert_eq!(test_cases[0]["test_case_id"], 5);
    assert_eq!(test_cases[0]["status"], "passed");
}

/// While judging is in flight the response carries the problem's reference
/// cases with no user output and a null status.
#[tokio::test]
async fn test_result_while_pending_shows_reference_cases() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![pending_submission(102)]])
        .append_query_results([vec![problem_row(1)]])
        .append_query_results([vec![reference_case(5, 1), reference_case(6, 1)]])
        .into_connection();

    let app = spawn_app(db).await;

    let response = app
        .client
        .get(app.url("/submissions/102/result"))
        .header("Authorization", format!("Bearer {}", auth_token(7, "alice")))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["submission"]["status"], "pending");
    assert!(body["submission"]["judged_at"].is_null());

    let test_cases = body["test_cases"].as_array().unwrap();
    assert_eq!(test_cases.len(), 2);
    for tc in test_cases {
        assert!(tc["status"].is_null());
        assert!(tc["user_output"].is_null());
    }
}

#[tokio::test]
async fn test_result_for_unknown_submission_is_404() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<submission::Model>::new()])
        .into_connection();

    let app = spawn_app(db).await;

    let response = app
        .client
        .get(app.url("/submissions/999/result"))
        .header("Authorization", format!("Bearer {}", auth_token(7, "alice")))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
}
