use axum::Json;
use axum::extract::{Path, State};
use chrono::Utc;
use common::SubmissionStatus;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::instrument;

use crate::entity::{problem, submission, test_case, test_case_result};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::submission::{
    SubmitRequest, SubmitResponse, SubmissionResultResponse, TestCaseResultView, validate_submit,
};
use crate::publisher;
use crate::state::AppState;

/// Find a problem by ID or return 404.
async fn find_problem<C: ConnectionTrait>(db: &C, id: i32) -> Result<problem::Model, AppError> {
    problem::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Problem not found".into()))
}

/// Find a submission by ID or return 404.
async fn find_submission<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<submission::Model, AppError> {
    submission::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Submission not found".into()))
}

/// Submit code for judging.
///
/// The pending row is committed before any bus interaction; the id is
/// returned regardless of whether the judge task could be published.
#[utoipa::path(
    post,
    path = "/submit",
    tag = "Submissions",
    operation_id = "submitCode",
    summary = "Submit a solution to a problem",
    description = "Persists a pending submission and hands it to the judge queue. The response only reflects the durable record; queueing problems are handled operationally.",
    request_body = SubmitRequest,
    responses(
        (status = 200, description = "Submission accepted", body = SubmitResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Problem not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Store unavailable (INTERNAL_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.user_id))]
pub async fn submit(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<SubmitRequest>,
) -> Result<Json<SubmitResponse>, AppError> {
    validate_submit(&payload, &state.config.submission)?;

    let txn = state.db.begin().await?;

    let _ = find_problem(&txn, payload.problem_id).await?;

    let new_submission = submission::ActiveModel {
        language: Set(payload.language.trim().to_string()),
        code: Set(payload.code),
        status: Set(SubmissionStatus::Pending),
        user_id: Set(auth_user.user_id),
        problem_id: Set(payload.problem_id),
        submitted_at: Set(Utc::now()),
        ..Default::default()
    };

    let model = new_submission.insert(&txn).await?;
    txn.commit().await?;

    publisher::publish_judge_task(&state, &model).await;

    Ok(Json(SubmitResponse {
        id: model.id,
        status: "success".into(),
    }))
}

/// Read back one submission's outcome.
#[utoipa::path(
    get,
    path = "/submissions/{id}/result",
    tag = "Submissions",
    operation_id = "getSubmissionResult",
    summary = "Get the judge outcome for a submission",
    description = "Returns the submission, its problem, and per-test-case outcomes. While judging is in flight the test cases are the problem's reference cases with no verdict.",
    params(
        ("id" = i32, Path, description = "Submission ID")
    ),
    responses(
        (status = 200, description = "Submission outcome", body = SubmissionResultResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Submission not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user), fields(submission_id = %id))]
pub async fn get_submission_result(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<SubmissionResultResponse>, AppError> {
    let sub = find_submission(&state.db, id).await?;

    let problem_model = problem::Entity::find_by_id(sub.problem_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::Internal("Submission problem not found".into()))?;

    let test_cases: Vec<TestCaseResultView> = if sub.status.is_terminal() {
        test_case_result::Entity::find()
            .filter(test_case_result::Column::SubmissionId.eq(sub.id))
            .order_by_asc(test_case_result::Column::TestCaseId)
            .all(&state.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect()
    } else {
        // Still in flight: show the reference cases so clients can render
        // placeholders for the pending verdicts.
        test_case::Entity::find()
            .filter(test_case::Column::ProblemId.eq(sub.problem_id))
            .order_by_asc(test_case::Column::Id)
            .all(&state.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect()
    };

    Ok(Json(SubmissionResultResponse {
        submission: sub.into(),
        problem: problem_model.into(),
        test_cases,
    }))
}
