use chrono::{DateTime, Utc};
use common::{SubmissionStatus, TestCaseStatus};
use serde::{Deserialize, Serialize};

use crate::config::SubmissionConfig;
use crate::entity::{problem, submission, test_case, test_case_result};
use crate::error::AppError;

/// Request body for `POST /submit`.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct SubmitRequest {
    #[schema(example = 1)]
    pub problem_id: i32,
    /// Programming language (e.g., "cpp", "java", "python").
    #[schema(example = "python")]
    pub language: String,
    /// Source code content.
    #[schema(example = "print(1)")]
    pub code: String,
}

/// Response body for `POST /submit`.
///
/// Returned as soon as the submission row is durable; publish outcome never
/// changes it.
#[derive(Serialize, utoipa::ToSchema)]
pub struct SubmitResponse {
    #[schema(example = 101)]
    pub id: i32,
    #[schema(example = "success")]
    pub status: String,
}

/// Submission fields exposed on the read path.
#[derive(Serialize, utoipa::ToSchema)]
pub struct SubmissionView {
    #[schema(example = 101)]
    pub id: i32,
    #[schema(example = 1)]
    pub problem_id: i32,
    #[schema(example = 7)]
    pub user_id: i32,
    #[schema(example = "python")]
    pub language: String,
    pub code: String,
    pub status: SubmissionStatus,
    /// Total run time in ms if judged, null otherwise.
    pub run_time: Option<i32>,
    /// Total memory in KB if judged, null otherwise.
    pub memory: Option<i32>,
    pub error_message: Option<String>,
    #[schema(example = "2026-08-01T14:30:00Z")]
    pub submitted_at: DateTime<Utc>,
    pub judged_at: Option<DateTime<Utc>>,
}

impl From<submission::Model> for SubmissionView {
    fn from(sub: submission::Model) -> Self {
        Self {
            id: sub.id,
            problem_id: sub.problem_id,
            user_id: sub.user_id,
            language: sub.language,
            code: sub.code,
            status: sub.status,
            run_time: sub.run_time,
            memory: sub.memory,
            error_message: sub.error_message,
            submitted_at: sub.submitted_at,
            judged_at: sub.judged_at,
        }
    }
}

/// Problem summary included in a result response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ProblemView {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Two Sum")]
    pub title: String,
    #[schema(example = "easy")]
    pub difficulty: String,
    /// Time limit in milliseconds.
    pub time_limit: i32,
    /// Memory limit in kilobytes.
    pub memory_limit: i32,
}

impl From<problem::Model> for ProblemView {
    fn from(p: problem::Model) -> Self {
        Self {
            id: p.id,
            title: p.title,
            difficulty: p.difficulty,
            time_limit: p.time_limit,
            memory_limit: p.memory_limit,
        }
    }
}

/// One row of the `test_cases` section of a result response.
///
/// For a judged submission these come from persisted test case results. While
/// judging is still in flight they are the problem's reference cases with no
/// user output and no verdict, signaling incompleteness.
#[derive(Serialize, utoipa::ToSchema)]
pub struct TestCaseResultView {
    #[schema(example = 5)]
    pub test_case_id: i32,
    pub input: Option<String>,
    pub expected_output: Option<String>,
    pub user_output: Option<String>,
    pub status: Option<TestCaseStatus>,
    pub run_time: Option<i32>,
    pub memory: Option<i32>,
    pub error_message: Option<String>,
}

impl From<test_case_result::Model> for TestCaseResultView {
    fn from(result: test_case_result::Model) -> Self {
        Self {
            test_case_id: result.test_case_id,
            input: result.input,
            expected_output: result.expected_output,
            user_output: result.user_output,
            status: Some(result.status),
            run_time: result.run_time,
            memory: result.memory,
            error_message: result.error_message,
        }
    }
}

impl From<test_case::Model> for TestCaseResultView {
    fn from(tc: test_case::Model) -> Self {
        Self {
            test_case_id: tc.id,
            input: Some(tc.input),
            expected_output: Some(tc.expected_output),
            user_output: None,
            status: None,
            run_time: None,
            memory: None,
            error_message: None,
        }
    }
}

/// Response body for `GET /submissions/{id}/result`.
#[derive(Serialize, utoipa::ToSchema)]
pub struct SubmissionResultResponse {
    pub submission: SubmissionView,
    pub problem: ProblemView,
    pub test_cases: Vec<TestCaseResultView>,
}

/// Validate a submit request against the gateway's submission policy.
pub fn validate_submit(req: &SubmitRequest, config: &SubmissionConfig) -> Result<(), AppError> {
    if req.code.trim().is_empty() {
        return Err(AppError::Validation("Code must not be empty".into()));
    }
    if req.code.len() > config.max_code_size {
        return Err(AppError::Validation(format!(
            "Code exceeds maximum size of {} bytes",
            config.max_code_size
        )));
    }

    let language = req.language.trim();
    if language.is_empty() {
        return Err(AppError::Validation("Language must not be empty".into()));
    }
    if !config.allowed_languages.is_empty()
        && !config.allowed_languages.iter().any(|l| l == language)
    {
        return Err(AppError::Validation(format!(
            "Language '{language}' is not supported"
        )));
    }

    Ok(())
}
