use serde::{Deserialize, Serialize};

use crate::{SubmissionStatus, TestCaseStatus};

/// Verdict and metrics for one submission, consumed from the result queue.
///
/// Delivery is at-least-once: the same result may arrive more than once, with
/// an identical payload each time. Everything beyond the ids and statuses is
/// optional so that minimal judge payloads still deserialize.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JudgeResult {
    /// Submission that was judged.
    pub submission_id: i32,
    /// Problem the submission was judged against.
    pub problem_id: i32,
    /// Terminal status decided by the judge.
    pub status: SubmissionStatus,
    /// Maximum run time across all test cases (milliseconds).
    #[serde(default)]
    pub run_time: Option<i32>,
    /// Maximum memory across all test cases (kilobytes).
    #[serde(default)]
    pub memory: Option<i32>,
    /// Compiler or runtime error text, if any.
    #[serde(default)]
    pub error_message: Option<String>,
    /// Individual test case outcomes.
    #[serde(default)]
    pub test_cases: Vec<TestCaseJudgeResult>,
}

/// Outcome of a single test case execution.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TestCaseJudgeResult {
    /// Test case that was executed.
    pub test_case_id: i32,
    /// Input fed to the program.
    #[serde(default)]
    pub input: Option<String>,
    /// Expected output.
    #[serde(default)]
    pub expected_output: Option<String>,
    /// Output the program actually produced.
    #[serde(default)]
    pub user_output: Option<String>,
    /// Verdict for this test case.
    pub status: TestCaseStatus,
    /// Run time in milliseconds.
    #[serde(default)]
    pub run_time: Option<i32>,
    /// Memory used in kilobytes.
    #[serde(default)]
    pub memory: Option<i32>,
    /// Error text for this test case, if any.
    #[serde(default)]
    pub error_message: Option<String>,
}
