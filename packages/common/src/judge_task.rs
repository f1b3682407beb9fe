use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A judge task published to the task queue for the external judge fleet.
///
/// Self-sufficient snapshot of one submission: the judge never calls back
/// into the server to fetch the code.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JudgeTask {
    /// ID of the submission being judged.
    pub submission_id: i32,
    /// ID of the problem the submission answers.
    pub problem_id: i32,
    /// ID of the submitting user.
    pub user_id: i32,
    /// Programming language (e.g., "cpp", "java", "python").
    pub language: String,
    /// Source code content.
    pub code: String,
    /// When the submission was accepted by the gateway.
    pub submitted_at: DateTime<Utc>,
}
