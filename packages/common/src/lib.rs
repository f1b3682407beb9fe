pub mod config;
pub mod judge_result;
pub mod judge_task;
pub mod submission_status;

pub use submission_status::{SubmissionStatus, TestCaseStatus};
