#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status of a submission during the grading lifecycle.
///
/// The lifecycle only moves forward: `pending` -> `judging` -> one of the
/// terminal verdicts. When the `sea-orm` feature is enabled, this enum can be
/// used directly in SeaORM entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// Persisted, waiting to be picked up by the judge fleet.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "pending"))]
    Pending,
    /// Currently being executed by a judge.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "judging"))]
    Judging,
    /// All test cases passed.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "accepted"))]
    Accepted,
    /// Output did not match expected output.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "wrong_answer"))]
    WrongAnswer,
    /// Exceeded the problem's time limit.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "time_limit_exceeded"))]
    TimeLimitExceeded,
    /// Exceeded the problem's memory limit.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "memory_limit_exceeded"))]
    MemoryLimitExceeded,
    /// Program crashed or exited with a non-zero code.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "runtime_error"))]
    RuntimeError,
    /// Failed to compile.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "compilation_error"))]
    CompilationError,
}

impl SubmissionStatus {
    /// Returns true if judging is complete and the verdict is final.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending | Self::Judging)
    }

    /// Returns true if this is a successful verdict.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// All possible status values.
    pub const ALL: &'static [SubmissionStatus] = &[
        Self::Pending,
        Self::Judging,
        Self::Accepted,
        Self::WrongAnswer,
        Self::TimeLimitExceeded,
        Self::MemoryLimitExceeded,
        Self::RuntimeError,
        Self::CompilationError,
    ];

    /// All terminal verdict statuses.
    pub const TERMINAL: &'static [SubmissionStatus] = &[
        Self::Accepted,
        Self::WrongAnswer,
        Self::TimeLimitExceeded,
        Self::MemoryLimitExceeded,
        Self::RuntimeError,
        Self::CompilationError,
    ];

    /// Returns the string representation (snake_case, as on the wire).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Judging => "judging",
            Self::Accepted => "accepted",
            Self::WrongAnswer => "wrong_answer",
            Self::TimeLimitExceeded => "time_limit_exceeded",
            Self::MemoryLimitExceeded => "memory_limit_exceeded",
            Self::RuntimeError => "runtime_error",
            Self::CompilationError => "compilation_error",
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for SubmissionStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Error when parsing an invalid status string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStatusError {
    invalid: String,
}

impl fmt::Display for ParseStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid status '{}'. Valid values: {}",
            self.invalid,
            SubmissionStatus::ALL
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::error::Error for ParseStatusError {}

impl FromStr for SubmissionStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "judging" => Ok(Self::Judging),
            "accepted" => Ok(Self::Accepted),
            "wrong_answer" => Ok(Self::WrongAnswer),
            "time_limit_exceeded" => Ok(Self::TimeLimitExceeded),
            "memory_limit_exceeded" => Ok(Self::MemoryLimitExceeded),
            "runtime_error" => Ok(Self::RuntimeError),
            "compilation_error" => Ok(Self::CompilationError),
            _ => Err(ParseStatusError {
                invalid: s.to_string(),
            }),
        }
    }
}

/// Outcome of running one test case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "snake_case")]
pub enum TestCaseStatus {
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "passed"))]
    Passed,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "failed"))]
    Failed,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "time_limit_exceeded"))]
    TimeLimitExceeded,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "memory_limit_exceeded"))]
    MemoryLimitExceeded,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "runtime_error"))]
    RuntimeError,
}

impl TestCaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::TimeLimitExceeded => "time_limit_exceeded",
            Self::MemoryLimitExceeded => "memory_limit_exceeded",
            Self::RuntimeError => "runtime_error",
        }
    }
}

impl fmt::Display for TestCaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
