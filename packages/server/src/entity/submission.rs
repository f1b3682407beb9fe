use common::SubmissionStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "submission")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub language: String,
    #[sea_orm(column_type = "Text")]
    pub code: String,
    /// Moves forward only: pending -> judging -> terminal verdict.
    pub status: SubmissionStatus,

    /// Maximum run time across test cases in milliseconds; NULL until judged.
    pub run_time: Option<i32>,
    /// Maximum memory across test cases in kilobytes; NULL until judged.
    pub memory: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub error_message: Option<String>,

    pub user_id: i32,
    #[sea_orm(belongs_to, from = "user_id", to = "id")]
    pub user: HasOne<super::user::Entity>,

    pub problem_id: i32,
    #[sea_orm(belongs_to, from = "problem_id", to = "id")]
    pub problem: HasOne<super::problem::Entity>,

    #[sea_orm(has_many)]
    pub test_case_results: HasMany<super::test_case_result::Entity>,

    pub submitted_at: DateTimeUtc,
    /// Set only together with a terminal status.
    pub judged_at: Option<DateTimeUtc>,
}

impl ActiveModelBehavior for ActiveModel {}
