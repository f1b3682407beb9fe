use common::TestCaseStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Per-test-case outcome, written only by the result reconciler.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "test_case_result")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique_key = "submission_test_case")]
    pub submission_id: i32,
    #[sea_orm(unique_key = "submission_test_case")]
    pub test_case_id: i32,

    #[sea_orm(column_type = "Text", nullable)]
    pub input: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub expected_output: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub user_output: Option<String>,

    pub status: TestCaseStatus,

    pub run_time: Option<i32>, // in milliseconds
    pub memory: Option<i32>,   // in kilobytes

    #[sea_orm(column_type = "Text", nullable)]
    pub error_message: Option<String>,

    #[sea_orm(belongs_to, from = "submission_id", to = "id")]
    pub submission: HasOne<super::submission::Entity>,
    #[sea_orm(belongs_to, from = "test_case_id", to = "id")]
    pub test_case: HasOne<super::test_case::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
