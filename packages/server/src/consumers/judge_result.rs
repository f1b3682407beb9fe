use std::sync::Arc;

use chrono::Utc;
use common::config::MqAppConfig;
use common::judge_result::JudgeResult;
use mq::{BroccoliError, BrokerMessage, Mq};
use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QuerySelect, Set, TransactionTrait,
};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::entity::{submission, test_case_result};

/// Why a judge result could not be applied.
///
/// The consumer acknowledges or withholds based on this split: structural
/// failures are acked and dropped (redelivery cannot fix them), transient
/// ones are left unacked for the transport to redeliver.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("Submission {0} not found")]
    NotFound(i32),

    #[error("Invalid judge result: {0}")]
    Invalid(String),

    #[error(transparent)]
    Db(#[from] DbErr),
}

/// Consume judge results from the result queue until shutdown.
///
/// Each worker owns its deliveries exclusively (the broker hands a message to
/// exactly one member of the group) and processes them sequentially; the only
/// suspension point outside a handler is the fetch call, which is where the
/// shutdown token takes effect.
pub async fn consume_judge_results(
    db: DatabaseConnection,
    mq: Arc<Mq>,
    config: MqAppConfig,
    shutdown: CancellationToken,
) {
    let queue_name = config.result_queue_name.clone();
    // A single worker preserves per-submission ordering; more workers spread
    // disjoint deliveries over the shared pool.
    let concurrency = (config.result_consumers > 1).then_some(config.result_consumers);

    info!(
        queue = %queue_name,
        group = %config.consumer_group,
        workers = config.result_consumers,
        "Starting judge result consumer"
    );

    let consume = mq.process_messages(
        &queue_name,
        concurrency,
        None,
        move |message: BrokerMessage<serde_json::Value>| {
            let db = db.clone();
            async move { handle_message(&db, message.payload).await }
        },
    );

    tokio::select! {
        result = consume => {
            if let Err(e) = result {
                error!(error = %e, "Judge result consumer stopped unexpectedly");
            }
        }
        _ = shutdown.cancelled() => {
            info!(queue = %queue_name, "Judge result consumer leaving group");
        }
    }
}

/// Process one raw delivery. The return value is the acknowledgement
/// decision: `Ok` acks, `Err` leaves the message for redelivery.
async fn handle_message(
    db: &DatabaseConnection,
    payload: serde_json::Value,
) -> Result<(), BroccoliError> {
    let result: JudgeResult = match serde_json::from_value(payload.clone()) {
        Ok(result) => result,
        Err(e) => {
            // Ack malformed payloads: redelivering them would only poison the
            // queue and block everything behind them.
            error!(error = %e, payload = %payload, "Dropping malformed judge result");
            return Ok(());
        }
    };

    let submission_id = result.submission_id;
    match process_judge_result(db, result).await {
        Ok(()) => Ok(()),
        Err(e @ ReconcileError::Db(_)) => {
            error!(submission_id, error = %e, "Transient failure applying judge result");
            Err(BroccoliError::Job(e.to_string()))
        }
        Err(e) => {
            warn!(submission_id, error = %e, "Dropping unprocessable judge result");
            Ok(())
        }
    }
}

/// Apply one judge result atomically.
///
/// Redelivery-safe: the submission row is overwritten and the per-test-case
/// rows are replaced as a whole set, so applying the same message twice
/// leaves the final state unchanged. A result for an already judged
/// submission is applied the same way, which makes flaky-judge retries
/// harmless.
pub async fn process_judge_result(
    db: &DatabaseConnection,
    result: JudgeResult,
) -> Result<(), ReconcileError> {
    if !result.status.is_terminal() {
        return Err(ReconcileError::Invalid(format!(
            "status '{}' is not a terminal verdict",
            result.status
        )));
    }

    let txn = db.begin().await?;

    let _ = submission::Entity::find_by_id(result.submission_id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or(ReconcileError::NotFound(result.submission_id))?;

    let submission_update = submission::ActiveModel {
        id: Set(result.submission_id),
        status: Set(result.status),
        run_time: Set(result.run_time),
        memory: Set(result.memory),
        error_message: Set(result.error_message.clone()),
        judged_at: Set(Some(Utc::now())),
        ..Default::default()
    };
    submission_update.update(&txn).await?;

    // Replace the whole per-test-case set for this submission. The composite
    // unique key on (submission_id, test_case_id) backstops duplicates.
    test_case_result::Entity::delete_many()
        .filter(test_case_result::Column::SubmissionId.eq(result.submission_id))
        .exec(&txn)
        .await?;

    let now = Utc::now();
    for tc in &result.test_cases {
        let model = test_case_result::ActiveModel {
            submission_id: Set(result.submission_id),
            test_case_id: Set(tc.test_case_id),
            input: Set(tc.input.clone()),
            expected_output: Set(tc.expected_output.clone()),
            user_output: Set(tc.user_output.clone()),
            status: Set(tc.status),
            run_time: Set(tc.run_time),
            memory: Set(tc.memory),
            error_message: Set(tc.error_message.clone()),
            created_at: Set(now),
            ..Default::default()
        };
        model.insert(&txn).await?;
    }

    txn.commit().await?;

    info!(
        submission_id = result.submission_id,
        status = %result.status,
        test_cases = result.test_cases.len(),
        "Judge result applied"
    );

    Ok(())
}
