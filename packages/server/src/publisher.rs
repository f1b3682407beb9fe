use std::time::Duration;

use common::judge_task::JudgeTask;
use tracing::{info, instrument, warn};

use crate::entity::submission;
use crate::state::AppState;

/// Publish a judge task for a freshly persisted submission.
///
/// The submission row is already committed and is the source of truth. A
/// publish failure or timeout is logged and left to operational backfill;
/// it is never retried inline and never surfaced to the submitter.
#[instrument(skip(state, sub), fields(submission_id = sub.id))]
pub async fn publish_judge_task(state: &AppState, sub: &submission::Model) {
    let Some(ref mq) = state.mq else {
        warn!("MQ unavailable, skipping judge task publish");
        return;
    };

    let task = JudgeTask {
        submission_id: sub.id,
        problem_id: sub.problem_id,
        user_id: sub.user_id,
        language: sub.language.clone(),
        code: sub.code.clone(),
        submitted_at: sub.submitted_at,
    };

    let queue = &state.config.mq.task_queue_name;
    let timeout = Duration::from_millis(state.config.mq.publish_timeout_ms);

    match tokio::time::timeout(timeout, mq.publish(queue, None, &task, None)).await {
        Ok(Ok(_)) => {
            info!(queue = %queue, "Judge task published");
        }
        Ok(Err(e)) => {
            warn!(queue = %queue, error = %e, "Failed to publish judge task");
        }
        Err(_) => {
            warn!(
                queue = %queue,
                timeout_ms = state.config.mq.publish_timeout_ms,
                "Timed out publishing judge task"
            );
        }
    }
}
