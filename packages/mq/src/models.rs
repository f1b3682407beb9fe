use broccoli_queue::queue::BroccoliQueueBuilder;
pub use broccoli_queue::{
    brokers::broker::BrokerMessage,
    error::BroccoliError,
    queue::{BroccoliQueue, ConsumeOptions},
};
use tracing::info;

use common::config::MqAppConfig;

use crate::error::MqError;

pub type MqQueue = BroccoliQueue;
pub type MqBuilder = BroccoliQueueBuilder;

/// Build the shared queue client from app configuration.
///
/// The client is safe for concurrent use and meant to be constructed once at
/// process start, then shared behind an `Arc`. A handler `Ok` acknowledges
/// the delivery; an `Err` withholds the acknowledgement so the broker
/// redelivers (at-least-once).
pub async fn init_mq(config: &MqAppConfig) -> Result<MqQueue, MqError> {
    let queue = BroccoliQueue::builder(&config.url)
        .pool_connections(config.pool_size)
        .build()
        .await
        .map_err(|e| MqError::Connection(e.to_string()))?;

    info!(url = %config.url, pool_size = config.pool_size, "MQ client connected");
    Ok(queue)
}
