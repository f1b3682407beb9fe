use serde::Deserialize;

/// App-level MQ configuration, shared by every binary that talks to the bus.
#[derive(Debug, Deserialize, Clone)]
pub struct MqAppConfig {
    /// Whether MQ is enabled. When false the server runs degraded: tasks are
    /// not published and results are not consumed. Default: true.
    #[serde(default = "default_mq_enabled")]
    pub enabled: bool,
    /// Redis connection URL. Default: "redis://localhost:6379".
    #[serde(default = "default_mq_url")]
    pub url: String,
    /// Connection pool size. Default: 5.
    #[serde(default = "default_mq_pool_size")]
    pub pool_size: u8,
    /// Queue the gateway publishes judge tasks to. Default: "judge_tasks".
    #[serde(default = "default_task_queue_name")]
    pub task_queue_name: String,
    /// Queue the server consumes judge results from. Default: "judge_results".
    #[serde(default = "default_result_queue_name")]
    pub result_queue_name: String,
    /// Consumer group identity for the result consumer. Default: "judge-result-group".
    #[serde(default = "default_consumer_group")]
    pub consumer_group: String,
    /// Number of result workers. 1 processes deliveries sequentially,
    /// preserving per-submission ordering; higher values process disjoint
    /// deliveries concurrently. Default: 1.
    #[serde(default = "default_result_consumers")]
    pub result_consumers: usize,
    /// Upper bound on a single publish call, in milliseconds. Default: 5000.
    #[serde(default = "default_publish_timeout_ms")]
    pub publish_timeout_ms: u64,
}

fn default_mq_enabled() -> bool {
    true
}
fn default_mq_url() -> String {
    "redis://localhost:6379".into()
}
fn default_mq_pool_size() -> u8 {
    5
}
fn default_task_queue_name() -> String {
    "judge_tasks".into()
}
fn default_result_queue_name() -> String {
    "judge_results".into()
}
fn default_consumer_group() -> String {
    "judge-result-group".into()
}
fn default_result_consumers() -> usize {
    1
}
fn default_publish_timeout_ms() -> u64 {
    5000
}

impl Default for MqAppConfig {
    fn default() -> Self {
        Self {
            enabled: default_mq_enabled(),
            url: default_mq_url(),
            pool_size: default_mq_pool_size(),
            task_queue_name: default_task_queue_name(),
            result_queue_name: default_result_queue_name(),
            consumer_group: default_consumer_group(),
            result_consumers: default_result_consumers(),
            publish_timeout_ms: default_publish_timeout_ms(),
        }
    }
}
