use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::AppConfig;

/// Shared application state, cloned per request. Holds only handles that are
/// safe for concurrent use: the connection pool and the MQ client.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    /// None when the MQ client could not be built at startup; the publisher
    /// then degrades to a logged no-op and the result consumer is not started.
    pub mq: Option<Arc<mq::Mq>>,
    pub config: Arc<AppConfig>,
}
