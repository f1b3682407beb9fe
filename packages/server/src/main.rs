use std::net::SocketAddr;
use std::sync::Arc;

use mq::init_mq;
use tracing::{Level, error, info, warn};

use server::config::AppConfig;
use server::consumers::consume_judge_results;
use server::database::init_db;
use server::shutdown::install_shutdown_handler;
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = Arc::new(AppConfig::load()?);

    // The store is the source of truth; without it there is nothing to serve.
    let db = init_db(&config.database.url).await?;

    // The bus is not: run degraded when it is unreachable so submissions stay
    // durable and can be backfilled onto the queue operationally.
    let mq = if config.mq.enabled {
        match init_mq(&config.mq).await {
            Ok(queue) => Some(Arc::new(queue)),
            Err(e) => {
                warn!(
                    error = %e,
                    "MQ unavailable, running degraded: judge tasks will not be \
                     published and results will not be consumed"
                );
                None
            }
        }
    } else {
        info!("MQ disabled by configuration");
        None
    };

    let shutdown = install_shutdown_handler();

    let consumer = mq.clone().map(|queue| {
        tokio::spawn(consume_judge_results(
            db.clone(),
            queue,
            config.mq.clone(),
            shutdown.clone(),
        ))
    });

    let state = AppState {
        db,
        mq,
        config: config.clone(),
    };

    let app = server::build_router(state);
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running at http://{addr}");

    let serve_shutdown = shutdown.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { serve_shutdown.cancelled().await })
        .await?;

    if let Some(handle) = consumer {
        if let Err(e) = handle.await {
            error!(error = %e, "Judge result consumer task panicked");
        }
    }

    info!("Shutdown complete");
    Ok(())
}
