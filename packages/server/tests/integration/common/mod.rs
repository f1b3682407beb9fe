use std::net::SocketAddr;
use std::sync::Arc;

use sea_orm::DatabaseConnection;

use server::config::{
    AppConfig, AuthConfig, CorsConfig, DatabaseConfig, MqAppConfig, ServerConfig, SubmissionConfig,
};
use server::state::AppState;
use server::utils::jwt;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Config for a server under test: auth enabled, MQ disabled so the
/// publisher runs its degraded no-op path.
pub fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
            cors: CorsConfig {
                allow_origins: vec!["*".into()],
                max_age: 3600,
            },
        },
        database: DatabaseConfig {
            url: "postgres://unused".into(),
        },
        auth: AuthConfig {
            jwt_secret: TEST_JWT_SECRET.into(),
        },
        submission: SubmissionConfig::default(),
        mq: MqAppConfig {
            enabled: false,
            ..Default::default()
        },
    }
}

pub struct TestApp {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Serve the real router over the given (mock) connection on an ephemeral
/// port and return a client for it.
pub async fn spawn_app(db: DatabaseConnection) -> TestApp {
    spawn_app_with_config(db, test_config()).await
}

pub async fn spawn_app_with_config(db: DatabaseConnection, config: AppConfig) -> TestApp {
    let state = AppState {
        db,
        mq: None,
        config: Arc::new(config),
    };

    let app = server::build_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("test listener addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve test app");
    });

    TestApp {
        addr,
        client: reqwest::Client::new(),
    }
}

/// Mint a bearer token the way the auth service would.
pub fn auth_token(user_id: i32, username: &str) -> String {
    jwt::sign(user_id, username, TEST_JWT_SECRET).expect("sign test token")
}
