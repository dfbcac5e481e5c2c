use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;

use catalog_api::{
    app::app,
    config::{AppConfig, PasswordHashConfig},
    database::{DatabaseManager, PgCatalogStore},
    state::AppState,
};

pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Starts the API in-process on an ephemeral port against `DATABASE_URL`.
/// Returns `None` when no database is configured so tests can skip.
pub async fn spawn_server() -> Result<Option<TestServer>> {
    let _ = dotenvy::dotenv();
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping integration test");
        return Ok(None);
    };

    let mut config = AppConfig::development();
    config.database.url = database_url;
    config.database.max_connections = 2;
    config.security.jwt_secret = "integration-test-secret".to_string();
    config.security.password_hash = PasswordHashConfig {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    };
    config.api.enable_request_logging = false;

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to test database")?;
    DatabaseManager::prepare_schema(&pool, false).await?;

    let state = AppState::new(&config, Arc::new(PgCatalogStore::new(pool)))?;
    let router = app(state, &config);

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            eprintln!("test server error: {}", e);
        }
    });

    Ok(Some(TestServer {
        base_url: format!("http://{}", addr),
        client: reqwest::Client::new(),
    }))
}

/// Emails are unique per run because the database is shared between tests.
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.com", prefix, uuid::Uuid::new_v4().simple())
}

/// Registers `email` and returns a bearer token for it
pub async fn register_and_login(server: &TestServer, email: &str, password: &str) -> Result<String> {
    let creds = serde_json::json!({ "email": email, "password": password });

    let res = server.client.post(server.url("/register")).json(&creds).send().await?;
    anyhow::ensure!(res.status().is_success(), "register failed: {}", res.status());

    let res = server.client.post(server.url("/login")).json(&creds).send().await?;
    anyhow::ensure!(res.status().is_success(), "login failed: {}", res.status());

    let body = res.json::<serde_json::Value>().await?;
    body["access_token"]
        .as_str()
        .map(str::to_string)
        .context("login response missing access_token")
}
