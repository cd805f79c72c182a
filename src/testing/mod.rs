use std::path::PathBuf;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::config::{AppConfig, DatabaseConfig};
use crate::database::Database;
use crate::routes;
use crate::services::UserService;
use crate::state::AppState;

/// Migrated database plus a router bound to it.
///
/// `new` uses a single-connection in-memory database. `with_file_database`
/// uses a throwaway SQLite file with a real connection pool, removed on drop.
pub struct TestContext {
    pub db: Database,
    pub app: Router,
    db_file: Option<PathBuf>,
}

impl TestContext {
    pub async fn new() -> anyhow::Result<Self> {
        Self::with_database(DatabaseConfig::in_memory(), None).await
    }

    pub async fn with_file_database(max_connections: u32) -> anyhow::Result<Self> {
        let path = std::env::temp_dir().join(format!("starwars-blog-unit-{}.db", uuid::Uuid::new_v4()));
        let config = DatabaseConfig {
            url: format!("sqlite://{}", path.display()),
            max_connections,
            connection_timeout: 30,
        };
        Self::with_database(config, Some(path)).await
    }

    async fn with_database(database: DatabaseConfig, db_file: Option<PathBuf>) -> anyhow::Result<Self> {
        let db = Database::connect(&database).await?;
        db.migrate().await?;

        let mut config = AppConfig::default();
        config.api.enable_request_logging = false;
        let app = routes::app(AppState::new(db.clone()), &config);

        Ok(Self { db, app, db_file })
    }

    pub async fn create_user(&self, email: &str) -> anyhow::Result<i64> {
        let mut conn = self.db.acquire().await?;
        Ok(UserService::create(&mut conn, email).await?.id)
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        send(self.app.clone(), method, uri, body).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        self.request(Method::POST, uri, body).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        if let Some(path) = self.db_file.take() {
            for suffix in ["", "-wal", "-shm"] {
                let mut file = path.clone().into_os_string();
                file.push(suffix);
                let _ = std::fs::remove_file(file);
            }
        }
    }
}

/// Send a request through the router; the body is parsed as JSON (Null when empty).
pub async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("valid request");

    let response = app.oneshot(request).await.expect("infallible router");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON response body")
    };
    (status, json)
}
