use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Json},
};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::routes::ROUTES;
use crate::state::AppState;

/// GET / - sitemap of every route the server answers
pub async fn sitemap() -> Json<Value> {
    let endpoints: Vec<Value> = ROUTES
        .iter()
        .map(|(method, path)| json!({ "method": method, "path": path }))
        .collect();

    Json(json!({
        "name": "Star Wars Blog API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": endpoints
    }))
}

/// GET /user
pub async fn hello() -> Json<Value> {
    Json(json!({ "msg": "Hello, this is your GET /user response " }))
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.db.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "error": "database unavailable"
                })),
            )
        }
    }
}

/// Fallback for unknown routes
pub async fn not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::not_found(format!("No route for {} {}", method, uri.path()))
}
