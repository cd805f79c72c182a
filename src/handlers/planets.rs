use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use serde_json::{json, Value};

use crate::middleware::{ApiResponse, ApiResult};
use crate::services::PlanetService;
use crate::state::AppState;
use crate::validation;

/// POST /planets - planet_name and weather are required, population defaults to 0
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(body) = payload?;
    let planet = validation::new_planet(&body)?;

    let mut tx = state.db.begin().await?;
    let planet_id = PlanetService::create(&mut tx, planet).await?;
    tx.commit().await?;

    Ok(ApiResponse::created(json!({
        "message": "Planet created!",
        "planet_id": planet_id
    })))
}

/// PUT /planets/:planet_id
pub async fn update(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let Path(planet_id) = path?;
    let mut tx = state.db.begin().await?;
    PlanetService::require(&mut tx, planet_id).await?;

    let Json(body) = payload?;
    let changes = validation::planet_changes(&body)?;
    if !changes.is_empty() {
        PlanetService::update(&mut tx, planet_id, changes).await?;
    }
    tx.commit().await?;

    Ok(ApiResponse::success(json!({
        "message": format!("Planet {} updated!", planet_id)
    })))
}

/// DELETE /planets/:planet_id
pub async fn delete(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Value> {
    let Path(planet_id) = path?;
    let mut tx = state.db.begin().await?;
    PlanetService::delete(&mut tx, planet_id).await?;
    tx.commit().await?;

    Ok(ApiResponse::success(json!({
        "message": format!("Planet {} deleted!", planet_id)
    })))
}
