use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use serde_json::{json, Value};

use crate::middleware::{ApiResponse, ApiResult};
use crate::services::PeopleService;
use crate::state::AppState;
use crate::validation;

/// POST /people
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(body) = payload?;
    let person = validation::new_person(&body)?;

    let mut tx = state.db.begin().await?;
    let person_id = PeopleService::create(&mut tx, person).await?;
    tx.commit().await?;

    Ok(ApiResponse::created(json!({
        "message": "Person created!",
        "person_id": person_id
    })))
}

/// PUT /people/:people_id - only the supplied fields change
pub async fn update(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let Path(people_id) = path?;
    let mut tx = state.db.begin().await?;
    PeopleService::require(&mut tx, people_id).await?;

    let Json(body) = payload?;
    let changes = validation::person_changes(&body)?;
    if !changes.is_empty() {
        PeopleService::update(&mut tx, people_id, changes).await?;
    }
    tx.commit().await?;

    Ok(ApiResponse::success(json!({
        "message": format!("Person {} updated!", people_id)
    })))
}

/// DELETE /people/:people_id
pub async fn delete(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Value> {
    let Path(people_id) = path?;
    let mut tx = state.db.begin().await?;
    PeopleService::delete(&mut tx, people_id).await?;
    tx.commit().await?;

    Ok(ApiResponse::success(json!({
        "message": format!("Person {} deleted!", people_id)
    })))
}
