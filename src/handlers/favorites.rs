use axum::extract::{rejection::PathRejection, Path, State};
use serde_json::{json, Value};

use crate::database::models::FavoriteTarget;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::FavoriteService;
use crate::state::AppState;

/// POST /users/:user_id/favorite/planet/:planet_id
pub async fn add_planet(
    State(state): State<AppState>,
    path: Result<Path<(i64, i64)>, PathRejection>,
) -> ApiResult<Value> {
    let Path((user_id, planet_id)) = path?;
    add(&state, user_id, FavoriteTarget::Planet(planet_id)).await
}

/// DELETE /users/:user_id/favorite/planet/:planet_id
pub async fn remove_planet(
    State(state): State<AppState>,
    path: Result<Path<(i64, i64)>, PathRejection>,
) -> ApiResult<Value> {
    let Path((user_id, planet_id)) = path?;
    remove(&state, user_id, FavoriteTarget::Planet(planet_id)).await
}

/// POST /users/:user_id/favorite/people/:people_id
pub async fn add_people(
    State(state): State<AppState>,
    path: Result<Path<(i64, i64)>, PathRejection>,
) -> ApiResult<Value> {
    let Path((user_id, people_id)) = path?;
    add(&state, user_id, FavoriteTarget::Person(people_id)).await
}

/// DELETE /users/:user_id/favorite/people/:people_id
pub async fn remove_people(
    State(state): State<AppState>,
    path: Result<Path<(i64, i64)>, PathRejection>,
) -> ApiResult<Value> {
    let Path((user_id, people_id)) = path?;
    remove(&state, user_id, FavoriteTarget::Person(people_id)).await
}

async fn add(state: &AppState, user_id: i64, target: FavoriteTarget) -> ApiResult<Value> {
    let mut tx = state.db.begin().await?;
    let favorite = FavoriteService::add(&mut tx, user_id, target).await?;
    tx.commit().await?;

    Ok(ApiResponse::created(json!({
        "message": format!(
            "{} {} added to user {}'s favorites!",
            favorite.target.label(),
            favorite.target.id(),
            favorite.user_id
        )
    })))
}

async fn remove(state: &AppState, user_id: i64, target: FavoriteTarget) -> ApiResult<Value> {
    let mut tx = state.db.begin().await?;
    FavoriteService::remove(&mut tx, user_id, target).await?;
    tx.commit().await?;

    Ok(ApiResponse::success(json!({
        "message": format!("{} {} removed from user {}'s favorites!", target.label(), target.id(), user_id)
    })))
}
