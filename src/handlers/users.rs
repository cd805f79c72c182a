use axum::extract::{rejection::PathRejection, Path, State};

use crate::database::models::User;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{FavoriteService, UserFavorites, UserService};
use crate::state::AppState;

/// GET /users
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    let mut conn = state.db.acquire().await?;
    let users = UserService::list(&mut conn).await?;
    Ok(ApiResponse::success(users))
}

/// GET /users/:user_id/favorites
///
/// An unknown user simply has no favorites.
pub async fn favorites(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<UserFavorites> {
    let Path(user_id) = path?;
    let mut conn = state.db.acquire().await?;
    let favorites = FavoriteService::list_for_user(&mut conn, user_id).await?;
    Ok(ApiResponse::success(favorites))
}
