use axum::{
    Json, Router,
    extract::{Path, State},
    routing::delete,
};

use crate::{
    error::AppResult, middleware::auth::AuthUser, response::ApiResponse,
    services::account_service, state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", delete(delete_user))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User and everything it owns deleted"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "User not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = account_service::delete_user(&state, &user, id).await?;
    Ok(Json(resp))
}
