use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, State},
    routing::{get, post},
};

use crate::{
    dto::catalog::{CreateWaterRequest, UpdateWaterRequest, WaterList},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Water,
    response::ApiResponse,
    routes::params::WaterQuery,
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_waters).post(create_water))
        .route("/{id}", get(get_water).put(update_water).delete(delete_water))
        .route("/{id}/image", post(upload_image))
}

#[utoipa::path(
    get,
    path = "/api/waters",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("q" = Option<String>, Query, description = "Name prefix"),
        ("available" = Option<bool>, Query, description = "Filter by availability"),
        ("sort_order" = Option<String>, Query, description = "Sort order by id: asc, desc")
    ),
    responses(
        (status = 200, description = "List waters", body = ApiResponse<WaterList>)
    ),
    tag = "Waters"
)]
pub async fn list_waters(
    State(state): State<AppState>,
    Query(query): Query<WaterQuery>,
) -> AppResult<Json<ApiResponse<WaterList>>> {
    let resp = catalog_service::list_waters(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/waters/{id}",
    params(
        ("id" = i32, Path, description = "Water ID")
    ),
    responses(
        (status = 200, description = "Get water", body = ApiResponse<Water>),
        (status = 404, description = "Water not found"),
    ),
    tag = "Waters"
)]
pub async fn get_water(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Water>>> {
    let resp = catalog_service::get_water(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/waters",
    request_body = CreateWaterRequest,
    responses(
        (status = 200, description = "Create water", body = ApiResponse<Water>),
        (status = 403, description = "Forbidden"),
        (status = 422, description = "Invalid name or amount"),
    ),
    security(("bearer_auth" = [])),
    tag = "Waters"
)]
pub async fn create_water(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateWaterRequest>,
) -> AppResult<Json<ApiResponse<Water>>> {
    let resp = catalog_service::create_water(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/waters/{id}",
    params(
        ("id" = i32, Path, description = "Water ID")
    ),
    request_body = UpdateWaterRequest,
    responses(
        (status = 200, description = "Updated water", body = ApiResponse<Water>),
        (status = 404, description = "Water not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Waters"
)]
pub async fn update_water(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateWaterRequest>,
) -> AppResult<Json<ApiResponse<Water>>> {
    let resp = catalog_service::update_water(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/waters/{id}",
    params(
        ("id" = i32, Path, description = "Water ID")
    ),
    responses(
        (status = 200, description = "Deleted water with its stock and trades"),
        (status = 404, description = "Water not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Waters"
)]
pub async fn delete_water(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = catalog_service::delete_water(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/waters/{id}/image",
    params(
        ("id" = i32, Path, description = "Water ID")
    ),
    request_body(content = String, content_type = "multipart/form-data", description = "Image in the `image` field"),
    responses(
        (status = 200, description = "Image stored", body = ApiResponse<Water>),
        (status = 400, description = "No image in the request"),
        (status = 404, description = "Water not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Waters"
)]
pub async fn upload_image(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    mut multipart: Multipart,
) -> AppResult<Json<ApiResponse<Water>>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("image") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let contents = field.bytes().await?;
        let resp = catalog_service::set_water_image(&state, &user, id, &file_name, &contents).await?;
        return Ok(Json(resp));
    }
    Err(AppError::BadRequest("Missing `image` field".into()))
}
