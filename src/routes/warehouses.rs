use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::{
    dto::ledger::{CreateWarehouseRequest, UpdateWarehouseRequest, WarehouseList},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Warehouse,
    response::ApiResponse,
    routes::params::LedgerQuery,
    services::inventory_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_stock).post(add_stock))
        .route("/{id}", get(get_stock).put(update_stock).delete(remove_stock))
}

#[utoipa::path(
    get,
    path = "/api/warehouses",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("water_id" = Option<i32>, Query, description = "Only rows of this water"),
        ("sort_order" = Option<String>, Query, description = "Sort order by id: asc, desc")
    ),
    responses(
        (status = 200, description = "List stock rows", body = ApiResponse<WarehouseList>)
    ),
    tag = "Warehouses"
)]
pub async fn list_stock(
    State(state): State<AppState>,
    Query(query): Query<LedgerQuery>,
) -> AppResult<Json<ApiResponse<WarehouseList>>> {
    let resp = inventory_service::list_stock(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/warehouses/{id}",
    params(
        ("id" = i32, Path, description = "Warehouse row ID")
    ),
    responses(
        (status = 200, description = "Get stock row", body = ApiResponse<Warehouse>),
        (status = 404, description = "Row not found"),
    ),
    tag = "Warehouses"
)]
pub async fn get_stock(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Warehouse>>> {
    let resp = inventory_service::get_stock(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/warehouses",
    request_body = CreateWarehouseRequest,
    responses(
        (status = 200, description = "Stock row added", body = ApiResponse<Warehouse>),
        (status = 403, description = "Forbidden"),
        (status = 422, description = "Unknown water or invalid quantity"),
    ),
    security(("bearer_auth" = [])),
    tag = "Warehouses"
)]
pub async fn add_stock(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateWarehouseRequest>,
) -> AppResult<Json<ApiResponse<Warehouse>>> {
    let resp = inventory_service::add_stock(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/warehouses/{id}",
    params(
        ("id" = i32, Path, description = "Warehouse row ID")
    ),
    request_body = UpdateWarehouseRequest,
    responses(
        (status = 200, description = "Updated stock row", body = ApiResponse<Warehouse>),
        (status = 404, description = "Row not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Warehouses"
)]
pub async fn update_stock(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateWarehouseRequest>,
) -> AppResult<Json<ApiResponse<Warehouse>>> {
    let resp = inventory_service::update_stock(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/warehouses/{id}",
    params(
        ("id" = i32, Path, description = "Warehouse row ID")
    ),
    responses(
        (status = 200, description = "Deleted stock row"),
        (status = 404, description = "Row not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Warehouses"
)]
pub async fn remove_stock(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = inventory_service::remove_stock(&state, &user, id).await?;
    Ok(Json(resp))
}
