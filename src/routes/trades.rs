use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::{
    dto::ledger::{CreateTradeRequest, TradeList},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Trade,
    response::ApiResponse,
    routes::params::LedgerQuery,
    services::trade_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_trades).post(record_trade))
        .route("/{id}", get(get_trade).delete(delete_trade))
}

#[utoipa::path(
    get,
    path = "/api/trades",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("water_id" = Option<i32>, Query, description = "Only trades of this water"),
        ("sort_order" = Option<String>, Query, description = "Sort order by id: asc, desc (default)")
    ),
    responses(
        (status = 200, description = "List trades", body = ApiResponse<TradeList>)
    ),
    tag = "Trades"
)]
pub async fn list_trades(
    State(state): State<AppState>,
    Query(query): Query<LedgerQuery>,
) -> AppResult<Json<ApiResponse<TradeList>>> {
    let resp = trade_service::list_trades(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/trades/{id}",
    params(
        ("id" = i32, Path, description = "Trade ID")
    ),
    responses(
        (status = 200, description = "Get trade", body = ApiResponse<Trade>),
        (status = 404, description = "Trade not found"),
    ),
    tag = "Trades"
)]
pub async fn get_trade(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Trade>>> {
    let resp = trade_service::get_trade(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/trades",
    request_body = CreateTradeRequest,
    responses(
        (status = 200, description = "Trade recorded", body = ApiResponse<Trade>),
        (status = 403, description = "Forbidden"),
        (status = 422, description = "Unknown water or invalid amount"),
    ),
    security(("bearer_auth" = [])),
    tag = "Trades"
)]
pub async fn record_trade(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateTradeRequest>,
) -> AppResult<Json<ApiResponse<Trade>>> {
    let resp = trade_service::record_trade(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/trades/{id}",
    params(
        ("id" = i32, Path, description = "Trade ID")
    ),
    responses(
        (status = 200, description = "Deleted trade"),
        (status = 404, description = "Trade not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Trades"
)]
pub async fn delete_trade(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = trade_service::delete_trade(&state, &user, id).await?;
    Ok(Json(resp))
}
