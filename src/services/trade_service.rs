use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::{
    audit::{AuditStamp, Stamped},
    dto::ledger::{CreateTradeRequest, TradeList},
    entity::{
        Waters,
        trades::{ActiveModel, Column, Entity as Trades, Model as TradeModel},
        waters::Model as WaterModel,
    },
    error::{AppError, AppResult, write_error},
    middleware::auth::{AuthUser, ensure_staff},
    models::Trade,
    response::{ApiResponse, Meta},
    routes::params::{LedgerQuery, SortOrder},
    state::AppState,
    validation::validate_fixed_point,
};

/// Trades are history: newest first unless asked otherwise.
pub async fn list_trades(state: &AppState, query: LedgerQuery) -> AppResult<ApiResponse<TradeList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all();
    if let Some(water_id) = query.water_id {
        condition = condition.add(Column::WaterId.eq(water_id));
    }

    let mut finder = Trades::find().filter(condition);
    finder = match query.sort_order.unwrap_or(SortOrder::Desc) {
        SortOrder::Asc => finder.order_by_asc(Column::Id),
        SortOrder::Desc => finder.order_by_desc(Column::Id),
    };

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .find_also_related(Waters)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(trade_with_water)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Trades", TradeList { items }, Some(meta)))
}

pub async fn get_trade(state: &AppState, id: i32) -> AppResult<ApiResponse<Trade>> {
    let trade = Trades::find_by_id(id)
        .find_also_related(Waters)
        .one(&state.orm)
        .await?
        .map(trade_with_water)
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Trade", trade, None))
}

pub async fn record_trade(
    state: &AppState,
    user: &AuthUser,
    payload: CreateTradeRequest,
) -> AppResult<ApiResponse<Trade>> {
    ensure_staff(user)?;
    validate_fixed_point("quantity", payload.quantity).map_err(AppError::Validation)?;
    validate_fixed_point("price", payload.price).map_err(AppError::Validation)?;

    let water = Waters::find_by_id(payload.water_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::validation("Water does not exist."))?;

    let mut active = ActiveModel {
        water_id: Set(water.id),
        quantity: Set(payload.quantity),
        price: Set(payload.price),
        unit: Set(payload.unit),
        ..Default::default()
    };
    active.stamp_created(&AuditStamp::new(user.user_id, Utc::now()));

    let row = active
        .insert(&state.orm)
        .await
        .map_err(|err| write_error(err, "Trade already exists."))?;

    let trade = Trade::from_entity(row, water.name);
    tracing::info!(trade_id = trade.id, trade = %trade, "trade recorded");
    Ok(ApiResponse::success("Trade recorded", trade, Some(Meta::empty())))
}

pub async fn delete_trade(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_staff(user)?;
    let result = Trades::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    tracing::info!(trade_id = id, deleted_by = user.user_id, "trade deleted");
    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

fn trade_with_water((row, water): (TradeModel, Option<WaterModel>)) -> Trade {
    let name = water.map(|w| w.name).unwrap_or_default();
    Trade::from_entity(row, name)
}
