use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::{
    audit::{AuditStamp, Stamped},
    dto::ledger::{CreateWarehouseRequest, UpdateWarehouseRequest, WarehouseList},
    entity::{
        Waters,
        warehouses::{ActiveModel, Column, Entity as Warehouses, Model as WarehouseModel},
        waters::Model as WaterModel,
    },
    error::{AppError, AppResult, write_error},
    middleware::auth::{AuthUser, ensure_staff},
    models::Warehouse,
    response::{ApiResponse, Meta},
    routes::params::{LedgerQuery, SortOrder},
    state::AppState,
    validation::validate_fixed_point,
};

/// Lists stock rows. Each row is an independent lot; totals are left to the
/// caller.
pub async fn list_stock(state: &AppState, query: LedgerQuery) -> AppResult<ApiResponse<WarehouseList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all();
    if let Some(water_id) = query.water_id {
        condition = condition.add(Column::WaterId.eq(water_id));
    }

    let mut finder = Warehouses::find().filter(condition);
    finder = match query.sort_order.unwrap_or(SortOrder::Asc) {
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
        .map(warehouse_with_water)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Stock", WarehouseList { items }, Some(meta)))
}

pub async fn get_stock(state: &AppState, id: i32) -> AppResult<ApiResponse<Warehouse>> {
    let row = Warehouses::find_by_id(id)
        .find_also_related(Waters)
        .one(&state.orm)
        .await?
        .map(warehouse_with_water)
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Stock", row, None))
}

pub async fn add_stock(
    state: &AppState,
    user: &AuthUser,
    payload: CreateWarehouseRequest,
) -> AppResult<ApiResponse<Warehouse>> {
    ensure_staff(user)?;
    validate_fixed_point("quantity", payload.quantity).map_err(AppError::Validation)?;

    let water = Waters::find_by_id(payload.water_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::validation("Water does not exist."))?;

    let mut active = ActiveModel {
        water_id: Set(water.id),
        quantity: Set(payload.quantity),
        unit: Set(payload.unit),
        ..Default::default()
    };
    active.stamp_created(&AuditStamp::new(user.user_id, Utc::now()));

    let row = active
        .insert(&state.orm)
        .await
        .map_err(|err| write_error(err, "Stock entry already exists."))?;

    tracing::info!(
        warehouse_id = row.id,
        water_id = water.id,
        quantity = %row.quantity,
        "stock added"
    );
    Ok(ApiResponse::success(
        "Stock added",
        Warehouse::from_entity(row, water.name),
        Some(Meta::empty()),
    ))
}

pub async fn update_stock(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    payload: UpdateWarehouseRequest,
) -> AppResult<ApiResponse<Warehouse>> {
    ensure_staff(user)?;
    if let Some(quantity) = payload.quantity {
        validate_fixed_point("quantity", quantity).map_err(AppError::Validation)?;
    }

    let (existing, water) = Warehouses::find_by_id(id)
        .find_also_related(Waters)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: ActiveModel = existing.into();
    if let Some(quantity) = payload.quantity {
        active.quantity = Set(quantity);
    }
    if let Some(unit) = payload.unit {
        active.unit = Set(unit);
    }
    active.stamp_updated(user.user_id, Utc::now());
    let row = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Updated",
        warehouse_with_water((row, water)),
        Some(Meta::empty()),
    ))
}

pub async fn remove_stock(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_staff(user)?;
    let result = Warehouses::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

fn warehouse_with_water((row, water): (WarehouseModel, Option<WaterModel>)) -> Warehouse {
    let name = water.map(|w| w.name).unwrap_or_default();
    Warehouse::from_entity(row, name)
}
