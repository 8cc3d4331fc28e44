use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::{
    audit::{AuditStamp, Stamped},
    dto::catalog::{CreateWaterRequest, UpdateWaterRequest, WaterList},
    entity::waters::{ActiveModel, Column, Entity as Waters},
    error::{AppError, AppResult, write_error},
    media,
    middleware::auth::{AuthUser, ensure_staff},
    models::Water,
    response::{ApiResponse, Meta},
    routes::params::{SortOrder, WaterQuery},
    state::AppState,
    validation::{validate_fixed_point, validate_product_name},
};

pub async fn list_waters(state: &AppState, query: WaterQuery) -> AppResult<ApiResponse<WaterList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all();

    if let Some(prefix) = query.q.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(Column::Name.starts_with(prefix));
    }
    if let Some(available) = query.available {
        condition = condition.add(Column::Available.eq(available));
    }

    let mut finder = Waters::find().filter(condition);
    finder = match query.sort_order.unwrap_or(SortOrder::Asc) {
        SortOrder::Asc => finder.order_by_asc(Column::Id),
        SortOrder::Desc => finder.order_by_desc(Column::Id),
    };

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Water::from)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Waters", WaterList { items }, Some(meta)))
}

pub async fn find_water(state: &AppState, id: i32) -> AppResult<Water> {
    Waters::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(Water::from)
        .ok_or(AppError::NotFound)
}

pub async fn get_water(state: &AppState, id: i32) -> AppResult<ApiResponse<Water>> {
    let water = find_water(state, id).await?;
    Ok(ApiResponse::success("Water", water, None))
}

pub async fn create_water(
    state: &AppState,
    user: &AuthUser,
    payload: CreateWaterRequest,
) -> AppResult<ApiResponse<Water>> {
    ensure_staff(user)?;
    validate_product_name(&payload.name).map_err(AppError::Validation)?;
    validate_amounts(Some(payload.price), Some(payload.volume))?;

    let mut active = ActiveModel {
        name: Set(payload.name),
        image: Set(None),
        price: Set(payload.price),
        unit: Set(payload.unit),
        description: Set(payload.description),
        available: Set(payload.available.unwrap_or(true)),
        volume: Set(payload.volume),
        ..Default::default()
    };
    active.stamp_created(&AuditStamp::new(user.user_id, Utc::now()));

    let water = active
        .insert(&state.orm)
        .await
        .map_err(|err| write_error(err, "Water already exists."))?;

    tracing::info!(water_id = water.id, created_by = user.user_id, "water created");
    Ok(ApiResponse::success(
        "Water created",
        Water::from(water),
        Some(Meta::empty()),
    ))
}

pub async fn update_water(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    payload: UpdateWaterRequest,
) -> AppResult<ApiResponse<Water>> {
    ensure_staff(user)?;
    if let Some(name) = payload.name.as_deref() {
        validate_product_name(name).map_err(AppError::Validation)?;
    }
    validate_amounts(payload.price, payload.volume)?;

    let existing = Waters::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(price) = payload.price {
        active.price = Set(price);
    }
    if let Some(unit) = payload.unit {
        active.unit = Set(unit);
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(available) = payload.available {
        active.available = Set(available);
    }
    if let Some(volume) = payload.volume {
        active.volume = Set(volume);
    }
    active.stamp_updated(user.user_id, Utc::now());

    let water = active
        .update(&state.orm)
        .await
        .map_err(|err| write_error(err, "Water already exists."))?;

    Ok(ApiResponse::success(
        "Updated",
        Water::from(water),
        Some(Meta::empty()),
    ))
}

/// Deletes a water item; its stock and trade rows go with it.
pub async fn delete_water(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_staff(user)?;
    let result = Waters::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    tracing::info!(water_id = id, deleted_by = user.user_id, "water deleted");
    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

/// Stores an uploaded product image under the dated media directory and
/// points the water item at it.
pub async fn set_water_image(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    file_name: &str,
    contents: &[u8],
) -> AppResult<ApiResponse<Water>> {
    ensure_staff(user)?;
    let existing = Waters::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let now = Utc::now();
    let path = media::store_product_image(&state.config.media_root, now, file_name, contents).await?;

    let mut active: ActiveModel = existing.into();
    active.image = Set(Some(path.clone()));
    active.stamp_updated(user.user_id, now);
    let water = match active.update(&state.orm).await {
        Ok(water) => water,
        Err(err) => {
            media::discard(&state.config.media_root, &path).await;
            return Err(write_error(err, "Image path already in use."));
        }
    };
    tracing::info!(water_id = water.id, path = %path, "water image stored");

    Ok(ApiResponse::success(
        "Image stored",
        Water::from(water),
        Some(Meta::empty()),
    ))
}

fn validate_amounts(price: Option<Decimal>, volume: Option<Decimal>) -> AppResult<()> {
    if let Some(price) = price {
        validate_fixed_point("price", price).map_err(AppError::Validation)?;
    }
    if let Some(volume) = volume {
        validate_fixed_point("volume", volume).map_err(AppError::Validation)?;
    }
    Ok(())
}
