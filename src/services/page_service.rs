use sea_orm::{EntityTrait, LoaderTrait, QueryOrder, QuerySelect};

use crate::{
    dto::pages::{HomeContext, UploadResponse, WaterWarehouse},
    entity::{
        Warehouses,
        waters::{Column, Entity as Waters},
    },
    error::AppResult,
    media,
    models::{Warehouse, Water},
    services::catalog_service,
    state::AppState,
};

/// Number of water items shown on the landing page.
pub const HOME_PAGE_ITEMS: u64 = 3;

/// Builds the landing page context: the first water item is featured, the
/// rest are listed after it.
pub async fn home_page(state: &AppState) -> AppResult<HomeContext> {
    let waters = Waters::find()
        .order_by_asc(Column::Id)
        .limit(HOME_PAGE_ITEMS)
        .all(&state.orm)
        .await?;
    let stock = waters.load_many(Warehouses, &state.orm).await?;

    let mut pairs = waters.into_iter().zip(stock).map(|(water, rows)| {
        let warehouse = rows
            .into_iter()
            .map(|row| Warehouse::from_entity(row, water.name.clone()))
            .collect();
        WaterWarehouse {
            water: Water::from(water),
            warehouse,
        }
    });

    let Some(best) = pairs.next() else {
        return Ok(HomeContext::default());
    };
    Ok(HomeContext {
        best_water_warehouse: Some(best),
        water_warehouses: Some(pairs.collect()),
    })
}

pub async fn product_detail(state: &AppState, id: i32) -> AppResult<Water> {
    catalog_service::find_water(state, id).await
}

pub async fn editor_upload(state: &AppState, file_name: &str, contents: &[u8]) -> AppResult<UploadResponse> {
    let relative = media::store_editor_upload(&state.config.media_root, file_name, contents).await?;
    Ok(UploadResponse {
        location: media::media_url(&relative),
    })
}
