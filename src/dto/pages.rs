use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Warehouse, Water};

/// A water item together with all of its stock rows.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WaterWarehouse {
    pub water: Water,
    pub warehouse: Vec<Warehouse>,
}

/// Context handed to the landing page. Both keys are absent when the catalog
/// is empty.
#[derive(Debug, Default, Serialize, ToSchema)]
pub struct HomeContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_water_warehouse: Option<WaterWarehouse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_warehouses: Option<Vec<WaterWarehouse>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub location: String,
}
