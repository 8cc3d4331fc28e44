use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    entity::MeasureUnit,
    models::{Trade, Warehouse},
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateWarehouseRequest {
    pub water_id: i32,
    #[schema(value_type = String, example = "120.00")]
    pub quantity: Decimal,
    #[serde(default = "MeasureUnit::ledger_default")]
    pub unit: MeasureUnit,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateWarehouseRequest {
    #[schema(value_type = Option<String>)]
    pub quantity: Option<Decimal>,
    pub unit: Option<MeasureUnit>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTradeRequest {
    pub water_id: i32,
    #[schema(value_type = String, example = "10.00")]
    pub quantity: Decimal,
    #[schema(value_type = String, example = "45000.00")]
    pub price: Decimal,
    #[serde(default = "MeasureUnit::ledger_default")]
    pub unit: MeasureUnit,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct WarehouseList {
    #[schema(value_type = Vec<Warehouse>)]
    pub items: Vec<Warehouse>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct TradeList {
    #[schema(value_type = Vec<Trade>)]
    pub items: Vec<Trade>,
}
