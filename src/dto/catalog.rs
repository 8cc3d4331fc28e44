use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{entity::MeasureUnit, models::Water};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateWaterRequest {
    pub name: String,
    #[schema(value_type = String, example = "4500.00")]
    pub price: Decimal,
    #[serde(default = "MeasureUnit::catalog_default")]
    pub unit: MeasureUnit,
    #[serde(default)]
    pub description: String,
    pub available: Option<bool>,
    #[schema(value_type = String, example = "1.50")]
    pub volume: Decimal,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateWaterRequest {
    pub name: Option<String>,
    #[schema(value_type = Option<String>)]
    pub price: Option<Decimal>,
    pub unit: Option<MeasureUnit>,
    pub description: Option<String>,
    pub available: Option<bool>,
    #[schema(value_type = Option<String>)]
    pub volume: Option<Decimal>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct WaterList {
    #[schema(value_type = Vec<Water>)]
    pub items: Vec<Water>,
}
