use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    audit::AuditStamp,
    entity::{MeasureUnit, trades, users, warehouses, waters},
    validation::DECIMAL_PLACES,
};

/// Currency suffix used when a trade is rendered as text.
pub const CURRENCY: &str = "UZS";

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct User {
    pub id: i32,
    pub phone: String,
    pub username: Option<String>,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub date_joined: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            phone: model.phone,
            username: model.username,
            email: model.email,
            password: model.password,
            first_name: model.first_name,
            last_name: model.last_name,
            is_active: model.is_active,
            is_staff: model.is_staff,
            is_superuser: model.is_superuser,
            date_joined: model.date_joined.with_timezone(&Utc),
            last_login: model.last_login.map(|t| t.with_timezone(&Utc)),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Water {
    pub id: i32,
    pub name: String,
    pub image: Option<String>,
    #[schema(value_type = String, example = "12000.00")]
    pub price: Decimal,
    pub unit: MeasureUnit,
    pub description: String,
    pub available: bool,
    #[schema(value_type = String, example = "1.50")]
    pub volume: Decimal,
    #[serde(flatten)]
    pub audit: AuditStamp,
}

impl From<waters::Model> for Water {
    fn from(model: waters::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            image: model.image,
            price: fixed(model.price),
            unit: model.unit,
            description: model.description,
            available: model.available,
            volume: fixed(model.volume),
            audit: AuditStamp::from_columns(
                model.created_by,
                model.created_time,
                model.last_updated_by,
                model.last_updated_time,
            ),
        }
    }
}

impl fmt::Display for Water {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// One stock lot of a water item.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Warehouse {
    pub id: i32,
    pub water_id: i32,
    pub water_name: String,
    #[schema(value_type = String, example = "120.00")]
    pub quantity: Decimal,
    pub unit: MeasureUnit,
    #[serde(flatten)]
    pub audit: AuditStamp,
}

impl Warehouse {
    pub fn from_entity(model: warehouses::Model, water_name: impl Into<String>) -> Self {
        Self {
            id: model.id,
            water_id: model.water_id,
            water_name: water_name.into(),
            quantity: fixed(model.quantity),
            unit: model.unit,
            audit: AuditStamp::from_columns(
                model.created_by,
                model.created_time,
                model.last_updated_by,
                model.last_updated_time,
            ),
        }
    }
}

impl fmt::Display for Warehouse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} {}", self.water_name, self.quantity, self.unit)
    }
}

/// A single sale of a water item.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Trade {
    pub id: i32,
    pub water_id: i32,
    pub water_name: String,
    #[schema(value_type = String, example = "10.00")]
    pub quantity: Decimal,
    #[schema(value_type = String, example = "12000.00")]
    pub price: Decimal,
    pub unit: MeasureUnit,
    #[serde(flatten)]
    pub audit: AuditStamp,
}

impl Trade {
    pub fn from_entity(model: trades::Model, water_name: impl Into<String>) -> Self {
        Self {
            id: model.id,
            water_id: model.water_id,
            water_name: water_name.into(),
            quantity: fixed(model.quantity),
            price: fixed(model.price),
            unit: model.unit,
            audit: AuditStamp::from_columns(
                model.created_by,
                model.created_time,
                model.last_updated_by,
                model.last_updated_time,
            ),
        }
    }
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} {} - {} {CURRENCY}",
            self.water_name, self.quantity, self.unit, self.price
        )
    }
}

/// Brings a stored value back to the column's two decimal places; some
/// backends hand decimals back with their trailing zeros stripped.
pub fn fixed(value: Decimal) -> Decimal {
    let mut value = value;
    value.rescale(DECIMAL_PLACES);
    value
}
