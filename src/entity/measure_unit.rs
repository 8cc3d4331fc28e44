use std::fmt;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Unit a price or a quantity is expressed in. Stored as its short code.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum MeasureUnit {
    #[sea_orm(string_value = "kg")]
    #[serde(rename = "kg")]
    Kilogram,
    #[sea_orm(string_value = "l")]
    #[serde(rename = "l")]
    Litre,
    #[sea_orm(string_value = "pcs")]
    #[serde(rename = "pcs")]
    Piece,
}

impl MeasureUnit {
    /// Default unit for catalog items.
    pub fn catalog_default() -> Self {
        MeasureUnit::Litre
    }

    /// Default unit for stock and trade rows.
    pub fn ledger_default() -> Self {
        MeasureUnit::Piece
    }

    pub fn code(self) -> &'static str {
        match self {
            MeasureUnit::Kilogram => "kg",
            MeasureUnit::Litre => "l",
            MeasureUnit::Piece => "pcs",
        }
    }
}

impl fmt::Display for MeasureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
