use sea_orm::entity::prelude::*;

use super::MeasureUnit;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "waters")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub created_by: i32,
    pub created_time: DateTimeWithTimeZone,
    pub last_updated_by: i32,
    pub last_updated_time: DateTimeWithTimeZone,
    #[sea_orm(indexed)]
    pub name: String,
    pub image: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((8, 2)))")]
    pub price: Decimal,
    pub unit: MeasureUnit,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub available: bool,
    #[sea_orm(column_type = "Decimal(Some((8, 2)))")]
    pub volume: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedBy",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    Creator,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::LastUpdatedBy",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    Updater,
    #[sea_orm(has_many = "super::warehouses::Entity")]
    Warehouses,
    #[sea_orm(has_many = "super::trades::Entity")]
    Trades,
}

impl Related<super::warehouses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Warehouses.def()
    }
}

impl Related<super::trades::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Trades.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
