use sea_orm::entity::prelude::*;

use super::MeasureUnit;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "trades")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub created_by: i32,
    pub created_time: DateTimeWithTimeZone,
    pub last_updated_by: i32,
    pub last_updated_time: DateTimeWithTimeZone,
    pub water_id: i32,
    #[sea_orm(column_type = "Decimal(Some((8, 2)))")]
    pub quantity: Decimal,
    #[sea_orm(column_type = "Decimal(Some((8, 2)))")]
    pub price: Decimal,
    pub unit: MeasureUnit,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::waters::Entity",
        from = "Column::WaterId",
        to = "super::waters::Column::Id",
        on_delete = "Cascade"
    )]
    Waters,
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
}

impl Related<super::waters::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Waters.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
