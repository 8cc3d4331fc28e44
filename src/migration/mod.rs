pub use sea_orm_migration::prelude::*;

mod m20230129_000001_initial_schema;
mod m20230130_000002_water_available_image_and_name_index;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20230129_000001_initial_schema::Migration),
            Box::new(m20230130_000002_water_available_image_and_name_index::Migration),
        ]
    }
}

#[derive(DeriveIden)]
pub(crate) enum Users {
    Table,
    Id,
    Phone,
    Username,
    Email,
    Password,
    FirstName,
    LastName,
    IsActive,
    IsStaff,
    IsSuperuser,
    DateJoined,
    LastLogin,
}

#[derive(DeriveIden)]
pub(crate) enum Waters {
    Table,
    Id,
    Name,
    Image,
    Price,
    Unit,
    Description,
    Available,
    Volume,
}

#[derive(DeriveIden)]
pub(crate) enum Warehouses {
    Table,
    Id,
    WaterId,
    Quantity,
    Unit,
}

#[derive(DeriveIden)]
pub(crate) enum Trades {
    Table,
    Id,
    WaterId,
    Quantity,
    Price,
    Unit,
}
