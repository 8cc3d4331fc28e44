use sea_orm_migration::{prelude::*, schema::*};

use super::{Trades, Users, Warehouses, Waters};

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Adds the creator / last-updater columns shared by every audited table.
fn audit_columns(table: &mut TableCreateStatement, name: &str) -> TableCreateStatement {
    table
        .col(integer(Alias::new("created_by")))
        .col(timestamp_with_time_zone(Alias::new("created_time")))
        .col(integer(Alias::new("last_updated_by")))
        .col(timestamp_with_time_zone(Alias::new("last_updated_time")))
        .foreign_key(
            ForeignKey::create()
                .name(format!("fk_{name}_created_by"))
                .from(Alias::new(name), Alias::new("created_by"))
                .to(Users::Table, Users::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .on_update(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name(format!("fk_{name}_last_updated_by"))
                .from(Alias::new(name), Alias::new("last_updated_by"))
                .to(Users::Table, Users::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .on_update(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string_len(Users::Phone, 12).unique_key())
                    .col(string_len_null(Users::Username, 150).unique_key())
                    .col(string_len(Users::Email, 254).default(""))
                    .col(string_len(Users::Password, 128))
                    .col(string_len(Users::FirstName, 150).default(""))
                    .col(string_len(Users::LastName, 150).default(""))
                    .col(boolean(Users::IsActive).default(true))
                    .col(boolean(Users::IsStaff).default(false))
                    .col(boolean(Users::IsSuperuser).default(false))
                    .col(timestamp_with_time_zone(Users::DateJoined))
                    .col(timestamp_with_time_zone_null(Users::LastLogin))
                    .to_owned(),
            )
            .await?;

        let mut waters = Table::create()
            .table(Waters::Table)
            .if_not_exists()
            .col(pk_auto(Waters::Id))
            .col(string_len(Waters::Name, 64))
            .col(decimal_len(Waters::Price, 8, 2))
            .col(string_len(Waters::Unit, 32).default("l"))
            .col(text(Waters::Description))
            .col(decimal_len(Waters::Volume, 8, 2))
            .to_owned();
        manager
            .create_table(audit_columns(&mut waters, "waters"))
            .await?;

        let mut warehouses = Table::create()
            .table(Warehouses::Table)
            .if_not_exists()
            .col(pk_auto(Warehouses::Id))
            .col(integer(Warehouses::WaterId))
            .col(decimal_len(Warehouses::Quantity, 8, 2))
            .col(string_len(Warehouses::Unit, 32).default("pcs"))
            .foreign_key(
                ForeignKey::create()
                    .name("fk_warehouses_water")
                    .from(Warehouses::Table, Warehouses::WaterId)
                    .to(Waters::Table, Waters::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .on_update(ForeignKeyAction::Cascade),
            )
            .to_owned();
        manager
            .create_table(audit_columns(&mut warehouses, "warehouses"))
            .await?;

        let mut trades = Table::create()
            .table(Trades::Table)
            .if_not_exists()
            .col(pk_auto(Trades::Id))
            .col(integer(Trades::WaterId))
            .col(decimal_len(Trades::Quantity, 8, 2))
            .col(decimal_len(Trades::Price, 8, 2))
            .col(string_len(Trades::Unit, 32).default("pcs"))
            .foreign_key(
                ForeignKey::create()
                    .name("fk_trades_water")
                    .from(Trades::Table, Trades::WaterId)
                    .to(Waters::Table, Waters::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .on_update(ForeignKeyAction::Cascade),
            )
            .to_owned();
        manager
            .create_table(audit_columns(&mut trades, "trades"))
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_warehouses_water_id")
                    .table(Warehouses::Table)
                    .col(Warehouses::WaterId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_trades_water_id")
                    .table(Trades::Table)
                    .col(Trades::WaterId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Trades::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Warehouses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Waters::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}
