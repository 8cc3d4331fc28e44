use sea_orm_migration::{prelude::*, schema::*};

use super::Waters;

#[derive(DeriveMigrationName)]
pub struct Migration;

const NAME_INDEX: &str = "idx_waters_name";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // SQLite accepts a single column per ALTER TABLE.
        manager
            .alter_table(
                Table::alter()
                    .table(Waters::Table)
                    .add_column(boolean(Waters::Available).default(true))
                    .to_owned(),
            )
            .await?;
        manager
            .alter_table(
                Table::alter()
                    .table(Waters::Table)
                    .add_column(string_len_null(Waters::Image, 100))
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name(NAME_INDEX)
                    .table(Waters::Table)
                    .col(Waters::Name)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name(NAME_INDEX).table(Waters::Table).to_owned())
            .await?;
        manager
            .alter_table(
                Table::alter()
                    .table(Waters::Table)
                    .drop_column(Waters::Image)
                    .to_owned(),
            )
            .await?;
        manager
            .alter_table(
                Table::alter()
                    .table(Waters::Table)
                    .drop_column(Waters::Available)
                    .to_owned(),
            )
            .await
    }
}
