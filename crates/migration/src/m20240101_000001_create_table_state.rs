//! Create `table_state` table.
//! Holds the single grid record: serialized cell data plus column and row sizing.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // The id is assigned by the application, not by a sequence.
        manager
            .create_table(
                Table::create()
                    .table(TableState::Table)
                    .if_not_exists()
                    .col(integer(TableState::Id).primary_key())
                    .col(text(TableState::Data).not_null())
                    .col(text(TableState::ColWidths).not_null())
                    .col(text(TableState::RowHeights).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(TableState::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum TableState {
    Table,
    Id,
    Data,
    ColWidths,
    RowHeights,
}
