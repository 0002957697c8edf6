//! Create `companies` table.
//!
//! Category is stored as its wire string (`MASS`, `DREAM IT`, `OPEN DREAM`, `CORE`).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Companies::Table)
                    .if_not_exists()
                    .col(uuid(Companies::Id).primary_key())
                    .col(string_len(Companies::Name, 128).not_null())
                    .col(string_len(Companies::Category, 16).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Companies::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Companies { Table, Id, Name, Category }
