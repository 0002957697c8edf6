//! Create `students` table with FK to `companies`.
//!
//! Deleting a company that still has students is rejected by the database.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(uuid(Students::Id).primary_key())
                    .col(string_len(Students::Name, 128).not_null())
                    .col(string_len(Students::Phone, 12).not_null())
                    .col(string_len(Students::Dob, 10).not_null())
                    .col(string_len(Students::Branch, 8).not_null())
                    .col(uuid(Students::CompanyId).not_null())
                    .col(string_len(Students::Status, 16).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_students_company")
                            .from(Students::Table, Students::CompanyId)
                            .to(Companies::Table, Companies::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Students::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Students { Table, Id, Name, Phone, Dob, Branch, CompanyId, Status }

#[derive(DeriveIden)]
enum Companies { Table, Id }
