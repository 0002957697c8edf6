use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // List filters: exact match on name and/or branch
        manager
            .create_index(
                Index::create()
                    .name("idx_students_name")
                    .table(Students::Table)
                    .col(Students::Name)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_students_branch")
                    .table(Students::Table)
                    .col(Students::Branch)
                    .to_owned(),
            )
            .await?;

        // Join with companies
        manager
            .create_index(
                Index::create()
                    .name("idx_students_company")
                    .table(Students::Table)
                    .col(Students::CompanyId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in ["idx_students_company", "idx_students_branch", "idx_students_name"] {
            manager
                .drop_index(Index::drop().name(name).table(Students::Table).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Students { Table, Name, Branch, CompanyId }
