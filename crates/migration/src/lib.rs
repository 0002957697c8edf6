//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_companies;
mod m20240301_000002_create_students;
mod m20240301_000003_add_student_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_companies::Migration),
            Box::new(m20240301_000002_create_students::Migration),
            // Indexes should always be applied last
            Box::new(m20240301_000003_add_student_indexes::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm_migration::sea_orm::Database;

    #[tokio::test]
    async fn migrations_apply_and_roll_back_on_sqlite() -> Result<(), DbErr> {
        let db = Database::connect("sqlite::memory:").await?;
        Migrator::up(&db, None).await?;

        let manager = SchemaManager::new(&db);
        assert!(manager.has_table("companies").await?);
        assert!(manager.has_table("students").await?);
        assert!(manager.has_index("students", "idx_students_branch").await?);

        Migrator::down(&db, None).await?;
        assert!(!manager.has_table("students").await?);
        assert!(!manager.has_table("companies").await?);
        Ok(())
    }
}
