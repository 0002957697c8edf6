use sea_orm::{DatabaseConnection, DbErr, EntityTrait, QueryOrder};
use tracing::error;
use uuid::Uuid;

use models::{company, student};

use crate::company::repository::CompanyRepository;
use crate::domain::{Company, NewCompany, NewStudent, Student};
use crate::errors::ServiceError;
use crate::query::StudentFilter;
use crate::student::repository::StudentRepository;

fn read_error(e: DbErr) -> ServiceError {
    error!(error = %e, "database read failed");
    ServiceError::server_error()
}

fn non_empty(rows: Vec<Student>) -> Result<Vec<Student>, ServiceError> {
    if rows.is_empty() {
        return Err(ServiceError::no_rows());
    }
    Ok(rows)
}

async fn find_company(db: &DatabaseConnection, id: Uuid) -> Result<Company, ServiceError> {
    company::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(read_error)?
        .map(Company::from)
        .ok_or_else(|| ServiceError::id_not_found(id))
}

#[derive(Clone)]
pub struct SeaOrmCompanyRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl CompanyRepository for SeaOrmCompanyRepository {
    async fn list(&self) -> Result<Vec<Company>, ServiceError> {
        let rows = company::Entity::find()
            .order_by_asc(company::Column::Name)
            .all(&self.db)
            .await
            .map_err(read_error)?;
        Ok(rows.into_iter().map(Company::from).collect())
    }

    async fn get(&self, id: Uuid) -> Result<Company, ServiceError> { find_company(&self.db, id).await }

    async fn create(&self, input: NewCompany) -> Result<Company, ServiceError> {
        let m = company::create(&self.db, &input.name, input.category).await?;
        Ok(m.into())
    }

    async fn update(&self, id: Uuid, input: NewCompany) -> Result<Company, ServiceError> {
        let m = company::update(&self.db, id, &input.name, input.category).await?;
        Ok(m.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        company::delete(&self.db, id).await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct SeaOrmStudentRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl StudentRepository for SeaOrmStudentRepository {
    async fn list(&self, filter: &StudentFilter) -> Result<Vec<Student>, ServiceError> {
        let rows = filter
            .apply(student::Entity::find())
            .order_by_asc(student::Column::Name)
            .all(&self.db)
            .await
            .map_err(read_error)?;
        non_empty(rows.into_iter().map(|m| Student::from_model(m, None)).collect())
    }

    async fn list_with_company(&self, filter: &StudentFilter) -> Result<Vec<Student>, ServiceError> {
        let rows = filter
            .apply(student::Entity::find().find_also_related(company::Entity))
            .order_by_asc(student::Column::Name)
            .all(&self.db)
            .await
            .map_err(read_error)?;
        non_empty(rows.into_iter().map(|(s, c)| Student::from_model(s, c)).collect())
    }

    async fn get(&self, id: Uuid) -> Result<Student, ServiceError> {
        let (s, c) = student::Entity::find_by_id(id)
            .find_also_related(company::Entity)
            .one(&self.db)
            .await
            .map_err(read_error)?
            .ok_or_else(|| ServiceError::id_not_found(id))?;
        Ok(Student::from_model(s, c))
    }

    async fn create(&self, input: NewStudent) -> Result<Student, ServiceError> {
        let m = student::create(&self.db, input.into()).await?;
        Ok(Student::from_model(m, None))
    }

    async fn update(&self, id: Uuid, input: NewStudent) -> Result<Student, ServiceError> {
        let m = student::update(&self.db, id, input.into()).await?;
        Ok(Student::from_model(m, None))
    }

    async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        student::delete(&self.db, id).await?;
        Ok(())
    }

    async fn get_company(&self, id: Uuid) -> Result<Company, ServiceError> { find_company(&self.db, id).await }
}
