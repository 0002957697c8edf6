use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::{Company, CompanyInput};
use crate::errors::ServiceError;
use crate::validation::{require_company_fields, validate_company};

use super::repository::CompanyRepository;

/// Company business service independent of web framework
pub struct CompanyService<R: CompanyRepository + ?Sized = dyn CompanyRepository> {
    repo: Arc<R>,
}

impl<R: CompanyRepository + ?Sized> CompanyService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn list(&self) -> Result<Vec<Company>, ServiceError> { self.repo.list().await }

    pub async fn get(&self, id: Uuid) -> Result<Company, ServiceError> { self.repo.get(id).await }

    /// Validate and store a new company.
    ///
    /// # Examples
    /// ```
    /// use service::company::{CompanyService, repository::mock::MockCompanyRepository};
    /// use service::domain::CompanyInput;
    /// use std::sync::Arc;
    /// let svc = CompanyService::new(Arc::new(MockCompanyRepository::default()));
    /// let input = CompanyInput { name: "Wipro".into(), category: "MASS".into() };
    /// let company = tokio_test::block_on(svc.create(input)).unwrap();
    /// assert_eq!(company.category.as_str(), "MASS");
    /// ```
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: CompanyInput) -> Result<Company, ServiceError> {
        require_company_fields(&input)?;
        let new = validate_company(&input)?;
        let company = self.repo.create(new).await?;
        info!(id = %company.id, category = company.category.as_str(), "company_created");
        Ok(company)
    }

    /// Full replace of an existing company.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: Uuid, input: CompanyInput) -> Result<Company, ServiceError> {
        require_company_fields(&input)?;
        let new = validate_company(&input)?;
        let company = self.repo.update(id, new).await?;
        info!(id = %company.id, "company_updated");
        Ok(company)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        self.repo.delete(id).await?;
        info!(%id, "company_deleted");
        Ok(())
    }
}
