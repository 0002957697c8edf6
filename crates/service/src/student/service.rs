use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::domain::{Company, NewStudent, Student, StudentInput};
use crate::errors::ServiceError;
use crate::query::StudentQuery;
use crate::validation::{require_student_fields, validate_branch, validate_student};

use super::repository::StudentRepository;

fn local_today() -> NaiveDate { Local::now().date_naive() }

/// Student business service: validation, company eligibility and query composition.
pub struct StudentService<R: StudentRepository + ?Sized = dyn StudentRepository> {
    repo: Arc<R>,
    today: fn() -> NaiveDate,
}

impl<R: StudentRepository + ?Sized> StudentService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo, today: local_today } }

    /// Use a fixed clock for age checks.
    pub fn with_clock(repo: Arc<R>, today: fn() -> NaiveDate) -> Self { Self { repo, today } }

    /// List students matching the optional query-string parameters.
    ///
    /// # Examples
    /// ```
    /// use service::student::{StudentService, repository::mock::MockStudentRepository};
    /// use std::sync::Arc;
    /// let svc = StudentService::new(Arc::new(MockStudentRepository::default()));
    /// let err = tokio_test::block_on(svc.list(None, Some("ARTS"), None)).unwrap_err();
    /// assert_eq!(err.to_string(), "Invalid Parameter: this branch is not allowed");
    /// ```
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        name: Option<&str>,
        branch: Option<&str>,
        include_company: Option<&str>,
    ) -> Result<Vec<Student>, ServiceError> {
        let query = StudentQuery::parse(name, branch, include_company)?;
        if query.include_company {
            self.repo.list_with_company(&query.filter).await
        } else {
            self.repo.list(&query.filter).await
        }
    }

    pub async fn get(&self, id: Uuid) -> Result<Student, ServiceError> { self.repo.get(id).await }

    /// Validate the payload, then resolve its company and check branch eligibility.
    async fn admit(&self, input: &StudentInput) -> Result<(NewStudent, Company), ServiceError> {
        require_student_fields(input)?;
        let new = validate_student(input, (self.today)())?;
        let company = self.repo.get_company(new.company_id).await?;
        debug!(company_id = %company.id, category = company.category.as_str(), "company_resolved");
        validate_branch(company.category, new.branch)?;
        Ok((new, company))
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: StudentInput) -> Result<Student, ServiceError> {
        let (new, company) = self.admit(&input).await?;
        let mut student = self.repo.create(new).await?;
        student.company = Some(company);
        info!(id = %student.id, branch = student.branch.as_str(), "student_created");
        Ok(student)
    }

    /// Full replace; the referenced company must still accept the branch.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: Uuid, input: StudentInput) -> Result<Student, ServiceError> {
        let (new, company) = self.admit(&input).await?;
        let mut student = self.repo.update(id, new).await?;
        student.company = Some(company);
        info!(id = %student.id, "student_updated");
        Ok(student)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        self.repo.delete(id).await?;
        info!(%id, "student_deleted");
        Ok(())
    }
}
