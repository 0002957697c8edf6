use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::company::CompanyRepository;
use service::repo::{SeaOrmCompanyRepository, SeaOrmStudentRepository};
use service::student::StudentRepository;
use service::{CompanyService, StudentService};

use crate::auth::CredentialStore;

/// Shared handler state. Cloned per request; everything inside is behind `Arc`.
#[derive(Clone)]
pub struct ServerState {
    pub companies: Arc<CompanyService>,
    pub students: Arc<StudentService>,
    pub credentials: Arc<dyn CredentialStore>,
}

impl ServerState {
    pub fn new(companies: CompanyService, students: StudentService, credentials: Arc<dyn CredentialStore>) -> Self {
        Self { companies: Arc::new(companies), students: Arc::new(students), credentials }
    }

    /// Wire both services to SeaORM repositories over `db`.
    pub fn from_db(db: DatabaseConnection, credentials: Arc<dyn CredentialStore>) -> Self {
        let companies: Arc<dyn CompanyRepository> = Arc::new(SeaOrmCompanyRepository { db: db.clone() });
        let students: Arc<dyn StudentRepository> = Arc::new(SeaOrmStudentRepository { db });
        Self::new(CompanyService::new(companies), StudentService::new(students), credentials)
    }
}
