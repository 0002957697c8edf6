use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Company, NewCompany};
use crate::errors::ServiceError;

/// Persistence for companies.
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Company>, ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Company, ServiceError>;
    async fn create(&self, input: NewCompany) -> Result<Company, ServiceError>;
    async fn update(&self, id: Uuid, input: NewCompany) -> Result<Company, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<(), ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockCompanyRepository {
        companies: Mutex<HashMap<Uuid, Company>>,
        writes: AtomicUsize,
    }

    impl MockCompanyRepository {
        pub fn insert(&self, company: Company) { self.companies.lock().unwrap().insert(company.id, company); }

        /// Number of create/update/delete calls received.
        pub fn writes(&self) -> usize { self.writes.load(Ordering::SeqCst) }
    }

    #[async_trait]
    impl CompanyRepository for MockCompanyRepository {
        async fn list(&self) -> Result<Vec<Company>, ServiceError> {
            let mut all: Vec<Company> = self.companies.lock().unwrap().values().cloned().collect();
            all.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(all)
        }

        async fn get(&self, id: Uuid) -> Result<Company, ServiceError> {
            self.companies.lock().unwrap().get(&id).cloned().ok_or_else(|| ServiceError::id_not_found(id))
        }

        async fn create(&self, input: NewCompany) -> Result<Company, ServiceError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            let company = Company { id: Uuid::new_v4(), name: input.name, category: input.category };
            self.insert(company.clone());
            Ok(company)
        }

        async fn update(&self, id: Uuid, input: NewCompany) -> Result<Company, ServiceError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            let mut companies = self.companies.lock().unwrap();
            let slot = companies.get_mut(&id).ok_or_else(|| ServiceError::id_not_found(id))?;
            slot.name = input.name;
            slot.category = input.category;
            Ok(slot.clone())
        }

        async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.companies.lock().unwrap().remove(&id).map(|_| ()).ok_or_else(|| ServiceError::id_not_found(id))
        }
    }
}
