use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Company, NewStudent, Student};
use crate::errors::ServiceError;
use crate::query::StudentFilter;

/// Persistence for students, plus the company lookup their writes depend on.
///
/// List reads that match nothing fail with `Db("no rows found")`.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn list(&self, filter: &StudentFilter) -> Result<Vec<Student>, ServiceError>;
    /// Like [`StudentRepository::list`] with each row's company embedded.
    async fn list_with_company(&self, filter: &StudentFilter) -> Result<Vec<Student>, ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Student, ServiceError>;
    async fn create(&self, input: NewStudent) -> Result<Student, ServiceError>;
    async fn update(&self, id: Uuid, input: NewStudent) -> Result<Student, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<(), ServiceError>;

    async fn get_company(&self, id: Uuid) -> Result<Company, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockStudentRepository {
        companies: Mutex<HashMap<Uuid, Company>>,
        // stored without the embedded company
        students: Mutex<HashMap<Uuid, (Student, Uuid)>>,
        calls: AtomicUsize,
        writes: AtomicUsize,
    }

    impl MockStudentRepository {
        pub fn with_company(company: Company) -> Self {
            let repo = Self::default();
            repo.companies.lock().unwrap().insert(company.id, company);
            repo
        }

        /// Total number of trait calls received.
        pub fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }

        /// Number of create/update/delete calls received.
        pub fn writes(&self) -> usize { self.writes.load(Ordering::SeqCst) }

        fn touch(&self, write: bool) {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if write {
                self.writes.fetch_add(1, Ordering::SeqCst);
            }
        }

        fn company(&self, id: Uuid) -> Option<Company> { self.companies.lock().unwrap().get(&id).cloned() }

        fn select(&self, filter: &StudentFilter, join: bool) -> Result<Vec<Student>, ServiceError> {
            let students = self.students.lock().unwrap();
            let mut rows: Vec<Student> = students
                .values()
                .filter(|(s, _)| filter.matches(s))
                .map(|(s, company_id)| Student { company: if join { self.company(*company_id) } else { None }, ..s.clone() })
                .collect();
            if rows.is_empty() {
                return Err(ServiceError::no_rows());
            }
            rows.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(rows)
        }

        fn store(&self, id: Uuid, input: NewStudent) -> Student {
            let student = Student {
                id,
                name: input.name,
                phone: input.phone,
                dob: input.dob,
                branch: input.branch,
                company: None,
                status: input.status,
            };
            self.students.lock().unwrap().insert(id, (student.clone(), input.company_id));
            student
        }
    }

    #[async_trait]
    impl StudentRepository for MockStudentRepository {
        async fn list(&self, filter: &StudentFilter) -> Result<Vec<Student>, ServiceError> {
            self.touch(false);
            self.select(filter, false)
        }

        async fn list_with_company(&self, filter: &StudentFilter) -> Result<Vec<Student>, ServiceError> {
            self.touch(false);
            self.select(filter, true)
        }

        async fn get(&self, id: Uuid) -> Result<Student, ServiceError> {
            self.touch(false);
            let (student, company_id) =
                self.students.lock().unwrap().get(&id).cloned().ok_or_else(|| ServiceError::id_not_found(id))?;
            Ok(Student { company: self.company(company_id), ..student })
        }

        async fn create(&self, input: NewStudent) -> Result<Student, ServiceError> {
            self.touch(true);
            if self.company(input.company_id).is_none() {
                return Err(ServiceError::server_error());
            }
            Ok(self.store(Uuid::new_v4(), input))
        }

        async fn update(&self, id: Uuid, input: NewStudent) -> Result<Student, ServiceError> {
            self.touch(true);
            if !self.students.lock().unwrap().contains_key(&id) {
                return Err(ServiceError::id_not_found(id));
            }
            Ok(self.store(id, input))
        }

        async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
            self.touch(true);
            self.students.lock().unwrap().remove(&id).map(|_| ()).ok_or_else(|| ServiceError::id_not_found(id))
        }

        async fn get_company(&self, id: Uuid) -> Result<Company, ServiceError> {
            self.touch(false);
            self.company(id).ok_or_else(|| ServiceError::id_not_found(id))
        }
    }
}
