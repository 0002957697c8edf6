//! Service layer for companies and students.
//! - Validates raw payloads and enforces the branch/category eligibility rule.
//! - Composes filtered student queries.
//! - Talks to storage only through the repository traits, so every rule is
//!   testable against the in-memory mocks.

pub mod errors;
pub mod domain;
pub mod validation;
pub mod query;
pub mod company;
pub mod student;
pub mod repo;
#[cfg(test)]
pub mod test_support;

pub use company::CompanyService;
pub use errors::ServiceError;
pub use student::StudentService;
