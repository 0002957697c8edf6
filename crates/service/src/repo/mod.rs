pub mod seaorm;

pub use seaorm::{SeaOrmCompanyRepository, SeaOrmStudentRepository};
