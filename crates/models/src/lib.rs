//! SeaORM entities for the placement store: `companies` and `students`.

pub mod errors;
pub mod db;
pub mod company;
pub mod student;

pub use company::Category;
pub use student::{Branch, Status};

#[cfg(test)]
mod tests;
