use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ModelError {
    pub fn id_not_found(id: uuid::Uuid) -> Self { Self::NotFound(format!("id not found: {id}")) }
}
