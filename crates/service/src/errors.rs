use thiserror::Error;

use models::errors::ModelError;

/// Error kinds surfaced by validators and repositories.
///
/// The display strings are written verbatim as HTTP response bodies.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Missing Parameter: {}", .0.join(","))]
    MissingParam(Vec<String>),
    #[error("Invalid Parameter: {0}")]
    InvalidParam(String),
    #[error("Entity Not Found: {0}")]
    EntityNotFound(String),
    #[error("DB Error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn invalid(reason: impl Into<String>) -> Self { Self::InvalidParam(reason.into()) }

    pub fn id_not_found(id: uuid::Uuid) -> Self { Self::EntityNotFound(format!("id not found: {id}")) }

    pub fn no_rows() -> Self { Self::Db("no rows found".into()) }

    pub fn server_error() -> Self { Self::Db("server error".into()) }

    pub fn is_not_found(&self) -> bool { matches!(self, Self::EntityNotFound(_)) }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => Self::InvalidParam(msg),
            ModelError::NotFound(msg) => Self::EntityNotFound(msg),
            ModelError::Db(msg) => Self::Db(msg),
        }
    }
}
