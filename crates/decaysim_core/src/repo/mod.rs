//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from store/business orchestration.
//!
//! # Invariants
//! - Simulation queries always filter by `(id, user_id)`.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

use crate::db::DbError;
use crate::model::element::ElementValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod element_repo;
pub mod simulation_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for element and simulation persistence.
#[derive(Debug)]
pub enum RepoError {
    Validation(ElementValidationError),
    Db(DbError),
    NotFound { entity: &'static str, id: i64 },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<ElementValidationError> for RepoError {
    fn from(value: ElementValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
