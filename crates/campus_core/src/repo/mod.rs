//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define per-entity data access contracts.
//! - Isolate SQLite query details from service orchestration.
//! - Enforce storage-backed validation (uniqueness, references) and
//!   cascade/restrict deletion rules.
//!
//! # Invariants
//! - Write paths validate records before any SQL mutation.
//! - Restricted deletes leave every row untouched and return `Restricted`.
//! - Repositories only construct over fully migrated connections.

use crate::db::DbError;
use crate::model::validation::ValidationError;
use crate::model::RowId;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod assignment_repo;
pub mod course_repo;
pub mod lesson_repo;
pub mod reading_repo;
pub mod roster_repo;
pub mod school_repo;
pub mod term_repo;
pub mod user_repo;

mod table;

pub use table::Edge;

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for record persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Record was refused before persistence.
    Validation(ValidationError),
    /// Delete refused because dependent rows still reference the record.
    Restricted {
        entity: &'static str,
        id: RowId,
        dependent: &'static str,
        count: u64,
    },
    Db(DbError),
    NotFound {
        entity: &'static str,
        id: RowId,
    },
    /// Update or delete was attempted on a record that was never inserted.
    Unsaved(&'static str),
    InvalidData(String),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Restricted {
                entity,
                id,
                dependent,
                count,
            } => write!(
                f,
                "cannot delete {entity} {id}: {count} dependent {dependent} row(s) exist"
            ),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Unsaved(entity) => write!(f, "{entity} has not been saved yet"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "repository requires column `{column}` in table `{table}`"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
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
