//! Repository layer: persistence contracts and the SQLite implementation.
//!
//! # Responsibility
//! - Define the note data-access contract used by intents.
//! - Keep SQL and row decoding inside the persistence boundary.
//!
//! # Invariants
//! - Not-found on update/delete is a silent no-op, never an error.
//! - Malformed persisted values surface as `CorruptColumn`, never a panic.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod note_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for note persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// A stored value could not be decoded into the note model.
    CorruptColumn {
        note_id: String,
        column: &'static str,
        message: String,
    },
    /// A note field could not be encoded for storage.
    Encode(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
            Self::CorruptColumn {
                note_id,
                column,
                message,
            } => write!(f, "corrupt `notes.{column}` for note {note_id}: {message}"),
            Self::Encode(err) => write!(f, "cannot encode note field: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::MissingRequiredTable(_)
            | Self::MissingRequiredColumn { .. }
            | Self::CorruptColumn { .. } => None,
        }
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
