//! Repository contracts and their SQLite implementations.
//!
//! # Responsibility
//! - Keep every SQL statement inside the persistence boundary.
//! - Expose the relationship views (departures, arrivals, roster) as
//!   explicit queries over the relation tables.
//!
//! # Invariants
//! - Airport and passenger writes call `validate()` before SQL.
//! - Flight writes are never validated against `is_valid_flight`.
//! - Lookups by id return `Ok(None)`; mutations on a missing row return
//!   `RepoError::NotFound`.

use crate::db::DbError;
use crate::model::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod airport_repo;
pub mod flight_repo;
pub mod passenger_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Kind of record a repository error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Airport,
    Flight,
    Passenger,
}

impl Display for Entity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Airport => "airport",
            Self::Flight => "flight",
            Self::Passenger => "passenger",
        })
    }
}

#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    NotFound(Entity, i64),
    /// Unique key already taken (airport code).
    Conflict(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(entity, id) => write!(f, "{entity} not found: {id}"),
            Self::Conflict(message) => write!(f, "conflict: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(..) | Self::Conflict(_) => None,
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

pub(crate) fn row_exists(
    conn: &rusqlite::Connection,
    table: &'static str,
    id: i64,
) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        &format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = ?1);"),
        [id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
