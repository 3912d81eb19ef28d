//! Domain records for the booking service.
//!
//! # Responsibility
//! - Define airports, flights and passengers as plain records.
//! - Hold write-time field checks shared by the repositories.
//!
//! # Invariants
//! - Records are identified by SQLite integer primary keys.
//! - Flight validity is derived on read and never enforced at write time.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod airport;
pub mod flight;
pub mod passenger;

/// Field-level rejection raised before a record is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty or whitespace only.
    EmptyField(&'static str),
    /// Field exceeds its character budget.
    TooLong {
        field: &'static str,
        max_chars: usize,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "`{field}` must not be empty"),
            Self::TooLong { field, max_chars } => {
                write!(f, "`{field}` must be at most {max_chars} characters")
            }
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn check_text(
    field: &'static str,
    value: &str,
    max_chars: usize,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    if value.chars().count() > max_chars {
        return Err(ValidationError::TooLong { field, max_chars });
    }
    Ok(())
}
