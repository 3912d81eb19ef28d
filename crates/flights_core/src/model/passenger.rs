//! Passenger record.

use super::{check_text, ValidationError};
use serde::Serialize;
use std::fmt::{Display, Formatter};

pub type PassengerId = i64;

pub const PASSENGER_NAME_MAX_CHARS: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Passenger {
    pub id: PassengerId,
    pub first: String,
    pub last: String,
}

impl Display for Passenger {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.first, self.last)
    }
}

/// Insert payload for a passenger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPassenger {
    pub first: String,
    pub last: String,
}

impl NewPassenger {
    pub fn new(first: impl Into<String>, last: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            last: last.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_text("first", &self.first, PASSENGER_NAME_MAX_CHARS)?;
        check_text("last", &self.last, PASSENGER_NAME_MAX_CHARS)
    }
}
