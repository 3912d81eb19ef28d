//! Airport record.

use super::{check_text, ValidationError};
use serde::Serialize;
use std::fmt::{Display, Formatter};

pub type AirportId = i64;

pub const AIRPORT_CODE_MAX_CHARS: usize = 3;
pub const AIRPORT_CITY_MAX_CHARS: usize = 64;

/// Persisted airport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Airport {
    pub id: AirportId,
    /// Unique short code, e.g. `JFK`.
    pub code: String,
    pub city: String,
}

impl Display for Airport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.city, self.code)
    }
}

/// Insert payload for an airport that has no id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAirport {
    pub code: String,
    pub city: String,
}

impl NewAirport {
    pub fn new(code: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            city: city.into(),
        }
    }

    /// Checks field presence and length limits.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_text("code", &self.code, AIRPORT_CODE_MAX_CHARS)?;
        check_text("city", &self.city, AIRPORT_CITY_MAX_CHARS)
    }
}
