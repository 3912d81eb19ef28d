//! Flight record and its validity rule.
//!
//! # Invariants
//! - A flight is valid only when it connects two different airports and has
//!   a strictly positive duration.
//! - Invalid flights are still storable; `is_valid_flight` is the only check.

use super::airport::{Airport, AirportId};
use serde::Serialize;
use std::fmt::{Display, Formatter};

pub type FlightId = i64;

/// Persisted flight with both endpoint airports resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flight {
    pub id: FlightId,
    pub origin: Airport,
    pub destination: Airport,
    /// Minutes. Negative values come through from storage unchanged.
    pub duration: i64,
}

impl Flight {
    /// Returns whether origin and destination differ and the duration is positive.
    pub fn is_valid_flight(&self) -> bool {
        is_valid_route(self.origin.id, self.destination.id, self.duration)
    }
}

impl Display for Flight {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} to {}", self.id, self.origin, self.destination)
    }
}

/// Insert payload for a flight. Not validated, see module invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewFlight {
    pub origin: AirportId,
    pub destination: AirportId,
    pub duration: i64,
}

impl NewFlight {
    pub fn new(origin: AirportId, destination: AirportId, duration: i64) -> Self {
        Self {
            origin,
            destination,
            duration,
        }
    }

    /// Same rule as [`Flight::is_valid_flight`], usable before the insert.
    pub fn is_valid_flight(&self) -> bool {
        is_valid_route(self.origin, self.destination, self.duration)
    }
}

fn is_valid_route(origin: AirportId, destination: AirportId, duration: i64) -> bool {
    origin != destination && duration > 0
}
