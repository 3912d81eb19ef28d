//! Flight booking use-cases.
//!
//! # Responsibility
//! - Build the flight list and flight detail views.
//! - Book and unbook passengers on a flight roster.
//!
//! # Invariants
//! - `FlightDetail::passengers` and `FlightDetail::non_passengers` partition
//!   the full passenger set.
//! - Booking is idempotent; the outcome reports whether the roster changed.

use crate::model::flight::{Flight, FlightId};
use crate::model::passenger::{Passenger, PassengerId};
use crate::repo::flight_repo::FlightRepository;
use crate::repo::{Entity, RepoError};
use log::info;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum FlightServiceError {
    FlightNotFound(FlightId),
    PassengerNotFound(PassengerId),
    Repo(RepoError),
}

impl Display for FlightServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FlightNotFound(id) => write!(f, "flight not found: {id}"),
            Self::PassengerNotFound(id) => write!(f, "passenger does not exist: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for FlightServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for FlightServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(Entity::Flight, id) => Self::FlightNotFound(id),
            RepoError::NotFound(Entity::Passenger, id) => Self::PassengerNotFound(id),
            other => Self::Repo(other),
        }
    }
}

pub type FlightServiceResult<T> = Result<T, FlightServiceError>;

/// Context of the flight list page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlightIndex {
    pub flights: Vec<Flight>,
}

/// Context of the flight detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlightDetail {
    pub flight: Flight,
    pub passengers: Vec<Passenger>,
    pub non_passengers: Vec<Passenger>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingOutcome {
    Added,
    AlreadyBooked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnbookingOutcome {
    Removed,
    NotBooked,
}

/// Service facade over a flight repository.
pub struct FlightService<R: FlightRepository> {
    repo: R,
}

impl<R: FlightRepository> FlightService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists every flight.
    pub fn index(&self) -> FlightServiceResult<FlightIndex> {
        Ok(FlightIndex {
            flights: self.repo.list_flights()?,
        })
    }

    /// Loads one flight with its roster and the passengers not on it.
    pub fn flight_detail(&self, id: FlightId) -> FlightServiceResult<FlightDetail> {
        let flight = self
            .repo
            .get_flight(id)?
            .ok_or(FlightServiceError::FlightNotFound(id))?;
        let passengers = self.repo.passengers(id)?;
        let non_passengers = self.repo.non_passengers(id)?;

        Ok(FlightDetail {
            flight,
            passengers,
            non_passengers,
        })
    }

    /// Adds a passenger to the flight roster.
    ///
    /// # Errors
    /// - `FlightNotFound` / `PassengerNotFound` for unknown ids.
    pub fn book(
        &self,
        flight_id: FlightId,
        passenger_id: PassengerId,
    ) -> FlightServiceResult<BookingOutcome> {
        let outcome = if self.repo.add_passenger(flight_id, passenger_id)? {
            BookingOutcome::Added
        } else {
            BookingOutcome::AlreadyBooked
        };
        info!(
            "event=flight_book module=service status=ok flight_id={flight_id} passenger_id={passenger_id} outcome={outcome:?}"
        );
        Ok(outcome)
    }

    /// Removes a passenger from the flight roster.
    pub fn unbook(
        &self,
        flight_id: FlightId,
        passenger_id: PassengerId,
    ) -> FlightServiceResult<UnbookingOutcome> {
        let outcome = if self.repo.remove_passenger(flight_id, passenger_id)? {
            UnbookingOutcome::Removed
        } else {
            UnbookingOutcome::NotBooked
        };
        info!(
            "event=flight_unbook module=service status=ok flight_id={flight_id} passenger_id={passenger_id} outcome={outcome:?}"
        );
        Ok(outcome)
    }
}
