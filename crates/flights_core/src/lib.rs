//! Core domain logic for the flight booking service.
//! Storage, relationship queries and booking rules live here; the HTTP and
//! CLI crates only call into these APIs.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::airport::{Airport, AirportId, NewAirport};
pub use model::flight::{Flight, FlightId, NewFlight};
pub use model::passenger::{NewPassenger, Passenger, PassengerId};
pub use model::ValidationError;
pub use repo::airport_repo::{AirportRepository, SqliteAirportRepository};
pub use repo::flight_repo::{FlightRepository, SqliteFlightRepository};
pub use repo::passenger_repo::{PassengerRepository, SqlitePassengerRepository};
pub use repo::{Entity, RepoError, RepoResult};
pub use service::flight_service::{
    BookingOutcome, FlightDetail, FlightIndex, FlightService, FlightServiceError,
    FlightServiceResult, UnbookingOutcome,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
