//! Flight repository and roster persistence.
//!
//! # Responsibility
//! - CRUD over `flights` with both airports joined in on every read.
//! - Own the `flight_passengers` relation (roster and its complement).
//!
//! # Invariants
//! - Lists are ordered by id ascending.
//! - Roster add/remove are set operations: repeating them changes nothing.
//! - Flights referencing unknown airports are rejected with `NotFound`, but
//!   same-airport or non-positive durations are stored as given.

use crate::model::airport::Airport;
use crate::model::flight::{Flight, FlightId, NewFlight};
use crate::model::passenger::{Passenger, PassengerId};
use crate::repo::passenger_repo::{parse_passenger_row, PASSENGER_SELECT_SQL};
use crate::repo::{row_exists, Entity, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

pub(crate) const FLIGHT_SELECT_SQL: &str = "SELECT
    f.id AS id,
    f.duration AS duration,
    o.id AS origin_id,
    o.code AS origin_code,
    o.city AS origin_city,
    d.id AS destination_id,
    d.code AS destination_code,
    d.city AS destination_city
FROM flights f
INNER JOIN airports o ON o.id = f.origin_id
INNER JOIN airports d ON d.id = f.destination_id";

/// Repository interface for flights and their passenger rosters.
pub trait FlightRepository {
    fn create_flight(&self, flight: &NewFlight) -> RepoResult<FlightId>;
    fn get_flight(&self, id: FlightId) -> RepoResult<Option<Flight>>;
    fn list_flights(&self) -> RepoResult<Vec<Flight>>;
    /// Highest assigned flight id, `None` on an empty table.
    fn max_flight_id(&self) -> RepoResult<Option<FlightId>>;
    /// Passengers booked on the flight.
    fn passengers(&self, id: FlightId) -> RepoResult<Vec<Passenger>>;
    /// Every passenger not booked on the flight.
    fn non_passengers(&self, id: FlightId) -> RepoResult<Vec<Passenger>>;
    /// Books a passenger. Returns `false` when they were already on the roster.
    fn add_passenger(&self, id: FlightId, passenger: PassengerId) -> RepoResult<bool>;
    /// Unbooks a passenger. Returns `false` when they were not on the roster.
    fn remove_passenger(&self, id: FlightId, passenger: PassengerId) -> RepoResult<bool>;
}

/// SQLite-backed flight repository.
pub struct SqliteFlightRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteFlightRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_passengers(&self, sql: &str, id: FlightId) -> RepoResult<Vec<Passenger>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([id])?;
        let mut passengers = Vec::new();
        while let Some(row) = rows.next()? {
            passengers.push(parse_passenger_row(row)?);
        }
        Ok(passengers)
    }
}

impl FlightRepository for SqliteFlightRepository<'_> {
    fn create_flight(&self, flight: &NewFlight) -> RepoResult<FlightId> {
        let tx = self.conn.unchecked_transaction()?;
        for airport_id in [flight.origin, flight.destination] {
            if !row_exists(&tx, "airports", airport_id)? {
                return Err(RepoError::NotFound(Entity::Airport, airport_id));
            }
        }

        tx.execute(
            "INSERT INTO flights (origin_id, destination_id, duration) VALUES (?1, ?2, ?3);",
            params![flight.origin, flight.destination, flight.duration],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(id)
    }

    fn get_flight(&self, id: FlightId) -> RepoResult<Option<Flight>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{FLIGHT_SELECT_SQL} WHERE f.id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_flight_row(row)?));
        }
        Ok(None)
    }

    fn list_flights(&self) -> RepoResult<Vec<Flight>> {
        query_flights(
            self.conn,
            &format!("{FLIGHT_SELECT_SQL} ORDER BY f.id ASC;"),
            params![],
        )
    }

    fn max_flight_id(&self) -> RepoResult<Option<FlightId>> {
        let max = self
            .conn
            .query_row("SELECT MAX(id) FROM flights;", [], |row| row.get(0))?;
        Ok(max)
    }

    fn passengers(&self, id: FlightId) -> RepoResult<Vec<Passenger>> {
        ensure_flight(self.conn, id)?;
        self.query_passengers(
            &format!(
                "{PASSENGER_SELECT_SQL}
                 WHERE p.id IN (
                    SELECT passenger_id FROM flight_passengers WHERE flight_id = ?1
                 )
                 ORDER BY p.id ASC;"
            ),
            id,
        )
    }

    fn non_passengers(&self, id: FlightId) -> RepoResult<Vec<Passenger>> {
        ensure_flight(self.conn, id)?;
        self.query_passengers(
            &format!(
                "{PASSENGER_SELECT_SQL}
                 WHERE p.id NOT IN (
                    SELECT passenger_id FROM flight_passengers WHERE flight_id = ?1
                 )
                 ORDER BY p.id ASC;"
            ),
            id,
        )
    }

    fn add_passenger(&self, id: FlightId, passenger: PassengerId) -> RepoResult<bool> {
        let tx = self.conn.unchecked_transaction()?;
        ensure_flight(&tx, id)?;
        if !row_exists(&tx, "passengers", passenger)? {
            return Err(RepoError::NotFound(Entity::Passenger, passenger));
        }

        let inserted = tx.execute(
            "INSERT OR IGNORE INTO flight_passengers (flight_id, passenger_id) VALUES (?1, ?2);",
            params![id, passenger],
        )?;
        tx.commit()?;

        Ok(inserted == 1)
    }

    fn remove_passenger(&self, id: FlightId, passenger: PassengerId) -> RepoResult<bool> {
        let tx = self.conn.unchecked_transaction()?;
        ensure_flight(&tx, id)?;

        let removed = tx.execute(
            "DELETE FROM flight_passengers WHERE flight_id = ?1 AND passenger_id = ?2;",
            params![id, passenger],
        )?;
        tx.commit()?;

        Ok(removed == 1)
    }
}

fn ensure_flight(conn: &Connection, id: FlightId) -> RepoResult<()> {
    if row_exists(conn, "flights", id)? {
        Ok(())
    } else {
        Err(RepoError::NotFound(Entity::Flight, id))
    }
}

pub(crate) fn query_flights(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> RepoResult<Vec<Flight>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    let mut flights = Vec::new();
    while let Some(row) = rows.next()? {
        flights.push(parse_flight_row(row)?);
    }
    Ok(flights)
}

pub(crate) fn parse_flight_row(row: &Row<'_>) -> RepoResult<Flight> {
    Ok(Flight {
        id: row.get("id")?,
        origin: Airport {
            id: row.get("origin_id")?,
            code: row.get("origin_code")?,
            city: row.get("origin_city")?,
        },
        destination: Airport {
            id: row.get("destination_id")?,
            code: row.get("destination_code")?,
            city: row.get("destination_city")?,
        },
        duration: row.get("duration")?,
    })
}
