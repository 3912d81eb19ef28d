//! Airport repository with the departures/arrivals views.
//!
//! # Invariants
//! - Airport codes are unique; a duplicate insert maps to `RepoError::Conflict`.
//! - `departures` and `arrivals` include invalid flights, and a same-airport
//!   flight shows up in both.

use crate::model::airport::{Airport, AirportId, NewAirport};
use crate::model::flight::Flight;
use crate::repo::flight_repo::{query_flights, FLIGHT_SELECT_SQL};
use crate::repo::{row_exists, Entity, RepoError, RepoResult};
use rusqlite::{params, Connection, ErrorCode, Row};

const AIRPORT_SELECT_SQL: &str = "SELECT id, code, city FROM airports";

pub trait AirportRepository {
    fn create_airport(&self, airport: &NewAirport) -> RepoResult<AirportId>;
    fn get_airport(&self, id: AirportId) -> RepoResult<Option<Airport>>;
    fn get_airport_by_code(&self, code: &str) -> RepoResult<Option<Airport>>;
    fn list_airports(&self) -> RepoResult<Vec<Airport>>;
    /// Flights whose origin is this airport.
    fn departures(&self, id: AirportId) -> RepoResult<Vec<Flight>>;
    /// Flights whose destination is this airport.
    fn arrivals(&self, id: AirportId) -> RepoResult<Vec<Flight>>;
}

pub struct SqliteAirportRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAirportRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn flights_where(&self, column: &str, id: AirportId) -> RepoResult<Vec<Flight>> {
        if !row_exists(self.conn, "airports", id)? {
            return Err(RepoError::NotFound(Entity::Airport, id));
        }
        query_flights(
            self.conn,
            &format!("{FLIGHT_SELECT_SQL} WHERE f.{column} = ?1 ORDER BY f.id ASC;"),
            [id],
        )
    }

    fn query_one(&self, sql: &str, param: impl rusqlite::ToSql) -> RepoResult<Option<Airport>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([param])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_airport_row(row)?));
        }
        Ok(None)
    }
}

impl AirportRepository for SqliteAirportRepository<'_> {
    fn create_airport(&self, airport: &NewAirport) -> RepoResult<AirportId> {
        airport.validate()?;

        match self.conn.execute(
            "INSERT INTO airports (code, city) VALUES (?1, ?2);",
            params![airport.code.as_str(), airport.city.as_str()],
        ) {
            Ok(_) => Ok(self.conn.last_insert_rowid()),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(RepoError::Conflict(format!(
                    "airport code `{}` already exists",
                    airport.code
                )))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn get_airport(&self, id: AirportId) -> RepoResult<Option<Airport>> {
        self.query_one(&format!("{AIRPORT_SELECT_SQL} WHERE id = ?1;"), id)
    }

    fn get_airport_by_code(&self, code: &str) -> RepoResult<Option<Airport>> {
        self.query_one(&format!("{AIRPORT_SELECT_SQL} WHERE code = ?1;"), code)
    }

    fn list_airports(&self) -> RepoResult<Vec<Airport>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{AIRPORT_SELECT_SQL} ORDER BY code ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut airports = Vec::new();
        while let Some(row) = rows.next()? {
            airports.push(parse_airport_row(row)?);
        }
        Ok(airports)
    }

    fn departures(&self, id: AirportId) -> RepoResult<Vec<Flight>> {
        self.flights_where("origin_id", id)
    }

    fn arrivals(&self, id: AirportId) -> RepoResult<Vec<Flight>> {
        self.flights_where("destination_id", id)
    }
}

fn parse_airport_row(row: &Row<'_>) -> RepoResult<Airport> {
    Ok(Airport {
        id: row.get("id")?,
        code: row.get("code")?,
        city: row.get("city")?,
    })
}
