//! Passenger repository.

use crate::model::flight::Flight;
use crate::model::passenger::{NewPassenger, Passenger, PassengerId};
use crate::repo::flight_repo::{query_flights, FLIGHT_SELECT_SQL};
use crate::repo::{row_exists, Entity, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

pub(crate) const PASSENGER_SELECT_SQL: &str = "SELECT
    p.id AS id,
    p.first AS first,
    p.last AS last
FROM passengers p";

pub trait PassengerRepository {
    fn create_passenger(&self, passenger: &NewPassenger) -> RepoResult<PassengerId>;
    fn get_passenger(&self, id: PassengerId) -> RepoResult<Option<Passenger>>;
    fn list_passengers(&self) -> RepoResult<Vec<Passenger>>;
    /// Flights whose roster lists this passenger, ordered by flight id.
    fn flights_for_passenger(&self, id: PassengerId) -> RepoResult<Vec<Flight>>;
}

pub struct SqlitePassengerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePassengerRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl PassengerRepository for SqlitePassengerRepository<'_> {
    fn create_passenger(&self, passenger: &NewPassenger) -> RepoResult<PassengerId> {
        passenger.validate()?;

        self.conn.execute(
            "INSERT INTO passengers (first, last) VALUES (?1, ?2);",
            params![passenger.first.as_str(), passenger.last.as_str()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_passenger(&self, id: PassengerId) -> RepoResult<Option<Passenger>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PASSENGER_SELECT_SQL} WHERE p.id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_passenger_row(row)?));
        }
        Ok(None)
    }

    fn list_passengers(&self) -> RepoResult<Vec<Passenger>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PASSENGER_SELECT_SQL} ORDER BY p.id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut passengers = Vec::new();
        while let Some(row) = rows.next()? {
            passengers.push(parse_passenger_row(row)?);
        }
        Ok(passengers)
    }

    fn flights_for_passenger(&self, id: PassengerId) -> RepoResult<Vec<Flight>> {
        if !row_exists(self.conn, "passengers", id)? {
            return Err(RepoError::NotFound(Entity::Passenger, id));
        }
        query_flights(
            self.conn,
            &format!(
                "{FLIGHT_SELECT_SQL}
                 INNER JOIN flight_passengers fp ON fp.flight_id = f.id
                 WHERE fp.passenger_id = ?1
                 ORDER BY f.id ASC;"
            ),
            [id],
        )
    }
}

pub(crate) fn parse_passenger_row(row: &Row<'_>) -> RepoResult<Passenger> {
    Ok(Passenger {
        id: row.get("id")?,
        first: row.get("first")?,
        last: row.get("last")?,
    })
}
