use flights_core::db::open_db_in_memory;
use flights_core::{
    AirportRepository, Entity, FlightRepository, NewAirport, NewFlight, RepoError,
    SqliteAirportRepository, SqliteFlightRepository,
};
use rusqlite::Connection;

/// Airports AAA and BBB with flights AAA->BBB (100), AAA->AAA (200), AAA->BBB (-100).
fn seed(conn: &Connection) -> (i64, i64) {
    let airports = SqliteAirportRepository::new(conn);
    let a1 = airports
        .create_airport(&NewAirport::new("AAA", "City A"))
        .unwrap();
    let a2 = airports
        .create_airport(&NewAirport::new("BBB", "City B"))
        .unwrap();

    let flights = SqliteFlightRepository::new(conn);
    flights.create_flight(&NewFlight::new(a1, a2, 100)).unwrap();
    flights.create_flight(&NewFlight::new(a1, a1, 200)).unwrap();
    flights.create_flight(&NewFlight::new(a1, a2, -100)).unwrap();
    (a1, a2)
}

#[test]
fn departures_count() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn);
    let airports = SqliteAirportRepository::new(&conn);

    let aaa = airports.get_airport_by_code("AAA").unwrap().unwrap();
    assert_eq!(airports.departures(aaa.id).unwrap().len(), 3);
}

#[test]
fn arrivals_count() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn);
    let airports = SqliteAirportRepository::new(&conn);

    let aaa = airports.get_airport_by_code("AAA").unwrap().unwrap();
    assert_eq!(airports.arrivals(aaa.id).unwrap().len(), 1);

    let bbb = airports.get_airport_by_code("BBB").unwrap().unwrap();
    assert_eq!(airports.arrivals(bbb.id).unwrap().len(), 2);
    assert!(airports.departures(bbb.id).unwrap().is_empty());
}

#[test]
fn invalid_flights_are_persisted() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn);
    let flights = SqliteFlightRepository::new(&conn).list_flights().unwrap();

    assert_eq!(flights.len(), 3);
    let validity: Vec<bool> = flights.iter().map(|f| f.is_valid_flight()).collect();
    assert_eq!(validity, vec![true, false, false]);
}

#[test]
fn valid_flight() {
    let conn = open_db_in_memory().unwrap();
    let (a1, a2) = seed(&conn);
    let flights = SqliteFlightRepository::new(&conn).list_flights().unwrap();

    let flight = flights
        .iter()
        .find(|f| f.origin.id == a1 && f.destination.id == a2 && f.duration == 100)
        .unwrap();
    assert!(flight.is_valid_flight());
}

#[test]
fn invalid_flight_destination() {
    let conn = open_db_in_memory().unwrap();
    let (a1, _) = seed(&conn);
    let flights = SqliteFlightRepository::new(&conn).list_flights().unwrap();

    let flight = flights
        .iter()
        .find(|f| f.origin.id == a1 && f.destination.id == a1)
        .unwrap();
    assert!(!flight.is_valid_flight());
}

#[test]
fn invalid_flight_duration() {
    let conn = open_db_in_memory().unwrap();
    let (a1, a2) = seed(&conn);
    let flights = SqliteFlightRepository::new(&conn).list_flights().unwrap();

    let flight = flights
        .iter()
        .find(|f| f.origin.id == a1 && f.destination.id == a2 && f.duration == -100)
        .unwrap();
    assert!(!flight.is_valid_flight());
}

#[test]
fn duplicate_airport_code_is_a_conflict() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn);
    let airports = SqliteAirportRepository::new(&conn);

    let err = airports
        .create_airport(&NewAirport::new("AAA", "Elsewhere"))
        .unwrap_err();
    assert!(matches!(err, RepoError::Conflict(_)));
    assert_eq!(airports.list_airports().unwrap().len(), 2);
}

#[test]
fn invalid_airport_fields_are_rejected_before_insert() {
    let conn = open_db_in_memory().unwrap();
    let airports = SqliteAirportRepository::new(&conn);

    let err = airports
        .create_airport(&NewAirport::new("", "Nowhere"))
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert!(airports.list_airports().unwrap().is_empty());
}

#[test]
fn flight_with_unknown_airport_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let (a1, _) = seed(&conn);
    let flights = SqliteFlightRepository::new(&conn);

    let err = flights
        .create_flight(&NewFlight::new(a1, 9_999, 60))
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(Entity::Airport, 9_999)));
}

#[test]
fn relationship_views_for_unknown_airport_are_not_found() {
    let conn = open_db_in_memory().unwrap();
    let airports = SqliteAirportRepository::new(&conn);

    assert!(matches!(
        airports.departures(5).unwrap_err(),
        RepoError::NotFound(Entity::Airport, 5)
    ));
    assert!(airports.get_airport(5).unwrap().is_none());
}
