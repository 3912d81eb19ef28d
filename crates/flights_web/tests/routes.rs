use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use flights_core::db::open_db_in_memory;
use flights_core::{
    AirportRepository, FlightRepository, NewAirport, NewFlight, NewPassenger,
    PassengerRepository, SqliteAirportRepository, SqliteFlightRepository,
    SqlitePassengerRepository,
};
use flights_web::{router, AppState};
use http_body_util::BodyExt;
use rusqlite::Connection;
use serde_json::Value;
use std::time::Duration;
use tower::ServiceExt;

/// Airports AAA and BBB with flights AAA->BBB (100), AAA->AAA (200), AAA->BBB (-100).
fn seeded() -> Connection {
    let conn = open_db_in_memory().unwrap();
    {
        let airports = SqliteAirportRepository::new(&conn);
        let a1 = airports
            .create_airport(&NewAirport::new("AAA", "City A"))
            .unwrap();
        let a2 = airports
            .create_airport(&NewAirport::new("BBB", "City B"))
            .unwrap();

        let flights = SqliteFlightRepository::new(&conn);
        flights.create_flight(&NewFlight::new(a1, a2, 100)).unwrap();
        flights.create_flight(&NewFlight::new(a1, a1, 200)).unwrap();
        flights.create_flight(&NewFlight::new(a1, a2, -100)).unwrap();
    }
    conn
}

fn create_passenger(conn: &Connection, first: &str, last: &str) -> i64 {
    SqlitePassengerRepository::new(conn)
        .create_passenger(&NewPassenger::new(first, last))
        .unwrap()
}

fn app(conn: Connection) -> Router {
    router(AppState::new(conn), Duration::from_secs(5))
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn post_form(app: &Router, uri: &str, form: &str) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_owned()))
                .unwrap(),
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn index() {
    let app = app(seeded());

    let (status, body) = get(&app, "/flights/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["flights"].as_array().unwrap().len(), 3);
    assert_eq!(body["flights"][0]["is_valid"], true);
    assert_eq!(body["flights"][1]["is_valid"], false);
    assert_eq!(body["flights"][0]["origin"]["code"], "AAA");
}

#[tokio::test]
async fn index_without_trailing_slash_redirects() {
    let app = app(seeded());

    let response = app
        .clone()
        .oneshot(Request::get("/flights").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(response.status().is_redirection());
    assert_eq!(response.headers()[header::LOCATION], "/flights/");
}

#[tokio::test]
async fn valid_flight_page() {
    let conn = seeded();
    let same_airport_flight = SqliteFlightRepository::new(&conn)
        .list_flights()
        .unwrap()
        .into_iter()
        .find(|f| f.origin.id == f.destination.id)
        .unwrap();
    let app = app(conn);

    let (status, body) = get(&app, &format!("/flights/{}", same_airport_flight.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["flight"]["id"], same_airport_flight.id);
    assert_eq!(body["flight"]["is_valid"], false);
}

#[tokio::test]
async fn invalid_flight_page() {
    let conn = seeded();
    let max_id = SqliteFlightRepository::new(&conn)
        .max_flight_id()
        .unwrap()
        .unwrap();
    let app = app(conn);

    let (status, body) = get(&app, &format!("/flights/{}", max_id + 1)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn non_numeric_flight_id_is_not_found() {
    let app = app(seeded());

    let (status, _) = get(&app, "/flights/abc").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn flight_page_passengers() {
    let conn = seeded();
    let alice = create_passenger(&conn, "Alice", "Adams");
    SqliteFlightRepository::new(&conn)
        .add_passenger(1, alice)
        .unwrap();
    let app = app(conn);

    let (status, body) = get(&app, "/flights/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["passengers"].as_array().unwrap().len(), 1);
    assert_eq!(body["passengers"][0]["last"], "Adams");
}

#[tokio::test]
async fn flight_page_non_passengers() {
    let conn = seeded();
    create_passenger(&conn, "Alice", "Adams");
    let app = app(conn);

    let (status, body) = get(&app, "/flights/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["non_passengers"].as_array().unwrap().len(), 1);
    assert!(body["passengers"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn book_adds_passenger_and_redirects_to_flight() {
    let conn = seeded();
    let alice = create_passenger(&conn, "Alice", "Adams");
    create_passenger(&conn, "Bob", "Baker");
    let app = app(conn);

    let response = post_form(&app, "/flights/1/book", &format!("passenger={alice}")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/flights/1");

    let (_, body) = get(&app, "/flights/1").await;
    assert_eq!(body["passengers"].as_array().unwrap().len(), 1);
    assert_eq!(body["non_passengers"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn booking_same_passenger_twice_keeps_one_entry() {
    let conn = seeded();
    let alice = create_passenger(&conn, "Alice", "Adams");
    let app = app(conn);

    for _ in 0..2 {
        let response = post_form(&app, "/flights/2/book", &format!("passenger={alice}")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    let (_, body) = get(&app, "/flights/2").await;
    assert_eq!(body["passengers"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn book_with_unknown_passenger_is_bad_request() {
    let app = app(seeded());

    let response = post_form(&app, "/flights/1/book", "passenger=404").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn book_without_passenger_field_is_bad_request() {
    let app = app(seeded());

    let response = post_form(&app, "/flights/1/book", "").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn book_on_unknown_flight_is_not_found() {
    let conn = seeded();
    let alice = create_passenger(&conn, "Alice", "Adams");
    let app = app(conn);

    let response = post_form(&app, "/flights/99/book", &format!("passenger={alice}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn healthz_reports_version() {
    let app = app(open_db_in_memory().unwrap());

    let (status, body) = get(&app, "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], flights_core::core_version());
}
