//! Route handlers. Each one is a thin wrapper around `FlightService`.

use crate::error::WebError;
use crate::state::AppState;
use crate::views::{FlightPage, FlightsPage, Health};
use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::{Form, Json};
use flights_core::{FlightId, FlightService, PassengerId, SqliteFlightRepository};
use serde::Deserialize;

/// Body of the add-passenger form.
#[derive(Debug, Deserialize)]
pub struct BookForm {
    pub passenger: Option<String>,
}

pub async fn healthz() -> Json<Health> {
    Json(Health {
        status: "ok",
        version: flights_core::core_version(),
    })
}

pub async fn index(State(state): State<AppState>) -> Result<Json<FlightsPage>, WebError> {
    let index = state
        .with_conn(|conn| Ok(FlightService::new(SqliteFlightRepository::new(conn)).index()?))
        .await?;
    Ok(Json(index.into()))
}

pub async fn flight(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<FlightPage>, WebError> {
    let flight_id = parse_flight_id(&raw_id)?;
    let detail = state
        .with_conn(move |conn| {
            Ok(FlightService::new(SqliteFlightRepository::new(conn)).flight_detail(flight_id)?)
        })
        .await?;
    Ok(Json(detail.into()))
}

/// Adds the submitted passenger to the flight, then redirects to its page.
pub async fn book(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Form(form): Form<BookForm>,
) -> Result<Redirect, WebError> {
    let flight_id = parse_flight_id(&raw_id)?;
    let passenger_id = parse_passenger_id(form.passenger.as_deref())?;

    state
        .with_conn(move |conn| {
            Ok(FlightService::new(SqliteFlightRepository::new(conn))
                .book(flight_id, passenger_id)?)
        })
        .await?;

    Ok(Redirect::to(&format!("/flights/{flight_id}")))
}

/// Flight ids are plain digit runs; anything else does not name a flight.
fn parse_flight_id(raw: &str) -> Result<FlightId, WebError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(WebError::NotFound(format!("flight not found: {raw}")));
    }
    raw.parse()
        .map_err(|_| WebError::NotFound(format!("flight not found: {raw}")))
}

fn parse_passenger_id(raw: Option<&str>) -> Result<PassengerId, WebError> {
    let raw = raw
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| WebError::BadRequest("no passenger chosen".to_owned()))?;
    raw.parse()
        .map_err(|_| WebError::BadRequest(format!("invalid passenger id: {raw}")))
}
