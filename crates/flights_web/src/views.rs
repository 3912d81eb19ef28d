//! JSON page contexts returned by the routes.

use flights_core::{Flight, FlightDetail, FlightIndex, Passenger};
use serde::Serialize;

/// A flight plus its derived validity flag.
#[derive(Debug, Clone, Serialize)]
pub struct FlightView {
    #[serde(flatten)]
    pub flight: Flight,
    pub is_valid: bool,
}

impl From<Flight> for FlightView {
    fn from(flight: Flight) -> Self {
        let is_valid = flight.is_valid_flight();
        Self { flight, is_valid }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FlightsPage {
    pub flights: Vec<FlightView>,
}

impl From<FlightIndex> for FlightsPage {
    fn from(index: FlightIndex) -> Self {
        Self {
            flights: index.flights.into_iter().map(FlightView::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FlightPage {
    pub flight: FlightView,
    pub passengers: Vec<Passenger>,
    pub non_passengers: Vec<Passenger>,
}

impl From<FlightDetail> for FlightPage {
    fn from(detail: FlightDetail) -> Self {
        Self {
            flight: detail.flight.into(),
            passengers: detail.passengers,
            non_passengers: detail.non_passengers,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub version: &'static str,
}
