//! HTTP surface of the flight booking service.
//!
//! Routes:
//! - `GET  /flights/`                 flight list
//! - `GET  /flights/{id}`             flight with roster and non-passengers
//! - `POST /flights/{id}/book`        add a passenger (form field `passenger`)
//! - `GET  /healthz`                  liveness probe

pub mod config;
mod error;
mod handlers;
mod server;
mod state;
pub mod views;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use log::info;
use std::time::{Duration, Instant};
use tower_http::timeout::TimeoutLayer;

pub use config::{load_config, AppConfig};
pub use error::WebError;
pub use server::{Server, ServerError};
pub use state::AppState;

/// Builds the application router over `state`.
pub fn router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/flights", get(|| async { Redirect::permanent("/flights/") }))
        .route("/flights/", get(handlers::index))
        .route("/flights/{flight_id}", get(handlers::flight))
        .route("/flights/{flight_id}/book", post(handlers::book))
        .route("/healthz", get(handlers::healthz))
        .layer(middleware::from_fn(log_request))
        // Bounded requests let graceful shutdown finish.
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .with_state(state)
}

async fn log_request(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let response = next.run(request).await;

    info!(
        "event=http_request module=web method={method} path={path} status={} duration_ms={}",
        response.status().as_u16(),
        started_at.elapsed().as_millis()
    );
    response
}
