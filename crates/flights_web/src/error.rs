use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use flights_core::{FlightServiceError, RepoError};
use log::error;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("storage failure: {0}")]
    Repo(#[from] RepoError),
    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl From<FlightServiceError> for WebError {
    fn from(value: FlightServiceError) -> Self {
        match value {
            FlightServiceError::FlightNotFound(_) => Self::NotFound(value.to_string()),
            FlightServiceError::PassengerNotFound(_) => Self::BadRequest(value.to_string()),
            FlightServiceError::Repo(err) => Self::Repo(err),
        }
    }
}

impl WebError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Repo(_) | Self::Join(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            error!("event=http_error module=web status=error error={self}");
            "internal server error".to_owned()
        } else {
            self.to_string()
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
