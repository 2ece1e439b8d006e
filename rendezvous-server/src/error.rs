use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rendezvous_core::Error;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error(transparent)]
    Core(#[from] Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServerError::Core(Error::UnknownPerson(_)) => StatusCode::NOT_FOUND,
            ServerError::Core(Error::ComputeInFlight) => StatusCode::CONFLICT,
            ServerError::Core(Error::EmptySelection) => StatusCode::BAD_REQUEST,
            ServerError::Core(Error::Compute(_)) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("{self}");
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
