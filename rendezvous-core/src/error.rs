use thiserror::Error;

use crate::PersonId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to initialize application: {0}")]
    Initialization(String),
    #[error("Error computing routes: {0}")]
    Compute(String),
    #[error("Please select at least one person")]
    EmptySelection,
    #[error("A route computation is already in progress")]
    ComputeInFlight,
    #[error("Unknown person: {0}")]
    UnknownPerson(PersonId),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Coarse classification used when surfacing an error to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Static data or map setup failed; fatal to the session
    Initialization,
    /// Solve request failed; the user may retry
    Compute,
    /// Rejected before any network call
    UserInput,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Initialization(_) => ErrorKind::Initialization,
            Error::EmptySelection | Error::ComputeInFlight | Error::UnknownPerson(_) => {
                ErrorKind::UserInput
            }
            Error::Compute(_)
            | Error::InvalidData(_)
            | Error::GeoJsonError(_)
            | Error::JsonError(_) => ErrorKind::Compute,
        }
    }

    /// Wraps a decoding failure raised while loading the static graph
    pub fn into_initialization(self) -> Self {
        match self {
            Error::Initialization(_) => self,
            other => Error::Initialization(other.to_string()),
        }
    }

    /// Wraps a decoding failure raised while reading a solve response
    pub fn into_compute(self) -> Self {
        match self {
            Error::Compute(_) => self,
            other => Error::Compute(other.to_string()),
        }
    }
}
