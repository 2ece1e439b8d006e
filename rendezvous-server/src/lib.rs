//! HTTP shell around a playback [`Session`](rendezvous_core::Session).
//!
//! Fetches the static graph from the external solver once, then exposes
//! the UI commands as endpoints that answer with the full session state.

pub mod config;
pub mod error;
pub mod routes;
pub mod snapshot;
pub mod solver;
pub mod state;

pub use config::ServerConfig;
pub use error::ServerError;
pub use routes::router;
pub use solver::SolverClient;
pub use state::AppState;
