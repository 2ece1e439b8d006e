//! Step-wise playback of multi-person routes toward a meeting point.
//!
//! The meeting point and the routes are computed by an external solver;
//! this crate consumes that result, advances every person along their path
//! one hop at a time and keeps the drawn map layers in sync with the
//! current step.

pub mod error;
pub mod loading;
pub mod model;
pub mod playback;
pub mod prelude;
pub mod render;
pub mod session;

pub use error::{Error, ErrorKind};
pub use model::{
    InstructionText, Node, NodeId, Person, PersonId, PersonRoute, RouteSolution, StaticGraph,
};
pub use playback::{Playback, PlaybackView, RouteView, StepCursor};
pub use render::{GeoJsonSurface, MapSurface, RenderSynchronizer};
pub use session::{Command, ComputeOutcome, ComputeTicket, SelectionSet, Session};

/// Travel time in minutes, as reported by the solver
pub type Minutes = f64;
