//! Data model for meeting-point playback
//!
//! Static reference data (nodes and the people living on them) and the
//! per-person routes returned by the external solver.

pub mod graph;
pub mod solution;

pub use graph::{Node, NodeId, Person, PersonId, StaticGraph};
pub use solution::{InstructionText, PersonRoute, RouteSolution};
