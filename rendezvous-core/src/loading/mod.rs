//! This module decodes the solver's JSON payloads (static graph and
//! meeting-point solutions) into the domain model.

mod processor;
pub mod raw_types;

pub use processor::{graph_from_json, graph_from_raw, solution_from_json, solution_from_raw};
pub use raw_types::{
    ErrorBody, RawGraph, RawNode, RawPerson, RawRoute, RawSolveResponse, SolveRequest,
};
