use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Minutes, PersonId};

/// Body of `GET /api/graph`
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct RawGraph {
    pub nodes: BTreeMap<String, RawNode>,
    pub people: BTreeMap<String, RawPerson>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct RawNode {
    /// `[lat, lng]`
    pub coords: Option<Vec<f64>>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct RawPerson {
    pub home: String,
    pub name: Option<String>,
}

/// Body of `POST /api/f2`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SolveRequest {
    pub people: Vec<PersonId>,
}

/// Successful (HTTP 2xx) reply of `POST /api/f2`
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct RawSolveResponse {
    pub status: String,
    pub meeting_point: Option<String>,
    pub routes: Option<Vec<RawRoute>>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct RawRoute {
    pub person: String,
    pub path: Vec<String>,
    pub time: Option<Minutes>,
    pub route_text: Option<String>,
    pub segment_times: Option<Vec<Minutes>>,
}

/// Error body of a non-2xx reply
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ErrorBody {
    pub detail: Option<String>,
}
