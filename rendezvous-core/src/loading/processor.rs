use geo::Point;

use super::raw_types::{RawGraph, RawNode, RawRoute, RawSolveResponse};
use crate::{
    Error, InstructionText, Node, NodeId, Person, PersonId, PersonRoute, RouteSolution,
    StaticGraph,
};

/// Decodes the static graph payload
///
/// # Errors
///
/// Returns [`Error::Initialization`] when the payload is not valid JSON or
/// has no nodes.
pub fn graph_from_json(json: &str) -> Result<StaticGraph, Error> {
    let raw: RawGraph =
        serde_json::from_str(json).map_err(|e| Error::from(e).into_initialization())?;
    graph_from_raw(raw)
}

/// # Errors
///
/// Returns [`Error::Initialization`] when the graph has no nodes.
pub fn graph_from_raw(raw: RawGraph) -> Result<StaticGraph, Error> {
    if raw.nodes.is_empty() {
        return Err(Error::Initialization(
            "Graph data with nodes not available".to_string(),
        ));
    }

    let nodes = raw
        .nodes
        .into_iter()
        .map(|(id, node)| convert_node(id, node));

    let people = raw.people.into_iter().map(|(id, person)| Person {
        name: person.name.unwrap_or_else(|| id.clone()),
        id: PersonId::new(id),
        home: NodeId::new(person.home),
    });

    let graph = StaticGraph::new(nodes, people);
    log::info!(
        "Loaded graph with {} nodes and {} people",
        graph.node_count(),
        graph.person_count()
    );
    Ok(graph)
}

fn convert_node(id: String, node: RawNode) -> Node {
    let coords = match node.coords.as_deref() {
        Some(&[lat, lng]) if lat.is_finite() && lng.is_finite() => Some(Point::new(lng, lat)),
        other => {
            log::warn!("Node {id} has no usable coordinates ({other:?}) - it will not be drawn");
            None
        }
    };

    Node {
        description: node.description.unwrap_or_else(|| id.clone()),
        id: NodeId::new(id),
        coords,
    }
}

/// Decodes a 2xx solve reply
///
/// # Errors
///
/// Returns [`Error::Compute`] for a non-success status or an empty or
/// malformed payload.
pub fn solution_from_json(json: &str) -> Result<RouteSolution, Error> {
    let raw: RawSolveResponse =
        serde_json::from_str(json).map_err(|e| Error::from(e).into_compute())?;
    solution_from_raw(raw)
}

/// # Errors
///
/// See [`solution_from_json`].
pub fn solution_from_raw(raw: RawSolveResponse) -> Result<RouteSolution, Error> {
    if raw.status != "success" {
        return Err(Error::Compute(raw.message.unwrap_or_else(|| {
            "Failed to compute optimal meeting point".to_string()
        })));
    }

    let meeting_point = raw
        .meeting_point
        .map(NodeId::new)
        .ok_or_else(|| Error::Compute("response has no meeting point".to_string()))?;
    let raw_routes = raw
        .routes
        .filter(|routes| !routes.is_empty())
        .ok_or_else(|| Error::Compute("response has no routes".to_string()))?;

    let routes = raw_routes
        .into_iter()
        .map(convert_route)
        .collect::<Result<Vec<_>, _>>()
        .map_err(Error::into_compute)?;

    let solution = RouteSolution::new(meeting_point, routes).map_err(Error::into_compute)?;
    log::info!("Received solution: {solution}");
    Ok(solution)
}

fn convert_route(raw: RawRoute) -> Result<PersonRoute, Error> {
    let path: Vec<NodeId> = raw.path.into_iter().map(NodeId::new).collect();
    let segment_count = path.len().saturating_sub(1);
    let instructions =
        InstructionText::parse(raw.route_text.as_deref().unwrap_or_default(), segment_count);

    PersonRoute::new(
        PersonId::new(raw.person),
        path,
        raw.segment_times,
        instructions,
        raw.time,
    )
}
