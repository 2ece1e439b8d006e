//! JSON documents returned to the map front end

use std::collections::BTreeMap;

use geojson::FeatureCollection;
use rendezvous_core::playback::{PlaybackView, ResultsSummary};
use rendezvous_core::session::Notice;
use rendezvous_core::{Error, GeoJsonSurface, NodeId, PersonId, SelectionSet, Session, StaticGraph};
use serde::Serialize;

/// Full session state after a command
#[derive(Debug, Serialize)]
pub struct SessionSnapshot {
    pub selection: SelectionSet,
    pub compute_enabled: bool,
    pub step_enabled: bool,
    pub computing: bool,
    pub meeting_point: Option<NodeId>,
    pub view: Option<PlaybackView>,
    pub summary: Option<ResultsSummary>,
    pub notice: Option<Notice>,
    pub map: MapState,
}

#[derive(Debug, Serialize)]
pub struct MapState {
    /// `[lat, lng]`
    pub center: Option<[f64; 2]>,
    pub zoom: u8,
    /// `[[south, west], [north, east]]` of the drawn routes
    pub bounds: Option<[[f64; 2]; 2]>,
    pub open_popup: Option<NodeId>,
    pub nodes: FeatureCollection,
    pub overlays: FeatureCollection,
}

impl SessionSnapshot {
    pub fn capture(session: &Session<GeoJsonSurface>, zoom: u8) -> Result<Self, Error> {
        let surface = session.surface();
        let view = session.view();

        Ok(Self {
            selection: session.selection().clone(),
            compute_enabled: session.compute_enabled(),
            step_enabled: session.step_enabled(),
            computing: session.is_computing(),
            meeting_point: view.as_ref().map(|v| v.meeting_point.clone()),
            summary: session.summary(),
            view,
            notice: session.notice().cloned(),
            map: MapState {
                center: session.graph().center().map(|p| [p.y(), p.x()]),
                zoom,
                bounds: surface
                    .bounds()
                    .map(|r| [[r.min().y, r.min().x], [r.max().y, r.max().x]]),
                open_popup: surface.open_popup_node().cloned(),
                nodes: surface.nodes_geojson()?,
                overlays: surface.overlays_geojson()?,
            },
        })
    }
}

#[derive(Debug, Serialize)]
pub struct GraphNode {
    /// `[lat, lng]`
    pub coords: Option<[f64; 2]>,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct GraphPerson {
    pub home: NodeId,
    pub name: String,
}

/// Static reference data, for building the selection controls
#[derive(Debug, Serialize)]
pub struct GraphDocument {
    pub nodes: BTreeMap<NodeId, GraphNode>,
    pub people: BTreeMap<PersonId, GraphPerson>,
}

impl GraphDocument {
    pub fn from_graph(graph: &StaticGraph) -> Self {
        let nodes = graph
            .node_ids()
            .into_iter()
            .filter_map(|id| graph.node(id))
            .map(|node| {
                (
                    node.id.clone(),
                    GraphNode {
                        coords: node.lat_lng().map(|(lat, lng)| [lat, lng]),
                        description: node.description.clone(),
                    },
                )
            })
            .collect();
        let people = graph
            .people()
            .into_iter()
            .map(|person| {
                (
                    person.id.clone(),
                    GraphPerson {
                        home: person.home.clone(),
                        name: person.display_name().to_string(),
                    },
                )
            })
            .collect();

        Self { nodes, people }
    }
}
