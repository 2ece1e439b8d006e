use geo::{LineString, Point, Rect};
use serde::Serialize;

use super::style::LineStyle;
use crate::{NodeId, PersonId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Popup {
    pub title: String,
    pub lines: Vec<String>,
}

impl Popup {
    pub fn new(title: impl Into<String>, lines: impl IntoIterator<Item = String>) -> Self {
        Self {
            title: title.into(),
            lines: lines.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineRole {
    Route,
    Shadow,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolylineLayer {
    pub role: LineRole,
    pub person: PersonId,
    pub route_index: usize,
    pub line: LineString<f64>,
    pub style: LineStyle,
    pub popup: Option<Popup>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum MarkerKind {
    /// Intermediate node, numbered by its position in the path
    Waypoint { number: usize },
    /// Current position of a person
    Start,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerLayer {
    pub kind: MarkerKind,
    pub person: PersonId,
    pub node: NodeId,
    pub position: Point<f64>,
    pub label: String,
    pub color: String,
    pub popup: Popup,
}

/// A transient layer, removed on every re-render
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    Polyline(PolylineLayer),
    Marker(MarkerLayer),
}

/// Look of a static node marker
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeMarkerStyle {
    pub color: String,
    pub label: String,
    pub popup: Popup,
}

/// The map widget the synchronizer draws on.
///
/// Static node markers live for the whole session and are only restyled.
/// Overlays are added and removed through opaque handles.
pub trait MapSurface {
    type Handle;

    fn add_overlay(&mut self, overlay: Overlay) -> Self::Handle;

    fn remove_overlay(&mut self, handle: Self::Handle);

    fn style_node(&mut self, node: &NodeId, style: NodeMarkerStyle);

    fn open_popup(&mut self, node: &NodeId);

    fn close_popup(&mut self) {}

    fn fit_bounds(&mut self, _bounds: Rect<f64>) {}
}
