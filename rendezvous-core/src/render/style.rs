//! Fixed colors and line styles

use itertools::Itertools;
use serde::Serialize;

use super::{NodeMarkerStyle, Popup};
use crate::{NodeId, SelectionSet, StaticGraph};

pub const ROUTE_PALETTE: [&str; 6] = [
    "#e74c3c", "#3498db", "#2ecc71", "#f39c12", "#9b59b6", "#1abc9c",
];
pub const DASH_PATTERNS: [&str; 2] = ["8, 8", "15, 8"];

/// Node with at least one resident
pub const OCCUPIED_COLOR: &str = "#e74c3c";
/// Node nobody lives on
pub const UNOCCUPIED_COLOR: &str = "#3498db";
/// Home of a selected person
pub const SELECTED_COLOR: &str = "#7f2a2aff";
pub const MEETING_COLOR: &str = "green";
pub const MEETING_LABEL: &str = "M";
pub const START_MARKER_COLOR: &str = "red";
pub const SHADOW_COLOR: &str = "#000000";

pub fn route_color(index: usize) -> &'static str {
    ROUTE_PALETTE[index % ROUTE_PALETTE.len()]
}

pub fn dash_pattern(index: usize) -> &'static str {
    DASH_PATTERNS[index % DASH_PATTERNS.len()]
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineStyle {
    pub color: &'static str,
    pub weight: u8,
    pub opacity: f64,
    pub dash_array: &'static str,
}

impl LineStyle {
    pub fn route(index: usize) -> Self {
        Self {
            color: route_color(index),
            weight: 8,
            opacity: 0.9,
            dash_array: dash_pattern(index),
        }
    }

    /// Neutral outline drawn beneath the route
    pub fn shadow(index: usize) -> Self {
        Self {
            color: SHADOW_COLOR,
            weight: 12,
            opacity: 0.3,
            dash_array: dash_pattern(index),
        }
    }
}

/// Base style of a static node marker, given the current selection
pub fn node_marker_style(
    graph: &StaticGraph,
    selection: &SelectionSet,
    node: &NodeId,
) -> NodeMarkerStyle {
    let residents = graph.residents(node);
    let label = if residents.is_empty() {
        node.to_string()
    } else {
        residents.iter().join(", ")
    };

    NodeMarkerStyle {
        color: selection.node_color(graph, node).to_string(),
        popup: Popup::new(label.clone(), [graph.description(node).to_string()]),
        label,
    }
}

pub fn meeting_marker_style(graph: &StaticGraph, node: &NodeId) -> NodeMarkerStyle {
    NodeMarkerStyle {
        color: MEETING_COLOR.to_string(),
        label: MEETING_LABEL.to_string(),
        popup: Popup::new(
            format!("Meeting Point: {node}"),
            [
                graph.description(node).to_string(),
                "This is the optimal meeting location!".to_string(),
            ],
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_cycle_every_six_routes() {
        for i in 0..18 {
            assert_eq!(route_color(i), route_color(i + 6));
        }
        assert_ne!(route_color(0), route_color(1));
    }

    #[test]
    fn dash_alternates_by_parity() {
        assert_eq!(LineStyle::route(0).dash_array, "8, 8");
        assert_eq!(LineStyle::route(1).dash_array, "15, 8");
        assert_eq!(LineStyle::route(4).dash_array, "8, 8");
        assert_eq!(LineStyle::shadow(3).dash_array, LineStyle::route(3).dash_array);
    }

    #[test]
    fn shadow_is_neutral_and_fainter() {
        let (route, shadow) = (LineStyle::route(2), LineStyle::shadow(2));
        assert_eq!(shadow.color, SHADOW_COLOR);
        assert!(shadow.opacity < route.opacity);
        assert!(shadow.weight > route.weight);
    }
}
