use geo::{BoundingRect, Coord, LineString, MultiPoint, Point};
use hashbrown::HashSet;
use itertools::Itertools;

use super::style::{
    LineStyle, START_MARKER_COLOR, meeting_marker_style, node_marker_style, route_color,
};
use super::surface::{
    LineRole, MapSurface, MarkerKind, MarkerLayer, Overlay, PolylineLayer, Popup,
};
use crate::playback::{PlaybackView, RouteView};
use crate::{NodeId, PersonId, SelectionSet, StaticGraph};

/// Owns the map surface and every transient layer drawn on it
pub struct RenderSynchronizer<S: MapSurface> {
    surface: S,
    drawn: Vec<S::Handle>,
    meeting_node: Option<NodeId>,
}

impl<S: MapSurface> RenderSynchronizer<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            drawn: Vec::new(),
            meeting_node: None,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Number of transient layers currently on the map
    pub fn transient_count(&self) -> usize {
        self.drawn.len()
    }

    /// Paints every static node marker in its base style
    pub fn paint_nodes(&mut self, graph: &StaticGraph, selection: &SelectionSet) {
        for node in graph.node_ids() {
            if graph.coords(node).is_some() {
                let style = node_marker_style(graph, selection, node);
                self.surface.style_node(node, style);
            }
        }
    }

    /// Repaints the home marker of `person` after a selection change. A
    /// highlighted meeting point keeps its style until the next clear.
    pub fn paint_home(&mut self, graph: &StaticGraph, selection: &SelectionSet, person: &PersonId) {
        if let Some(home) = graph.person(person).map(|p| &p.home)
            && graph.coords(home).is_some()
            && self.meeting_node.as_ref() != Some(home)
        {
            let style = node_marker_style(graph, selection, home);
            self.surface.style_node(home, style);
        }
    }

    /// Removes every transient layer and gives the meeting point marker
    /// back its base style
    pub fn clear(&mut self, graph: &StaticGraph, selection: &SelectionSet) {
        for handle in self.drawn.drain(..) {
            self.surface.remove_overlay(handle);
        }
        if let Some(node) = self.meeting_node.take() {
            self.surface.close_popup();
            let style = node_marker_style(graph, selection, &node);
            self.surface.style_node(&node, style);
        }
    }

    /// Clears the map, then draws `view` from scratch
    pub fn render(&mut self, graph: &StaticGraph, selection: &SelectionSet, view: &PlaybackView) {
        self.clear(graph, selection);

        let selected_homes = graph.homes_of(selection.iter());
        let mut extent: Vec<Point<f64>> = Vec::new();
        for (index, route) in view.routes.iter().enumerate() {
            self.draw_route(graph, &selected_homes, index, route, &mut extent);
        }
        self.highlight_meeting_point(graph, &view.meeting_point);

        if let Some(bounds) = MultiPoint::new(extent).bounding_rect() {
            self.surface.fit_bounds(bounds);
        }
        log::debug!(
            "Rendered {} routes as {} layers, meeting at {}",
            view.routes.len(),
            self.drawn.len(),
            view.meeting_point
        );
    }

    fn add(&mut self, overlay: Overlay) {
        let handle = self.surface.add_overlay(overlay);
        self.drawn.push(handle);
    }

    fn draw_route(
        &mut self,
        graph: &StaticGraph,
        selected_homes: &HashSet<NodeId>,
        index: usize,
        route: &RouteView,
        extent: &mut Vec<Point<f64>>,
    ) {
        let name = graph.display_name(&route.person).to_string();

        if route.path.len() >= 2 {
            let coords: Option<Vec<Coord<f64>>> = route
                .path
                .iter()
                .map(|node| graph.coords(node).map(Coord::from))
                .collect();

            match coords {
                Some(coords) => {
                    extent.extend(coords.iter().map(|&c| Point::from(c)));
                    let line = LineString::new(coords);
                    self.add(Overlay::Polyline(PolylineLayer {
                        role: LineRole::Shadow,
                        person: route.person.clone(),
                        route_index: index,
                        line: line.clone(),
                        style: LineStyle::shadow(index),
                        popup: None,
                    }));
                    self.add(Overlay::Polyline(PolylineLayer {
                        role: LineRole::Route,
                        person: route.person.clone(),
                        route_index: index,
                        line,
                        style: LineStyle::route(index),
                        popup: Some(route_popup(route)),
                    }));
                }
                None => log::warn!(
                    "Route of {} passes a node without coordinates - line not drawn",
                    route.person
                ),
            }
            self.draw_waypoints(graph, selected_homes, index, route);
        }

        if let Some(start) = route.path.first()
            && let Some(position) = graph.coords(start)
        {
            self.add(Overlay::Marker(MarkerLayer {
                kind: MarkerKind::Start,
                person: route.person.clone(),
                node: start.clone(),
                position,
                color: START_MARKER_COLOR.to_string(),
                popup: Popup::new(name.clone(), []),
                label: name,
            }));
        }
    }

    /// Numbered markers on every node but the first and last, except the
    /// homes of selected people
    fn draw_waypoints(
        &mut self,
        graph: &StaticGraph,
        selected_homes: &HashSet<NodeId>,
        index: usize,
        route: &RouteView,
    ) {
        let stops = route.path.len() - 1;
        for (number, node) in route.path.iter().enumerate().take(stops).skip(1) {
            if selected_homes.contains(node) {
                continue;
            }
            let Some(position) = graph.coords(node) else {
                log::warn!("Waypoint {node} has no coordinates - skipped");
                continue;
            };

            self.add(Overlay::Marker(MarkerLayer {
                kind: MarkerKind::Waypoint { number },
                person: route.person.clone(),
                node: node.clone(),
                position,
                label: number.to_string(),
                color: route_color(index).to_string(),
                popup: Popup::new(
                    format!("Waypoint {number}: {node}"),
                    [
                        graph.description(node).to_string(),
                        format!("Stop {number} of {stops} on this route"),
                    ],
                ),
            }));
        }
    }

    fn highlight_meeting_point(&mut self, graph: &StaticGraph, node: &NodeId) {
        if graph.coords(node).is_none() {
            log::warn!("Meeting point {node} has no coordinates - not highlighted");
            return;
        }
        self.surface.style_node(node, meeting_marker_style(graph, node));
        self.surface.open_popup(node);
        self.meeting_node = Some(node.clone());
    }
}

fn route_popup(route: &RouteView) -> Popup {
    Popup::new(
        format!("Route: {}", route.path.iter().join(" → ")),
        [
            format!("Time: {:.1} minutes", route.time),
            format!("Total: {:.1} minutes", route.total_time),
            format!("Instructions: {}", route.remaining_text),
        ],
    )
}
