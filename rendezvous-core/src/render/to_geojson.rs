use std::collections::BTreeMap;

use geo::{Point, Rect};
use geojson::{Feature, FeatureCollection, Geometry, GeometryValue};
use serde::Serialize;
use serde_json::json;

use super::surface::{MapSurface, MarkerLayer, NodeMarkerStyle, Overlay, PolylineLayer};
use crate::{Error, NodeId, StaticGraph};

/// Handle of a layer drawn on a [`GeoJsonSurface`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct LayerId(u64);

/// In-memory map surface exported as `GeoJSON` for a web map widget
#[derive(Debug, Clone, Default)]
pub struct GeoJsonSurface {
    node_positions: BTreeMap<NodeId, Point<f64>>,
    node_styles: BTreeMap<NodeId, NodeMarkerStyle>,
    layers: BTreeMap<LayerId, Overlay>,
    next_layer: u64,
    open_popup: Option<NodeId>,
    bounds: Option<Rect<f64>>,
}

impl GeoJsonSurface {
    /// Creates a surface with one marker slot per node with coordinates
    pub fn new(graph: &StaticGraph) -> Self {
        let node_positions = graph
            .node_ids()
            .into_iter()
            .filter_map(|id| graph.coords(id).map(|p| (id.clone(), p)))
            .collect();
        Self {
            node_positions,
            ..Self::default()
        }
    }

    pub fn overlay_count(&self) -> usize {
        self.layers.len()
    }

    pub fn node_style(&self, node: &NodeId) -> Option<&NodeMarkerStyle> {
        self.node_styles.get(node)
    }

    pub fn open_popup_node(&self) -> Option<&NodeId> {
        self.open_popup.as_ref()
    }

    pub fn bounds(&self) -> Option<Rect<f64>> {
        self.bounds
    }

    /// Transient layers in drawing order
    pub fn overlays_geojson(&self) -> Result<FeatureCollection, Error> {
        let features = self
            .layers
            .iter()
            .map(|(id, overlay)| match overlay {
                Overlay::Polyline(line) => polyline_feature(*id, line),
                Overlay::Marker(marker) => marker_feature(*id, marker),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        })
    }

    /// Static node markers with their current style
    pub fn nodes_geojson(&self) -> Result<FeatureCollection, Error> {
        let features = self
            .node_positions
            .iter()
            .filter_map(|(node, position)| {
                self.node_styles
                    .get(node)
                    .map(|style| self.node_feature(node, position, style))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        })
    }

    fn node_feature(
        &self,
        node: &NodeId,
        position: &Point<f64>,
        style: &NodeMarkerStyle,
    ) -> Result<Feature, Error> {
        let value = json!({
            "type": "Feature",
            "geometry": Geometry::new(GeometryValue::from(position)),
            "properties": {
                "layer_type": "node",
                "node": node,
                "color": style.color,
                "label": style.label,
                "popup": style.popup,
                "popup_open": self.open_popup.as_ref() == Some(node),
            }
        });

        serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
    }
}

fn polyline_feature(id: LayerId, line: &PolylineLayer) -> Result<Feature, Error> {
    let value = json!({
        "type": "Feature",
        "geometry": Geometry::new(GeometryValue::from(&line.line)),
        "properties": {
            "layer_id": id,
            "layer_type": line.role,
            "person": line.person,
            "route_index": line.route_index,
            "color": line.style.color,
            "weight": line.style.weight,
            "opacity": line.style.opacity,
            "dash_array": line.style.dash_array,
            "popup": line.popup,
        }
    });

    serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

fn marker_feature(id: LayerId, marker: &MarkerLayer) -> Result<Feature, Error> {
    let value = json!({
        "type": "Feature",
        "geometry": Geometry::new(GeometryValue::from(&marker.position)),
        "properties": {
            "layer_id": id,
            "layer_type": marker.kind,
            "person": marker.person,
            "node": marker.node,
            "label": marker.label,
            "color": marker.color,
            "popup": marker.popup,
        }
    });

    serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

impl MapSurface for GeoJsonSurface {
    type Handle = LayerId;

    fn add_overlay(&mut self, overlay: Overlay) -> LayerId {
        let id = LayerId(self.next_layer);
        self.next_layer += 1;
        self.layers.insert(id, overlay);
        id
    }

    fn remove_overlay(&mut self, handle: LayerId) {
        self.layers.remove(&handle);
    }

    fn style_node(&mut self, node: &NodeId, style: NodeMarkerStyle) {
        if self.node_positions.contains_key(node) {
            self.node_styles.insert(node.clone(), style);
        } else {
            log::trace!("No marker for node {node} - style ignored");
        }
    }

    fn open_popup(&mut self, node: &NodeId) {
        self.open_popup = Some(node.clone());
    }

    fn close_popup(&mut self) {
        self.open_popup = None;
    }

    fn fit_bounds(&mut self, bounds: Rect<f64>) {
        self.bounds = Some(bounds);
    }
}
