//! Keeps the map's drawn layers consistent with a [`PlaybackView`].
//!
//! The map widget itself is behind the [`MapSurface`] trait. Every render
//! removes all transient layers before drawing the new ones.
//!
//! [`PlaybackView`]: crate::PlaybackView

pub mod style;
mod surface;
mod synchronizer;
mod to_geojson;

pub use surface::{
    LineRole, MapSurface, MarkerKind, MarkerLayer, NodeMarkerStyle, Overlay, PolylineLayer, Popup,
};
pub use synchronizer::RenderSynchronizer;
pub use to_geojson::{GeoJsonSurface, LayerId};
