pub use crate::Minutes;
pub use crate::{Error, ErrorKind};

// Static reference data and solver results
pub use crate::loading::{SolveRequest, graph_from_json, solution_from_json};
pub use crate::model::{
    InstructionText, Node, NodeId, Person, PersonId, PersonRoute, RouteSolution, StaticGraph,
};

// Playback
pub use crate::playback::{
    Playback, PlaybackView, REACHED_DESTINATION, ResultsSummary, RouteView, StepCursor,
    summarize, view,
};

// Rendering
pub use crate::render::{
    GeoJsonSurface, MapSurface, MarkerKind, MarkerLayer, NodeMarkerStyle, Overlay, Popup,
    PolylineLayer, RenderSynchronizer,
};

// Session state and commands
pub use crate::session::{
    Command, ComputeOutcome, ComputeTicket, Notice, NoticeBoard, NoticeId, SelectionSet, Session,
};
