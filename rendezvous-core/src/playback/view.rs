use serde::Serialize;

use super::StepCursor;
use crate::{Minutes, NodeId, PersonId, PersonRoute, RouteSolution};

/// Text shown for a person who has reached the meeting point
pub const REACHED_DESTINATION: &str = "reached destination";

/// One person's route as of the current step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteView {
    pub person: PersonId,
    /// Remaining nodes, current position first
    pub path: Vec<NodeId>,
    /// Duration of the segment starting at the current position
    pub time: Minutes,
    /// Durations of the remaining segments
    pub segment_times: Vec<Minutes>,
    /// Instruction for the current segment
    pub text: String,
    /// Instructions for the remaining segments, joined for display
    pub remaining_text: String,
    pub remaining_time: Minutes,
    /// Travel time of the whole route, independent of the step
    pub total_time: Minutes,
    pub arrived: bool,
}

/// Partial routes of every person for the current step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackView {
    pub meeting_point: NodeId,
    pub routes: Vec<RouteView>,
}

/// Derives the partial routes of `solution` at the positions held by
/// `cursor`. Pure: equal inputs give equal outputs.
pub fn view(solution: &RouteSolution, cursor: &StepCursor) -> PlaybackView {
    PlaybackView {
        meeting_point: solution.meeting_point().clone(),
        routes: solution
            .routes()
            .iter()
            .map(|route| route_view(route, cursor.position(&route.person)))
            .collect(),
    }
}

fn route_view(route: &PersonRoute, step: usize) -> RouteView {
    if step >= route.terminal_index() {
        return RouteView {
            person: route.person.clone(),
            path: vec![route.destination().clone()],
            time: 0.0,
            segment_times: Vec::new(),
            text: REACHED_DESTINATION.to_string(),
            remaining_text: REACHED_DESTINATION.to_string(),
            remaining_time: 0.0,
            total_time: route.total_time(),
            arrived: true,
        };
    }

    let segment_times = route.segment_times()[step..].to_vec();
    RouteView {
        person: route.person.clone(),
        path: route.full_path()[step..].to_vec(),
        time: segment_times[0],
        remaining_time: segment_times.iter().sum(),
        segment_times,
        text: route.instructions().at_step(step),
        remaining_text: route.instructions().from_step(step),
        total_time: route.total_time(),
        arrived: false,
    }
}

impl PlaybackView {
    pub fn route(&self, person: &PersonId) -> Option<&RouteView> {
        self.routes.iter().find(|r| &r.person == person)
    }

    pub fn all_arrived(&self) -> bool {
        self.routes.iter().all(|r| r.arrived)
    }
}
