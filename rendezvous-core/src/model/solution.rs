//! Per-person routes toward the meeting point

use hashbrown::HashSet;
use itertools::Itertools;

use crate::{Error, Minutes, NodeId, PersonId};

/// Instruction text attached to a route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstructionText {
    /// One instruction per segment, aligned with the segment times
    Segmented(Vec<String>),
    /// Free text that could not be aligned with the segments.
    /// Shown unmodified at every step.
    Whole(String),
}

impl InstructionText {
    pub const DELIMITER: char = '|';
    pub const JOINER: &'static str = " | ";

    /// Splits `raw` on the delimiter when the pieces line up 1:1 with
    /// `segment_count`, otherwise keeps it whole.
    pub fn parse(raw: &str, segment_count: usize) -> Self {
        if raw.contains(Self::DELIMITER) {
            let pieces: Vec<String> = raw
                .split(Self::DELIMITER)
                .map(|piece| piece.trim().to_owned())
                .collect();
            if pieces.len() == segment_count {
                return InstructionText::Segmented(pieces);
            }
            log::warn!(
                "Instruction text has {} pieces for {segment_count} segments - showing it unsliced",
                pieces.len()
            );
        }
        InstructionText::Whole(raw.to_owned())
    }

    /// Instruction for the segment starting at `step`
    pub fn at_step(&self, step: usize) -> String {
        match self {
            InstructionText::Segmented(pieces) => pieces.get(step).cloned().unwrap_or_default(),
            InstructionText::Whole(text) => text.clone(),
        }
    }

    /// Instructions from `step` to the end, joined for display
    pub fn from_step(&self, step: usize) -> String {
        match self {
            InstructionText::Segmented(pieces) => {
                pieces.get(step..).unwrap_or_default().join(Self::JOINER)
            }
            InstructionText::Whole(text) => text.clone(),
        }
    }
}

/// One person's full route for the current solution
#[derive(Debug, Clone, PartialEq)]
pub struct PersonRoute {
    pub person: PersonId,
    full_path: Vec<NodeId>,
    segment_times: Vec<Minutes>,
    instructions: InstructionText,
    total_time: Minutes,
}

impl PersonRoute {
    /// Builds a route, enforcing `segment_times.len() == path.len() - 1`.
    ///
    /// Missing segment times are treated as zero and a missing total as the
    /// sum of the segments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] for an empty path or misaligned times.
    pub fn new(
        person: PersonId,
        path: Vec<NodeId>,
        segment_times: Option<Vec<Minutes>>,
        instructions: InstructionText,
        total_time: Option<Minutes>,
    ) -> Result<Self, Error> {
        if path.is_empty() {
            return Err(Error::InvalidData(format!("route for {person} has an empty path")));
        }
        let segments = path.len() - 1;
        let segment_times = segment_times.unwrap_or_else(|| vec![0.0; segments]);
        if segment_times.len() != segments {
            return Err(Error::InvalidData(format!(
                "route for {person} has {} segment times for {segments} segments",
                segment_times.len()
            )));
        }
        let total_time = total_time.unwrap_or_else(|| segment_times.iter().sum());

        Ok(Self {
            person,
            full_path: path,
            segment_times,
            instructions,
            total_time,
        })
    }

    pub fn full_path(&self) -> &[NodeId] {
        &self.full_path
    }

    pub fn segment_times(&self) -> &[Minutes] {
        &self.segment_times
    }

    pub fn instructions(&self) -> &InstructionText {
        &self.instructions
    }

    pub fn total_time(&self) -> Minutes {
        self.total_time
    }

    /// Index of the last node; a cursor at this index has arrived
    pub fn terminal_index(&self) -> usize {
        self.full_path.len() - 1
    }

    pub fn destination(&self) -> &NodeId {
        &self.full_path[self.terminal_index()]
    }
}

/// Result of one solve call. Replaced wholesale on recompute.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSolution {
    meeting_point: NodeId,
    routes: Vec<PersonRoute>,
}

impl RouteSolution {
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] when there are no routes, a person
    /// appears twice, or a route does not end at the meeting point.
    pub fn new(meeting_point: NodeId, routes: Vec<PersonRoute>) -> Result<Self, Error> {
        if routes.is_empty() {
            return Err(Error::InvalidData("solution has no routes".to_string()));
        }

        if let Some(dup) = duplicate_person(&routes) {
            return Err(Error::InvalidData(format!(
                "person {dup} has more than one route"
            )));
        }

        if let Some(stray) = routes.iter().find(|r| r.destination() != &meeting_point) {
            return Err(Error::InvalidData(format!(
                "route for {} ends at {}, not at meeting point {meeting_point}",
                stray.person,
                stray.destination()
            )));
        }

        Ok(Self {
            meeting_point,
            routes,
        })
    }

    pub fn meeting_point(&self) -> &NodeId {
        &self.meeting_point
    }

    pub fn routes(&self) -> &[PersonRoute] {
        &self.routes
    }

    pub fn people(&self) -> impl Iterator<Item = &PersonId> {
        self.routes.iter().map(|r| &r.person)
    }

    /// Length of the longest path in hops
    pub fn max_steps(&self) -> usize {
        self.routes
            .iter()
            .map(PersonRoute::terminal_index)
            .max()
            .unwrap_or_default()
    }
}

fn duplicate_person(routes: &[PersonRoute]) -> Option<&PersonId> {
    let mut seen = HashSet::with_capacity(routes.len());
    routes
        .iter()
        .map(|r| &r.person)
        .find(|person| !seen.insert(*person))
}

impl std::fmt::Display for RouteSolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "meeting at {} for {}",
            self.meeting_point,
            self.people().join(", ")
        )
    }
}
