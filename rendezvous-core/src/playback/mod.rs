//! Step-wise playback of a route solution
//!
//! A [`StepCursor`] points every person at a position on their full path.
//! [`view`] derives the "as of this step" routes from a solution and a
//! cursor without touching either.

mod cursor;
mod summary;
mod view;

pub use cursor::StepCursor;
pub use summary::{ResultsSummary, SummaryEntry, summarize};
pub use view::{PlaybackView, REACHED_DESTINATION, RouteView, view};

use crate::RouteSolution;

/// A solution and its cursor. Created, replaced and dropped together.
#[derive(Debug, Clone)]
pub struct Playback {
    solution: RouteSolution,
    cursor: StepCursor,
}

impl Playback {
    pub fn new(solution: RouteSolution) -> Self {
        let cursor = StepCursor::reset(&solution);
        Self { solution, cursor }
    }

    /// Advances every person by one hop. Returns `false` once everyone has
    /// arrived.
    pub fn step(&mut self) -> bool {
        self.cursor.advance()
    }

    pub fn view(&self) -> PlaybackView {
        view(&self.solution, &self.cursor)
    }

    pub fn solution(&self) -> &RouteSolution {
        &self.solution
    }

    pub fn cursor(&self) -> &StepCursor {
        &self.cursor
    }

    pub fn is_finished(&self) -> bool {
        self.cursor.is_finished()
    }
}
