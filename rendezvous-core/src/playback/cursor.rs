use hashbrown::HashMap;

use crate::{PersonId, RouteSolution};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Progress {
    index: usize,
    terminal: usize,
}

/// Per-person position on the full path, clamped to the terminal index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepCursor {
    progress: HashMap<PersonId, Progress>,
}

impl StepCursor {
    /// Cursor at index 0 for every person of `solution`
    pub fn reset(solution: &RouteSolution) -> Self {
        let progress = solution
            .routes()
            .iter()
            .map(|route| {
                (
                    route.person.clone(),
                    Progress {
                        index: 0,
                        terminal: route.terminal_index(),
                    },
                )
            })
            .collect();
        Self { progress }
    }

    /// Moves every person that has not arrived forward by exactly one.
    /// Returns whether anyone moved.
    pub fn advance(&mut self) -> bool {
        let mut moved = false;
        for progress in self.progress.values_mut() {
            if progress.index < progress.terminal {
                progress.index += 1;
                moved = true;
            }
        }
        moved
    }

    /// Position of `person`; people unknown to the cursor are at 0
    pub fn position(&self, person: &PersonId) -> usize {
        self.progress.get(person).map_or(0, |p| p.index)
    }

    pub fn has_arrived(&self, person: &PersonId) -> bool {
        self.progress
            .get(person)
            .is_some_and(|p| p.index >= p.terminal)
    }

    pub fn is_finished(&self) -> bool {
        self.progress.values().all(|p| p.index >= p.terminal)
    }

    pub fn len(&self) -> usize {
        self.progress.len()
    }

    pub fn is_empty(&self) -> bool {
        self.progress.is_empty()
    }
}
