use super::{Notice, NoticeBoard, NoticeId, SelectionSet};
use crate::loading::SolveRequest;
use crate::playback::{Playback, PlaybackView, ResultsSummary, summarize};
use crate::render::{MapSurface, RenderSynchronizer};
use crate::{Error, ErrorKind, PersonId, RouteSolution, StaticGraph};

/// A synchronous user command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SelectPerson(PersonId),
    DeselectPerson(PersonId),
    Step,
    Clear,
    DismissError,
}

/// Issued by [`Session::begin_compute`]; hand it back with the solver's
/// answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputeTicket {
    generation: u64,
    pub request: SolveRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputeOutcome {
    /// The new solution replaced the old one and was drawn
    Applied,
    /// The solve failed; the error is shown as a notice
    Failed(NoticeId),
    /// A clear happened while the request was in flight; answer dropped
    Stale,
}

/// The whole application state
pub struct Session<S: MapSurface> {
    graph: StaticGraph,
    selection: SelectionSet,
    playback: Option<Playback>,
    /// Bumped by every compute and every clear. A response is only applied
    /// if its ticket still carries the current value.
    generation: u64,
    pending: Option<u64>,
    notices: NoticeBoard,
    renderer: RenderSynchronizer<S>,
}

impl<S: MapSurface> Session<S> {
    /// Starts a session and paints every node marker in its default color
    pub fn new(graph: StaticGraph, surface: S) -> Self {
        let mut renderer = RenderSynchronizer::new(surface);
        let selection = SelectionSet::default();
        renderer.paint_nodes(&graph, &selection);

        Self {
            graph,
            selection,
            playback: None,
            generation: 0,
            pending: None,
            notices: NoticeBoard::default(),
            renderer,
        }
    }

    /// # Errors
    ///
    /// Returns [`Error::UnknownPerson`] when selecting or deselecting
    /// someone who is not in the static graph.
    pub fn dispatch(&mut self, command: Command) -> Result<(), Error> {
        match command {
            Command::SelectPerson(person) => self.select_person(person),
            Command::DeselectPerson(person) => self.deselect_person(&person),
            Command::Step => {
                self.step();
                Ok(())
            }
            Command::Clear => {
                self.clear();
                Ok(())
            }
            Command::DismissError => {
                self.dismiss_error();
                Ok(())
            }
        }
    }

    /// # Errors
    ///
    /// Returns [`Error::UnknownPerson`] if `person` is not in the graph.
    pub fn select_person(&mut self, person: PersonId) -> Result<(), Error> {
        if self.graph.person(&person).is_none() {
            return Err(Error::UnknownPerson(person));
        }
        if self.selection.insert(person.clone()) {
            self.renderer.paint_home(&self.graph, &self.selection, &person);
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`Error::UnknownPerson`] if `person` is not in the graph.
    pub fn deselect_person(&mut self, person: &PersonId) -> Result<(), Error> {
        if self.graph.person(person).is_none() {
            return Err(Error::UnknownPerson(person.clone()));
        }
        if self.selection.remove(person) {
            self.renderer.paint_home(&self.graph, &self.selection, person);
        }
        Ok(())
    }

    /// Starts a solve for the current selection. Transient layers are
    /// removed right away; the current solution stays until the answer
    /// lands.
    ///
    /// # Errors
    ///
    /// [`Error::EmptySelection`] (also shown as a notice) when nobody is
    /// selected, [`Error::ComputeInFlight`] when a solve is outstanding.
    pub fn begin_compute(&mut self) -> Result<ComputeTicket, Error> {
        if self.selection.is_empty() {
            let err = Error::EmptySelection;
            self.report(&err);
            return Err(err);
        }
        if self.pending.is_some() {
            return Err(Error::ComputeInFlight);
        }

        self.generation += 1;
        self.pending = Some(self.generation);
        self.renderer.clear(&self.graph, &self.selection);
        log::info!("Computing meeting point for {} people", self.selection.len());

        Ok(ComputeTicket {
            generation: self.generation,
            request: self.selection.to_request(),
        })
    }

    /// Applies the solver's answer for `ticket`, unless a clear made it
    /// stale
    pub fn complete_compute(
        &mut self,
        ticket: ComputeTicket,
        result: Result<RouteSolution, Error>,
    ) -> ComputeOutcome {
        if ticket.generation != self.generation {
            log::debug!(
                "Dropping stale solve response (generation {} != {})",
                ticket.generation,
                self.generation
            );
            return ComputeOutcome::Stale;
        }
        self.pending = None;

        match result {
            Ok(solution) => {
                let playback = Playback::new(solution);
                self.renderer.render(&self.graph, &self.selection, &playback.view());
                self.playback = Some(playback);
                ComputeOutcome::Applied
            }
            Err(err) => {
                log::warn!("Route computation failed: {err}");
                ComputeOutcome::Failed(self.report(&err.into_compute()))
            }
        }
    }

    /// Advances everyone by one hop and redraws. No-op without a solution.
    pub fn step(&mut self) -> bool {
        let Some(playback) = self.playback.as_mut() else {
            return false;
        };
        let moved = playback.step();
        self.renderer.render(&self.graph, &self.selection, &playback.view());
        moved
    }

    /// Drops the selection, the solution and every transient layer
    pub fn clear(&mut self) {
        self.selection.clear();
        self.playback = None;
        self.generation += 1;
        self.pending = None;
        self.renderer.clear(&self.graph, &self.selection);
        self.renderer.paint_nodes(&self.graph, &self.selection);
    }

    pub fn dismiss_error(&mut self) {
        self.notices.dismiss();
    }

    /// Auto-hide for a notice; harmless if it is no longer shown
    pub fn expire_notice(&mut self, id: NoticeId) -> bool {
        self.notices.expire(id)
    }

    /// Shows `err` in the notice banner
    pub fn report(&mut self, err: &Error) -> NoticeId {
        let kind: ErrorKind = err.kind();
        self.notices.show(kind, err.to_string())
    }

    pub fn compute_enabled(&self) -> bool {
        !self.selection.is_empty() && self.pending.is_none()
    }

    pub fn step_enabled(&self) -> bool {
        self.playback.is_some()
    }

    pub fn is_computing(&self) -> bool {
        self.pending.is_some()
    }

    pub fn view(&self) -> Option<PlaybackView> {
        self.playback.as_ref().map(Playback::view)
    }

    pub fn summary(&self) -> Option<ResultsSummary> {
        self.view().map(|view| summarize(&self.graph, &view))
    }

    pub fn playback(&self) -> Option<&Playback> {
        self.playback.as_ref()
    }

    pub fn graph(&self) -> &StaticGraph {
        &self.graph
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notices.current()
    }

    pub fn surface(&self) -> &S {
        self.renderer.surface()
    }

    pub fn transient_layers(&self) -> usize {
        self.renderer.transient_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::GeoJsonSurface;
    use crate::render::style::{MEETING_COLOR, MEETING_LABEL, OCCUPIED_COLOR, SELECTED_COLOR};
    use crate::{InstructionText, Node, NodeId, Person, PersonRoute};

    fn graph() -> StaticGraph {
        StaticGraph::new(
            [
                Node::new("A", 0.0, 0.0, "Dorm A"),
                Node::new("B", 0.0, 1.0, "Bakery"),
                Node::new("C", 1.0, 1.0, "Dorm C"),
                Node::new("D", 1.0, 2.0, "Campus"),
            ],
            [
                Person::new("alice", "Alice", "A"),
                Person::new("carl", "Carl", "C"),
            ],
        )
    }

    fn session() -> Session<GeoJsonSurface> {
        let graph = graph();
        let surface = GeoJsonSurface::new(&graph);
        Session::new(graph, surface)
    }

    fn solution() -> RouteSolution {
        let route = |who: &str, ids: &[&str], times: Vec<f64>| {
            PersonRoute::new(
                who.into(),
                ids.iter().map(|id| NodeId::from(*id)).collect(),
                Some(times),
                InstructionText::Whole("walk".into()),
                None,
            )
            .unwrap()
        };
        RouteSolution::new(
            "D".into(),
            vec![
                route("alice", &["A", "B", "D"], vec![1.0, 2.0]),
                route("carl", &["C", "D"], vec![4.0]),
            ],
        )
        .unwrap()
    }

    fn color(session: &Session<GeoJsonSurface>, node: &str) -> String {
        session
            .surface()
            .node_style(&node.into())
            .map(|s| s.color.clone())
            .unwrap()
    }

    #[test]
    fn compute_is_enabled_only_with_a_selection() {
        let mut s = session();
        assert!(!s.compute_enabled());

        s.dispatch(Command::SelectPerson("alice".into())).unwrap();
        assert!(s.compute_enabled());
        assert_eq!(color(&s, "A"), SELECTED_COLOR);

        s.dispatch(Command::DeselectPerson("alice".into())).unwrap();
        assert!(!s.compute_enabled());
        assert_eq!(color(&s, "A"), OCCUPIED_COLOR);
    }

    #[test]
    fn unknown_people_are_rejected() {
        let mut s = session();
        let err = s.select_person("zed".into()).unwrap_err();
        assert!(matches!(err, Error::UnknownPerson(_)));
        assert!(s.selection().is_empty());
    }

    #[test]
    fn empty_compute_is_rejected_before_any_request() {
        let mut s = session();
        let err = s.begin_compute().unwrap_err();
        assert!(matches!(err, Error::EmptySelection));
        let notice = s.notice().unwrap();
        assert_eq!(notice.kind, ErrorKind::UserInput);
        assert_eq!(notice.message, "Please select at least one person");
        assert!(!s.is_computing());
    }

    #[test]
    fn compute_then_step_to_the_meeting_point() {
        let mut s = session();
        s.select_person("alice".into()).unwrap();
        s.select_person("carl".into()).unwrap();

        let ticket = s.begin_compute().unwrap();
        assert_eq!(ticket.request.people.len(), 2);
        assert!(s.is_computing());
        assert!(!s.compute_enabled());
        assert!(matches!(s.begin_compute(), Err(Error::ComputeInFlight)));

        assert_eq!(s.complete_compute(ticket, Ok(solution())), ComputeOutcome::Applied);
        assert!(s.compute_enabled());
        assert!(s.step_enabled());
        assert_eq!(color(&s, "D"), MEETING_COLOR);
        assert!(s.transient_layers() > 0);

        assert!(s.step());
        assert!(s.step());
        assert!(s.playback().unwrap().is_finished());
        assert!(!s.step());

        let view = s.view().unwrap();
        assert!(view.all_arrived());
        let summary = s.summary().unwrap();
        assert_eq!(summary.entries[0].path, "D");
    }

    #[test]
    fn failed_compute_shows_a_notice_and_keeps_state() {
        let mut s = session();
        s.select_person("alice".into()).unwrap();
        let ticket = s.begin_compute().unwrap();
        let outcome = s.complete_compute(ticket, Err(Error::Compute("HTTP 500".into())));

        let ComputeOutcome::Failed(id) = outcome else {
            panic!("expected failure, got {outcome:?}");
        };
        assert_eq!(s.notice().unwrap().message, "Error computing routes: HTTP 500");
        assert!(s.compute_enabled());
        assert!(!s.step_enabled());

        s.dispatch(Command::DismissError).unwrap();
        assert!(s.notice().is_none());
        assert!(!s.expire_notice(id));
    }

    #[test]
    fn clear_during_compute_makes_the_answer_stale() {
        let mut s = session();
        s.select_person("alice".into()).unwrap();
        let ticket = s.begin_compute().unwrap();

        s.dispatch(Command::Clear).unwrap();
        assert_eq!(s.complete_compute(ticket, Ok(solution())), ComputeOutcome::Stale);
        assert!(!s.step_enabled());
        assert_eq!(s.transient_layers(), 0);
        assert!(s.selection().is_empty());
    }

    #[test]
    fn clear_restores_default_colors_and_drops_the_solution() {
        let mut s = session();
        s.select_person("alice".into()).unwrap();
        let ticket = s.begin_compute().unwrap();
        s.complete_compute(ticket, Ok(solution()));

        s.clear();
        assert!(s.view().is_none());
        assert!(!s.step_enabled());
        assert!(!s.compute_enabled());
        assert_eq!(s.transient_layers(), 0);
        assert_eq!(s.surface().overlay_count(), 0);
        assert_eq!(color(&s, "A"), OCCUPIED_COLOR);
        assert_ne!(color(&s, "D"), MEETING_COLOR);
    }

    #[test]
    fn step_and_clear_without_a_solution_are_no_ops() {
        let mut s = session();
        assert!(!s.step());
        s.clear();
        assert!(s.notice().is_none());
        assert_eq!(s.transient_layers(), 0);
    }

    #[test]
    fn selecting_the_meeting_point_resident_keeps_the_highlight() {
        let mut s = session();
        s.select_person("alice".into()).unwrap();
        let route = PersonRoute::new(
            "alice".into(),
            vec!["A".into(), "B".into(), "C".into()],
            None,
            InstructionText::Whole("walk".into()),
            None,
        )
        .unwrap();
        let ticket = s.begin_compute().unwrap();
        let outcome = s.complete_compute(ticket, RouteSolution::new("C".into(), vec![route]));
        assert_eq!(outcome, ComputeOutcome::Applied);
        assert_eq!(color(&s, "C"), MEETING_COLOR);

        s.select_person("carl".into()).unwrap();
        let style = s.surface().node_style(&"C".into()).unwrap();
        assert_eq!(style.color, MEETING_COLOR);
        assert_eq!(style.label, MEETING_LABEL);
        assert_eq!(s.surface().open_popup_node(), Some(&NodeId::from("C")));

        s.deselect_person(&"carl".into()).unwrap();
        assert_eq!(color(&s, "C"), MEETING_COLOR);

        s.select_person("carl".into()).unwrap();
        s.clear();
        assert_eq!(color(&s, "C"), OCCUPIED_COLOR);
    }
}
