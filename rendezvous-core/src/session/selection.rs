use std::collections::BTreeSet;

use serde::Serialize;

use crate::loading::SolveRequest;
use crate::render::style::{OCCUPIED_COLOR, SELECTED_COLOR, UNOCCUPIED_COLOR};
use crate::{NodeId, PersonId, StaticGraph};

/// People currently chosen for the meeting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SelectionSet {
    people: BTreeSet<PersonId>,
}

impl SelectionSet {
    pub fn insert(&mut self, person: PersonId) -> bool {
        self.people.insert(person)
    }

    pub fn remove(&mut self, person: &PersonId) -> bool {
        self.people.remove(person)
    }

    pub fn contains(&self, person: &PersonId) -> bool {
        self.people.contains(person)
    }

    pub fn clear(&mut self) {
        self.people.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PersonId> {
        self.people.iter()
    }

    pub fn to_request(&self) -> SolveRequest {
        SolveRequest {
            people: self.people.iter().cloned().collect(),
        }
    }

    /// Marker color of `node`: selected if a selected person lives there,
    /// otherwise occupied or unoccupied by static residency
    pub fn node_color(&self, graph: &StaticGraph, node: &NodeId) -> &'static str {
        let residents = graph.residents(node);
        if residents.iter().any(|p| self.contains(p)) {
            SELECTED_COLOR
        } else if residents.is_empty() {
            UNOCCUPIED_COLOR
        } else {
            OCCUPIED_COLOR
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Node, Person};

    #[test]
    fn node_color_tracks_selection() {
        let graph = StaticGraph::new(
            [Node::new("A", 0.0, 0.0, ""), Node::new("B", 0.0, 1.0, "")],
            [Person::new("alice", "Alice", "A")],
        );
        let (a, b) = (NodeId::from("A"), NodeId::from("B"));
        let mut selection = SelectionSet::default();

        assert_eq!(selection.node_color(&graph, &a), OCCUPIED_COLOR);
        assert_eq!(selection.node_color(&graph, &b), UNOCCUPIED_COLOR);

        assert!(selection.insert("alice".into()));
        assert!(!selection.insert("alice".into()));
        assert_eq!(selection.node_color(&graph, &a), SELECTED_COLOR);

        assert!(selection.remove(&"alice".into()));
        assert_eq!(selection.node_color(&graph, &a), OCCUPIED_COLOR);
    }

    #[test]
    fn request_lists_people_in_order() {
        let mut selection = SelectionSet::default();
        selection.insert("bob".into());
        selection.insert("alice".into());
        assert_eq!(
            selection.to_request(),
            SolveRequest {
                people: vec!["alice".into(), "bob".into()]
            }
        );
    }
}
