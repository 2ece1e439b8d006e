//! Plain-text results panel for the current step

use std::fmt;

use itertools::Itertools;
use serde::Serialize;

use super::PlaybackView;
use crate::{NodeId, StaticGraph};

pub const PATH_SEPARATOR: &str = " → ";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryEntry {
    pub person_name: String,
    pub path: String,
    pub time: String,
    pub total_time: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultsSummary {
    pub meeting_point: NodeId,
    pub meeting_description: String,
    pub entries: Vec<SummaryEntry>,
}

pub fn summarize(graph: &StaticGraph, view: &PlaybackView) -> ResultsSummary {
    let entries = view
        .routes
        .iter()
        .map(|route| SummaryEntry {
            person_name: graph.display_name(&route.person).to_string(),
            path: route.path.iter().join(PATH_SEPARATOR),
            time: format_minutes(route.time),
            total_time: format_minutes(route.total_time),
            text: route.remaining_text.clone(),
        })
        .collect();

    ResultsSummary {
        meeting_point: view.meeting_point.clone(),
        meeting_description: graph.description(&view.meeting_point).to_string(),
        entries,
    }
}

pub(crate) fn format_minutes(minutes: f64) -> String {
    format!("{minutes:.1} min")
}

impl fmt::Display for ResultsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Meeting Point: {}", self.meeting_point)?;
        writeln!(f, "Individual Routes:")?;
        for entry in &self.entries {
            writeln!(f, "  {}", entry.person_name)?;
            writeln!(f, "    {}", entry.path)?;
            writeln!(f, "    {} (total {})", entry.time, entry.total_time)?;
            if !entry.text.is_empty() {
                writeln!(f, "    {}", entry.text)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::Playback;
    use crate::{InstructionText, Node, Person, PersonRoute, RouteSolution};

    #[test]
    fn summary_lists_each_person() {
        let graph = StaticGraph::new(
            [
                Node::new("A", 0.0, 0.0, "Dorm"),
                Node::new("B", 0.0, 1.0, "Campus"),
            ],
            [Person::new("alice", "Alice", "A")],
        );
        let route = PersonRoute::new(
            "alice".into(),
            vec!["A".into(), "B".into()],
            Some(vec![4.31]),
            InstructionText::parse("walk east", 1),
            Some(5.0),
        )
        .unwrap();
        let playback = Playback::new(RouteSolution::new("B".into(), vec![route]).unwrap());

        let summary = summarize(&graph, &playback.view());
        assert_eq!(summary.meeting_description, "Campus");
        assert_eq!(
            summary.entries,
            vec![SummaryEntry {
                person_name: "Alice".into(),
                path: "A → B".into(),
                time: "4.3 min".into(),
                total_time: "5.0 min".into(),
                text: "walk east".into(),
            }]
        );
        assert_eq!(
            summary.to_string(),
            concat!(
                "Meeting Point: B\n",
                "Individual Routes:\n",
                "  Alice\n",
                "    A → B\n",
                "    4.3 min (total 5.0 min)\n",
                "    walk east\n",
            )
        );
    }
}
