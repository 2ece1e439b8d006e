//! Nodes, people and the read-only graph holding them

use std::fmt;

use geo::{Centroid, MultiPoint, Point};
use hashbrown::{HashMap, HashSet};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Identifier of a graph node
    NodeId
);
string_id!(
    /// Identifier of a person
    PersonId
);

/// Graph node
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    /// Plain lat/lng passthrough stored as `x = lng`, `y = lat`.
    /// `None` when the source had no usable coordinates.
    pub coords: Option<Point<f64>>,
    pub description: String,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, lat: f64, lng: f64, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            coords: Some(Point::new(lng, lat)),
            description: description.into(),
        }
    }

    pub fn lat_lng(&self) -> Option<(f64, f64)> {
        self.coords.map(|p| (p.y(), p.x()))
    }
}

/// A person living on a graph node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub home: NodeId,
}

impl Person {
    pub fn new(id: impl Into<PersonId>, name: impl Into<String>, home: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            home: home.into(),
        }
    }

    /// Name shown on the map, falling back to the identifier
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            self.id.as_str()
        } else {
            &self.name
        }
    }
}

/// Node and person reference data, loaded once and never mutated
#[derive(Debug, Clone, Default)]
pub struct StaticGraph {
    nodes: HashMap<NodeId, Node>,
    people: HashMap<PersonId, Person>,
}

impl StaticGraph {
    pub fn new(
        nodes: impl IntoIterator<Item = Node>,
        people: impl IntoIterator<Item = Person>,
    ) -> Self {
        let nodes: HashMap<NodeId, Node> = nodes.into_iter().map(|n| (n.id.clone(), n)).collect();
        let people: HashMap<PersonId, Person> = people
            .into_iter()
            .filter(|p| {
                let known = nodes.contains_key(&p.home);
                if !known {
                    log::warn!("Person {} lives on unknown node {} - ignoring", p.id, p.home);
                }
                known
            })
            .map(|p| (p.id.clone(), p))
            .collect();

        Self { nodes, people }
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn person(&self, id: &PersonId) -> Option<&Person> {
        self.people.get(id)
    }

    pub fn coords(&self, id: &NodeId) -> Option<Point<f64>> {
        self.nodes.get(id).and_then(|n| n.coords)
    }

    /// Node ids in a stable order
    pub fn node_ids(&self) -> Vec<&NodeId> {
        self.nodes.keys().sorted().collect()
    }

    /// People in a stable order
    pub fn people(&self) -> Vec<&Person> {
        self.people.values().sorted_by(|a, b| a.id.cmp(&b.id)).collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn person_count(&self) -> usize {
        self.people.len()
    }

    /// Ids of the people whose home is `node`, sorted
    pub fn residents(&self, node: &NodeId) -> Vec<&PersonId> {
        self.people
            .values()
            .filter(|p| &p.home == node)
            .map(|p| &p.id)
            .sorted()
            .collect()
    }

    pub fn is_occupied(&self, node: &NodeId) -> bool {
        self.people.values().any(|p| &p.home == node)
    }

    pub fn display_name<'a>(&'a self, person: &'a PersonId) -> &'a str {
        self.people
            .get(person)
            .map_or(person.as_str(), Person::display_name)
    }

    pub fn description<'a>(&'a self, node: &'a NodeId) -> &'a str {
        self.nodes
            .get(node)
            .map_or(node.as_str(), |n| n.description.as_str())
    }

    /// Home nodes of the given people; unknown people are skipped
    pub fn homes_of<'a>(&self, people: impl IntoIterator<Item = &'a PersonId>) -> HashSet<NodeId> {
        people
            .into_iter()
            .filter_map(|p| self.people.get(p))
            .map(|p| p.home.clone())
            .collect()
    }

    /// Centroid of every node with known coordinates
    pub fn center(&self) -> Option<Point<f64>> {
        let points: MultiPoint<f64> = self.nodes.values().filter_map(|n| n.coords).collect();
        points.centroid()
    }
}
