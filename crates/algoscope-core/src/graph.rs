//! Undirected weighted graphs for the graph family.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{Error, Result};

/// Node identifier. Generated graphs use ids equal to the node's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl From<usize> for NodeId {
    fn from(id: usize) -> Self {
        NodeId(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node with planar layout coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
}

/// An undirected weighted edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    pub weight: f64,
}

impl Edge {
    pub fn new(source: usize, target: usize, weight: f64) -> Self {
        Self {
            source: NodeId(source),
            target: NodeId(target),
            weight,
        }
    }

    /// Canonical key for highlighting this edge.
    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.source, self.target)
    }

    /// The endpoint opposite `node`, if `node` is an endpoint.
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if self.source == node {
            Some(self.target)
        } else if self.target == node {
            Some(self.source)
        } else {
            None
        }
    }

    pub fn touches(&self, node: NodeId) -> bool {
        self.source == node || self.target == node
    }
}

/// Order-independent edge key: `(min(u, v), max(u, v))`.
///
/// Serialized as the string `"lo-hi"` so it can key JSON objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKey {
    lo: NodeId,
    hi: NodeId,
}

impl EdgeKey {
    pub fn new(u: NodeId, v: NodeId) -> Self {
        Self {
            lo: u.min(v),
            hi: u.max(v),
        }
    }

    pub fn lo(&self) -> NodeId {
        self.lo
    }

    pub fn hi(&self) -> NodeId {
        self.hi
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.lo, self.hi)
    }
}

impl FromStr for EdgeKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bad = || Error::InvalidInput(format!("malformed edge key: {s}"));
        let (a, b) = s.split_once('-').ok_or_else(bad)?;
        let a: usize = a.trim().parse().map_err(|_| bad())?;
        let b: usize = b.trim().parse().map_err(|_| bad())?;
        Ok(EdgeKey::new(NodeId(a), NodeId(b)))
    }
}

impl Serialize for EdgeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EdgeKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Tentative shortest-path distance. `Infinite` renders as `"∞"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Distance {
    Finite(f64),
    Infinite,
}

impl Distance {
    pub fn finite(&self) -> Option<f64> {
        match self {
            Distance::Finite(d) => Some(*d),
            Distance::Infinite => None,
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Finite(d) => write!(f, "{d}"),
            Distance::Infinite => f.write_str("∞"),
        }
    }
}

impl Serialize for Distance {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Distance::Finite(d) => serializer.serialize_f64(*d),
            Distance::Infinite => serializer.serialize_str("∞"),
        }
    }
}

impl<'de> Deserialize<'de> for Distance {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(f64),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(d) => Ok(Distance::Finite(d)),
            Repr::Text(t) if t == "∞" || t.eq_ignore_ascii_case("infinity") => Ok(Distance::Infinite),
            Repr::Text(t) => Err(de::Error::custom(format!("invalid distance: {t}"))),
        }
    }
}

/// An undirected weighted graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether an edge joins `u` and `v`, in either direction.
    pub fn has_edge(&self, u: NodeId, v: NodeId) -> bool {
        let key = EdgeKey::new(u, v);
        self.edges.iter().any(|e| e.key() == key)
    }

    /// Edges touching `node`, paired with the opposite endpoint, in storage order.
    pub fn incident(&self, node: NodeId) -> impl Iterator<Item = (&Edge, NodeId)> + '_ {
        self.edges
            .iter()
            .filter_map(move |e| e.other(node).map(|other| (e, other)))
    }

    /// Check the structural invariants the graph algorithms rely on.
    pub fn validate(&self) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(Error::InvalidDataset("graph has no nodes".into()));
        }
        for (position, node) in self.nodes.iter().enumerate() {
            if node.id.0 != position {
                return Err(Error::InvalidDataset(format!(
                    "node at position {position} has id {}",
                    node.id
                )));
            }
        }
        let n = self.nodes.len();
        for edge in &self.edges {
            if edge.source.0 >= n || edge.target.0 >= n {
                return Err(Error::InvalidDataset(format!(
                    "edge {} references a missing node",
                    edge.key()
                )));
            }
            if edge.source == edge.target {
                return Err(Error::InvalidDataset(format!(
                    "self loop on node {}",
                    edge.source
                )));
            }
            if !edge.weight.is_finite() || edge.weight < 0.0 {
                return Err(Error::InvalidDataset(format!(
                    "edge {} has weight {}",
                    edge.key(),
                    edge.weight
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn node(id: usize) -> Node {
        Node {
            id: NodeId(id),
            x: 0.0,
            y: 0.0,
        }
    }

    #[test]
    fn edge_key_is_order_independent() {
        let a = EdgeKey::new(NodeId(4), NodeId(1));
        let b = EdgeKey::new(NodeId(1), NodeId(4));
        assert_eq!(a, b);
        assert_eq!(a.lo(), NodeId(1));
        assert_eq!(a.hi(), NodeId(4));
        assert_eq!(a.to_string(), "1-4");
        assert_eq!("4-1".parse::<EdgeKey>().unwrap(), a);
    }

    #[test]
    fn edge_keys_serialize_as_object_keys() {
        let mut map = BTreeMap::new();
        map.insert(EdgeKey::new(NodeId(2), NodeId(0)), 1u8);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"0-2":1}"#);

        let back: BTreeMap<EdgeKey, u8> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn distance_wire_format() {
        let json = serde_json::to_string(&[Distance::Finite(3.0), Distance::Infinite]).unwrap();
        assert_eq!(json, r#"[3.0,"∞"]"#);
        let back: Vec<Distance> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![Distance::Finite(3.0), Distance::Infinite]);
    }

    #[test]
    fn incident_edges_follow_storage_order() {
        let graph = Graph {
            nodes: (0..3).map(node).collect(),
            edges: vec![Edge::new(1, 2, 5.0), Edge::new(0, 1, 2.0)],
        };
        let around_one: Vec<_> = graph.incident(NodeId(1)).map(|(_, other)| other).collect();
        assert_eq!(around_one, vec![NodeId(2), NodeId(0)]);
        assert!(graph.has_edge(NodeId(2), NodeId(1)));
        assert!(!graph.has_edge(NodeId(0), NodeId(2)));
    }

    #[test]
    fn validate_rejects_broken_graphs() {
        let mut graph = Graph {
            nodes: (0..2).map(node).collect(),
            edges: vec![Edge::new(0, 1, 1.0)],
        };
        assert!(graph.validate().is_ok());

        graph.edges.push(Edge::new(1, 1, 1.0));
        assert!(graph.validate().is_err());

        graph.edges.pop();
        graph.edges.push(Edge::new(0, 5, 1.0));
        assert!(graph.validate().is_err());

        graph.edges.pop();
        graph.edges.push(Edge::new(0, 1, -2.0));
        assert!(graph.validate().is_err());

        assert!(Graph::default().validate().is_err());
    }
}
