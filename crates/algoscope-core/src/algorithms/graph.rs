//! Shortest paths and minimum spanning trees over undirected weighted graphs.

use std::collections::{BTreeMap, BTreeSet};

use super::{first_min_by, Advance, Outbox, Steps};
use crate::graph::{Distance, Edge, EdgeKey, Graph, NodeId};
use crate::step::{GraphSnapshot, Step, Tag};

const START: NodeId = NodeId(0);

fn snapshot(
    graph: &Graph,
    node_highlights: BTreeMap<NodeId, Tag>,
    edge_highlights: BTreeMap<EdgeKey, Tag>,
    distances: Option<BTreeMap<NodeId, Distance>>,
    message: String,
) -> Step {
    Step::Graph(GraphSnapshot {
        graph: graph.clone(),
        node_highlights,
        edge_highlights,
        distances,
        message,
    })
}

fn format_weight(w: f64) -> String {
    if w.fract() == 0.0 {
        format!("{w:.0}")
    } else {
        format!("{w:.2}")
    }
}

#[derive(Debug, Clone, Copy)]
struct Neighbor {
    key: EdgeKey,
    node: NodeId,
    weight: f64,
}

enum DijkstraPhase {
    Start,
    Pop,
    Relax {
        node: NodeId,
        neighbors: Vec<Neighbor>,
        next: usize,
    },
    Finish,
}

/// Single-source shortest paths from node 0, reporting the path to one destination.
///
/// The queue holds `(node, tentative distance)` entries and always pops the
/// first minimal one. Entries made stale by a later relaxation are still
/// processed when popped.
pub struct Dijkstra {
    graph: Graph,
    destination: NodeId,
    dist: Vec<f64>,
    prev: Vec<Option<NodeId>>,
    queue: Vec<(NodeId, f64)>,
    visited: BTreeSet<NodeId>,
    phase: DijkstraPhase,
}

pub fn dijkstra(graph: &Graph, destination: NodeId) -> Steps<Dijkstra> {
    let n = graph.node_count();
    let mut dist = vec![f64::INFINITY; n];
    let mut queue = Vec::new();
    if n > 0 {
        dist[START.0] = 0.0;
        queue.push((START, 0.0));
    }
    Steps::new(Dijkstra {
        graph: graph.clone(),
        destination,
        dist,
        prev: vec![None; n],
        queue,
        visited: BTreeSet::new(),
        phase: DijkstraPhase::Start,
    })
}

impl Dijkstra {
    fn distances(&self) -> BTreeMap<NodeId, Distance> {
        self.dist
            .iter()
            .enumerate()
            .map(|(i, &d)| {
                let d = if d.is_finite() {
                    Distance::Finite(d)
                } else {
                    Distance::Infinite
                };
                (NodeId(i), d)
            })
            .collect()
    }

    fn visited_marks(&self) -> BTreeMap<NodeId, Tag> {
        self.visited.iter().map(|&v| (v, Tag::Visited)).collect()
    }

    fn frame(
        &self,
        nodes: BTreeMap<NodeId, Tag>,
        edges: BTreeMap<EdgeKey, Tag>,
        message: String,
    ) -> Step {
        snapshot(&self.graph, nodes, edges, Some(self.distances()), message)
    }

    /// Back-pointer walk from the destination to the start, if it was reached.
    fn path(&self) -> Option<Vec<NodeId>> {
        let d = self.dist.get(self.destination.0)?;
        if !d.is_finite() {
            return None;
        }
        let mut path = vec![self.destination];
        let mut current = self.destination;
        while let Some(prev) = self.prev[current.0] {
            path.push(prev);
            current = prev;
        }
        path.reverse();
        Some(path)
    }

    fn finish(&self, out: &mut Outbox) {
        let Some(path) = self.path() else {
            out.push_back(self.frame(
                self.visited_marks(),
                BTreeMap::new(),
                format!(
                    "Node {} is unreachable from node {START}.",
                    self.destination
                ),
            ));
            return;
        };

        let nodes = path.iter().map(|&v| (v, Tag::Path)).collect();
        let edges = path
            .windows(2)
            .map(|w| (EdgeKey::new(w[0], w[1]), Tag::Path))
            .collect();
        let route: Vec<String> = path.iter().map(|v| v.to_string()).collect();
        out.push_back(self.frame(
            nodes,
            edges,
            format!(
                "Shortest path to node {} is {} with total distance {}.",
                self.destination,
                route.join(" -> "),
                format_weight(self.dist[self.destination.0])
            ),
        ));
    }
}

impl Advance for Dijkstra {
    fn advance(&mut self, out: &mut Outbox) -> bool {
        match std::mem::replace(&mut self.phase, DijkstraPhase::Finish) {
            DijkstraPhase::Start => {
                if self.graph.node_count() == 0 {
                    self.finish(out);
                    return false;
                }
                out.push_back(self.frame(
                    [(START, Tag::Consider)].into_iter().collect(),
                    BTreeMap::new(),
                    format!(
                        "Starting Dijkstra from node {START}, looking for node {}.",
                        self.destination
                    ),
                ));
                self.phase = DijkstraPhase::Pop;
            }
            DijkstraPhase::Pop => {
                let Some(index) = first_min_by(&self.queue, |entry| entry.1) else {
                    self.finish(out);
                    return false;
                };
                let (node, _) = self.queue.remove(index);
                self.visited.insert(node);
                out.push_back(self.frame(
                    self.visited_marks(),
                    BTreeMap::new(),
                    format!("Visiting node {node}."),
                ));
                let neighbors = self
                    .graph
                    .incident(node)
                    .map(|(edge, other)| Neighbor {
                        key: edge.key(),
                        node: other,
                        weight: edge.weight,
                    })
                    .collect();
                self.phase = DijkstraPhase::Relax {
                    node,
                    neighbors,
                    next: 0,
                };
            }
            DijkstraPhase::Relax {
                node,
                neighbors,
                next,
            } => {
                let Some(&neighbor) = neighbors.get(next) else {
                    self.phase = DijkstraPhase::Pop;
                    return true;
                };
                let v = neighbor.node;

                let mut nodes = self.visited_marks();
                nodes.insert(v, Tag::Consider);
                let edges: BTreeMap<_, _> = [(neighbor.key, Tag::Consider)].into_iter().collect();
                out.push_back(self.frame(nodes.clone(), edges.clone(), format!("Checking neighbor {v}.")));

                let alt = self.dist[node.0] + neighbor.weight;
                if alt < self.dist[v.0] {
                    self.dist[v.0] = alt;
                    self.prev[v.0] = Some(node);
                    self.queue.push((v, alt));
                    out.push_back(self.frame(
                        nodes,
                        edges,
                        format!("Updated distance to {v} to {}.", format_weight(alt)),
                    ));
                }
                self.phase = DijkstraPhase::Relax {
                    node,
                    neighbors,
                    next: next + 1,
                };
            }
            DijkstraPhase::Finish => {
                self.finish(out);
                return false;
            }
        }
        true
    }
}

/// Prim's minimum spanning tree grown from node 0.
///
/// The frontier keeps candidate edges in insertion order and always takes the
/// first lightest one.
pub struct Prim {
    graph: Graph,
    visited: Vec<bool>,
    tree: Vec<EdgeKey>,
    frontier: Vec<Edge>,
    total: f64,
    started: bool,
}

pub fn prim(graph: &Graph) -> Steps<Prim> {
    Steps::new(Prim {
        graph: graph.clone(),
        visited: vec![false; graph.node_count()],
        tree: Vec::new(),
        frontier: Vec::new(),
        total: 0.0,
        started: false,
    })
}

impl Prim {
    fn node_marks(&self) -> BTreeMap<NodeId, Tag> {
        self.visited
            .iter()
            .enumerate()
            .filter(|(_, seen)| **seen)
            .map(|(i, _)| (NodeId(i), Tag::Visited))
            .collect()
    }

    fn tree_marks(&self) -> BTreeMap<EdgeKey, Tag> {
        self.tree.iter().map(|&k| (k, Tag::Path)).collect()
    }

    fn frame(&self, edges: BTreeMap<EdgeKey, Tag>, message: String) -> Step {
        snapshot(&self.graph, self.node_marks(), edges, None, message)
    }

    fn visit(&mut self, node: NodeId) {
        self.visited[node.0] = true;
        let fresh: Vec<Edge> = self
            .graph
            .incident(node)
            .filter(|(_, other)| !self.visited[other.0])
            .map(|(edge, _)| *edge)
            .collect();
        self.frontier.extend(fresh);
    }

    fn spanning(&self) -> bool {
        self.visited.iter().all(|&seen| seen)
    }

    fn finish(&self, out: &mut Outbox) {
        let message = if self.spanning() {
            format!(
                "Minimum Spanning Tree found (total weight {}).",
                format_weight(self.total)
            )
        } else {
            let reached = self.visited.iter().filter(|&&seen| seen).count();
            format!(
                "Graph is disconnected. The tree spans {reached} of {} nodes.",
                self.visited.len()
            )
        };
        out.push_back(self.frame(self.tree_marks(), message));
    }
}

impl Advance for Prim {
    fn advance(&mut self, out: &mut Outbox) -> bool {
        if !self.started {
            self.started = true;
            if self.visited.is_empty() {
                self.finish(out);
                return false;
            }
            self.visit(START);
            out.push_back(self.frame(
                BTreeMap::new(),
                format!("Starting Prim's algorithm from node {START}."),
            ));
            return true;
        }

        if self.spanning() {
            self.finish(out);
            return false;
        }
        let Some(index) = first_min_by(&self.frontier, |edge| edge.weight) else {
            self.finish(out);
            return false;
        };
        let edge = self.frontier.remove(index);
        let key = edge.key();

        let mut edges = self.tree_marks();
        edges.insert(key, Tag::Consider);
        out.push_back(self.frame(
            edges.clone(),
            format!(
                "Considering edge {key} (weight {}).",
                format_weight(edge.weight)
            ),
        ));

        let far = [edge.source, edge.target]
            .into_iter()
            .find(|v| !self.visited[v.0]);
        match far {
            Some(node) => {
                self.tree.push(key);
                self.total += edge.weight;
                self.visit(node);
                out.push_back(self.frame(
                    self.tree_marks(),
                    format!("Added edge {key} to the tree, reaching node {node}."),
                ));
            }
            None => {
                edges.insert(key, Tag::Reject);
                out.push_back(self.frame(
                    edges,
                    format!("Edge {key} would form a cycle. Rejected."),
                ));
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Node;

    fn graph(n: usize, edges: &[(usize, usize, f64)]) -> Graph {
        Graph {
            nodes: (0..n)
                .map(|i| Node {
                    id: NodeId(i),
                    x: 0.0,
                    y: 0.0,
                })
                .collect(),
            edges: edges.iter().map(|&(u, v, w)| Edge::new(u, v, w)).collect(),
        }
    }

    fn square() -> Graph {
        graph(
            4,
            &[(0, 1, 1.0), (1, 2, 2.0), (0, 2, 5.0), (2, 3, 1.0), (0, 3, 10.0)],
        )
    }

    #[test]
    fn dijkstra_finds_shortest_path() {
        let last = dijkstra(&square(), NodeId(3)).last().unwrap();
        let snap = last.as_graph().unwrap();
        let distances = snap.distances.as_ref().unwrap();
        assert_eq!(distances[&NodeId(3)], Distance::Finite(4.0));
        assert_eq!(distances[&NodeId(2)], Distance::Finite(3.0));
        assert_eq!(
            snap.message,
            "Shortest path to node 3 is 0 -> 1 -> 2 -> 3 with total distance 4."
        );
        assert_eq!(snap.edge_highlights.len(), 3);
        assert!(snap.edge_highlights.values().all(|t| *t == Tag::Path));
    }

    #[test]
    fn dijkstra_reports_unreachable_destination() {
        let g = graph(3, &[(0, 1, 1.0)]);
        let last = dijkstra(&g, NodeId(2)).last().unwrap();
        let snap = last.as_graph().unwrap();
        assert_eq!(snap.message, "Node 2 is unreachable from node 0.");
        assert_eq!(
            snap.distances.as_ref().unwrap()[&NodeId(2)],
            Distance::Infinite
        );
    }

    #[test]
    fn dijkstra_frames_follow_visit_check_update() {
        let g = graph(2, &[(0, 1, 7.0)]);
        let messages: Vec<String> = dijkstra(&g, NodeId(1))
            .map(|s| s.message().to_string())
            .collect();
        assert_eq!(
            messages,
            vec![
                "Starting Dijkstra from node 0, looking for node 1.",
                "Visiting node 0.",
                "Checking neighbor 1.",
                "Updated distance to 1 to 7.",
                "Visiting node 1.",
                "Checking neighbor 0.",
                "Shortest path to node 1 is 0 -> 1 with total distance 7.",
            ]
        );
    }

    #[test]
    fn dijkstra_to_start_is_trivial_path() {
        let last = dijkstra(&square(), NodeId(0)).last().unwrap();
        assert!(last.message().contains("total distance 0"));
    }

    #[test]
    fn prim_builds_minimum_tree() {
        let steps: Vec<Step> = prim(&square()).collect();
        let last = steps.last().unwrap().as_graph().unwrap();
        assert_eq!(last.message, "Minimum Spanning Tree found (total weight 4).");
        assert_eq!(last.edge_highlights.len(), 3);
        assert!(last.distances.is_none());
    }

    #[test]
    fn prim_rejects_cycle_edges() {
        let g = graph(4, &[(0, 1, 1.0), (0, 2, 2.0), (1, 2, 3.0), (2, 3, 4.0)]);
        let steps: Vec<Step> = prim(&g).collect();
        let rejected = steps
            .iter()
            .find(|s| s.message() == "Edge 1-2 would form a cycle. Rejected.")
            .unwrap();
        let key = EdgeKey::new(NodeId(1), NodeId(2));
        assert_eq!(
            rejected.as_graph().unwrap().edge_highlights.get(&key),
            Some(&Tag::Reject)
        );
        assert_eq!(
            steps.last().unwrap().message(),
            "Minimum Spanning Tree found (total weight 7)."
        );
    }

    #[test]
    fn prim_on_disconnected_graph() {
        let g = graph(3, &[(0, 1, 2.0)]);
        let last = prim(&g).last().unwrap();
        assert_eq!(
            last.message(),
            "Graph is disconnected. The tree spans 2 of 3 nodes."
        );
    }

    #[test]
    fn single_node_graphs() {
        let g = graph(1, &[]);
        assert_eq!(
            prim(&g).last().unwrap().message(),
            "Minimum Spanning Tree found (total weight 0)."
        );
        assert!(dijkstra(&g, NodeId(0))
            .last()
            .unwrap()
            .message()
            .contains("total distance 0"));
    }
}
