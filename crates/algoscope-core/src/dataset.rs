//! Random dataset generators, one per problem family.
//!
//! Every generator takes the random source explicitly so that a seeded
//! [`rand_chacha::ChaCha8Rng`] reproduces the same dataset on every run.

use std::ops::RangeInclusive;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::Family;
use crate::graph::{Edge, Graph, Node, NodeId};
use crate::step::{Activity, Item};

/// Number of elements in a generated array.
pub const ARRAY_LEN: usize = 20;

/// Range of generated array values.
pub const ARRAY_VALUES: RangeInclusive<i64> = 10..=99;

/// Text searched by the string-matching family.
pub const TEXT_CORPUS: &str = "ABACADABRACADABRA";

/// Patterns the generator picks from. Each fits inside [`TEXT_CORPUS`].
pub const PATTERN_CANDIDATES: [&str; 4] = ["ABRA", "CADA", "DAB", "ABRACADABRA"];

/// Number of generated activities.
pub const ACTIVITY_COUNT: usize = 8;

/// Number of generated knapsack items.
pub const KNAPSACK_ITEMS: usize = 5;

/// Fixed knapsack capacity.
pub const KNAPSACK_CAPACITY: f64 = 30.0;

/// Number of nodes in a generated graph.
pub const GRAPH_NODES: usize = 7;

/// Text and pattern for string matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextProblem {
    pub text: String,
    pub pattern: String,
}

/// Items and capacity for the fractional knapsack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnapsackProblem {
    pub items: Vec<Item>,
    pub capacity: f64,
}

/// Both greedy problems, so switching between the two greedy algorithms keeps the data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GreedyProblems {
    pub activities: Vec<Activity>,
    pub knapsack: KnapsackProblem,
}

/// Input handed to exactly one step-generator invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", content = "data", rename_all = "snake_case")]
pub enum Dataset {
    /// Sorting and searching share the array shape.
    Array(Vec<i64>),
    Text(TextProblem),
    Greedy(GreedyProblems),
    Graph(Graph),
}

impl Dataset {
    /// Generate a fresh random dataset shaped for `family`.
    pub fn generate<R: Rng>(family: Family, rng: &mut R) -> Self {
        match family {
            Family::Sorting | Family::Searching => Dataset::Array(generate_array(rng)),
            Family::StringSearching => Dataset::Text(generate_text_problem(rng)),
            Family::Greedy => Dataset::Greedy(GreedyProblems {
                activities: generate_activities(rng),
                knapsack: generate_knapsack(rng),
            }),
            Family::Graph => Dataset::Graph(generate_graph(rng)),
        }
    }

    /// Short name of the dataset shape, used in error messages.
    pub fn shape(&self) -> &'static str {
        match self {
            Dataset::Array(_) => "array",
            Dataset::Text(_) => "text",
            Dataset::Greedy(_) => "greedy",
            Dataset::Graph(_) => "graph",
        }
    }

    /// Whether this dataset has the shape `family` expects.
    pub fn fits(&self, family: Family) -> bool {
        matches!(
            (self, family),
            (Dataset::Array(_), Family::Sorting | Family::Searching)
                | (Dataset::Text(_), Family::StringSearching)
                | (Dataset::Greedy(_), Family::Greedy)
                | (Dataset::Graph(_), Family::Graph)
        )
    }
}

/// [`ARRAY_LEN`] values drawn uniformly from [`ARRAY_VALUES`].
pub fn generate_array<R: Rng>(rng: &mut R) -> Vec<i64> {
    (0..ARRAY_LEN).map(|_| rng.gen_range(ARRAY_VALUES)).collect()
}

/// The fixed corpus with a pattern picked uniformly from [`PATTERN_CANDIDATES`].
pub fn generate_text_problem<R: Rng>(rng: &mut R) -> TextProblem {
    let pattern = PATTERN_CANDIDATES[rng.gen_range(0..PATTERN_CANDIDATES.len())];
    TextProblem {
        text: TEXT_CORPUS.to_string(),
        pattern: pattern.to_string(),
    }
}

/// [`ACTIVITY_COUNT`] activities, sorted ascending by finish time.
///
/// Activity selection depends on this ordering.
pub fn generate_activities<R: Rng>(rng: &mut R) -> Vec<Activity> {
    let mut activities: Vec<Activity> = (0..ACTIVITY_COUNT)
        .map(|i| {
            let start = f64::from(rng.gen_range(0..=19_u32));
            let finish = start + f64::from(rng.gen_range(2..=6_u32));
            Activity::new(start, finish, format!("Activity {}", i + 1))
        })
        .collect();
    activities.sort_by(|a, b| a.finish.total_cmp(&b.finish));
    activities
}

/// [`KNAPSACK_ITEMS`] items with capacity [`KNAPSACK_CAPACITY`].
pub fn generate_knapsack<R: Rng>(rng: &mut R) -> KnapsackProblem {
    let items = (0..KNAPSACK_ITEMS)
        .map(|_| {
            let weight = f64::from(rng.gen_range(5..=19_u32));
            let value = f64::from(rng.gen_range(10..=49_u32));
            Item::new(weight, value)
        })
        .collect();
    KnapsackProblem {
        items,
        capacity: KNAPSACK_CAPACITY,
    }
}

/// A connected graph of [`GRAPH_NODES`] nodes at random planar positions.
///
/// One random edge per node, then a pass that links `i` to `i + 1` wherever
/// that edge is missing, which guarantees connectivity. No self loops or
/// duplicate edges.
pub fn generate_graph<R: Rng>(rng: &mut R) -> Graph {
    let n = GRAPH_NODES;
    let nodes: Vec<Node> = (0..n)
        .map(|i| Node {
            id: NodeId(i),
            x: f64::from(rng.gen_range(25..=574_u32)),
            y: f64::from(rng.gen_range(25..=374_u32)),
        })
        .collect();

    let mut graph = Graph {
        nodes,
        edges: Vec::new(),
    };

    for i in 0..n {
        let target = (i + rng.gen_range(0..n - 2) + 1) % n;
        if i != target && !graph.has_edge(NodeId(i), NodeId(target)) {
            let weight = random_weight(rng);
            graph.edges.push(Edge::new(i, target, weight));
        }
    }

    for i in 0..n - 1 {
        if !graph.has_edge(NodeId(i), NodeId(i + 1)) {
            let weight = random_weight(rng);
            graph.edges.push(Edge::new(i, i + 1, weight));
        }
    }

    graph
}

fn random_weight<R: Rng>(rng: &mut R) -> f64 {
    f64::from(rng.gen_range(1..=20_u32))
}
