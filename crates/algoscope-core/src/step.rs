//! Animation steps: one immutable snapshot per observable state transition.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Deserializer, Serialize};

use crate::graph::{Distance, EdgeKey, Graph, NodeId};

/// Highlight category applied to an index, node or edge.
///
/// The neutral category is the absence of an entry in a highlight map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tag {
    Compare,
    Swap,
    Sorted,
    Found,
    Pivot,
    Probe,
    Eliminated,
    Match,
    Mismatch,
    Consider,
    Select,
    Reject,
    Visited,
    Path,
}

/// Sparse index-to-tag map. Keys are always in bounds of the frame they belong to.
pub type Highlights = BTreeMap<usize, Tag>;

/// Build a highlight map from `(index, tag)` pairs. Later pairs win.
pub fn highlights<I>(pairs: I) -> Highlights
where
    I: IntoIterator<Item = (usize, Tag)>,
{
    pairs.into_iter().collect()
}

/// A scheduled activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub start: f64,
    pub finish: f64,
    pub name: String,
}

impl Activity {
    pub fn new(start: f64, finish: f64, name: impl Into<String>) -> Self {
        Self {
            start,
            finish,
            name: name.into(),
        }
    }

    /// Two activities overlap unless one finishes no later than the other starts.
    pub fn overlaps(&self, other: &Activity) -> bool {
        !(self.finish <= other.start || other.finish <= self.start)
    }
}

#[derive(Deserialize)]
struct RawItem {
    weight: f64,
    value: f64,
}

impl From<RawItem> for Item {
    fn from(raw: RawItem) -> Self {
        Item::new(raw.weight, raw.value)
    }
}

/// A knapsack item. `ratio` is always `value / weight`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawItem")]
pub struct Item {
    weight: f64,
    value: f64,
    ratio: f64,
}

impl Item {
    pub fn new(weight: f64, value: f64) -> Self {
        Self {
            weight,
            value,
            ratio: value / weight,
        }
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
        self.ratio = self.value / weight;
    }

    pub fn set_value(&mut self, value: f64) {
        self.value = value;
        self.ratio = value / self.weight;
    }
}

/// Weight and value accumulated in the knapsack so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Load {
    pub weight: f64,
    pub value: f64,
}

/// Frame for sorting and searching over an integer array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArraySnapshot {
    pub values: Vec<i64>,
    #[serde(deserialize_with = "index_keyed")]
    pub highlights: Highlights,
    pub message: String,
}

/// Frame for string matching. The pattern is drawn aligned at `pattern_offset`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextMatchSnapshot {
    pub text: String,
    pub pattern: String,
    #[serde(deserialize_with = "index_keyed")]
    pub text_highlights: Highlights,
    #[serde(deserialize_with = "index_keyed")]
    pub pattern_highlights: Highlights,
    pub pattern_offset: usize,
    pub message: String,
}

/// Frame for activity selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivitySnapshot {
    pub activities: Vec<Activity>,
    #[serde(deserialize_with = "index_keyed")]
    pub highlights: Highlights,
    pub selected: BTreeSet<usize>,
    pub message: String,
}

/// Frame for the fractional knapsack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnapsackSnapshot {
    pub items: Vec<Item>,
    #[serde(deserialize_with = "index_keyed")]
    pub highlights: Highlights,
    pub accumulated: Load,
    pub capacity: f64,
    pub message: String,
}

/// Frame for graph traversal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub graph: Graph,
    #[serde(deserialize_with = "index_keyed")]
    pub node_highlights: BTreeMap<NodeId, Tag>,
    pub edge_highlights: BTreeMap<EdgeKey, Tag>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_index_keyed"
    )]
    pub distances: Option<BTreeMap<NodeId, Distance>>,
    pub message: String,
}

// JSON object keys are strings. Inside the internally tagged `Step` the payload
// is buffered before it is decoded, and buffered string keys no longer coerce to
// integers, so index-keyed maps accept both forms explicitly.
#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct IndexKey(usize);

impl<'de> Deserialize<'de> for IndexKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Index(usize),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Index(i) => Ok(IndexKey(i)),
            Repr::Text(t) => t
                .trim()
                .parse()
                .map(IndexKey)
                .map_err(serde::de::Error::custom),
        }
    }
}

fn index_keyed<'de, D, K, V>(deserializer: D) -> Result<BTreeMap<K, V>, D::Error>
where
    D: Deserializer<'de>,
    K: From<usize> + Ord,
    V: Deserialize<'de>,
{
    let raw = BTreeMap::<IndexKey, V>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|(k, v)| (K::from(k.0), v)).collect())
}

fn optional_index_keyed<'de, D, K, V>(deserializer: D) -> Result<Option<BTreeMap<K, V>>, D::Error>
where
    D: Deserializer<'de>,
    K: From<usize> + Ord,
    V: Deserialize<'de>,
{
    let raw = Option::<BTreeMap<IndexKey, V>>::deserialize(deserializer)?;
    Ok(raw.map(|map| map.into_iter().map(|(k, v)| (K::from(k.0), v)).collect()))
}

/// One visualization frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    Array(ArraySnapshot),
    Text(TextMatchSnapshot),
    Activity(ActivitySnapshot),
    Knapsack(KnapsackSnapshot),
    Graph(GraphSnapshot),
    /// Message-only frame used in place of an animation.
    Notice { message: String },
}

impl Step {
    pub fn notice(message: impl Into<String>) -> Self {
        Step::Notice {
            message: message.into(),
        }
    }

    /// Human-readable description of the transition this frame shows.
    pub fn message(&self) -> &str {
        match self {
            Step::Array(s) => &s.message,
            Step::Text(s) => &s.message,
            Step::Activity(s) => &s.message,
            Step::Knapsack(s) => &s.message,
            Step::Graph(s) => &s.message,
            Step::Notice { message } => message,
        }
    }

    pub fn as_array(&self) -> Option<&ArraySnapshot> {
        match self {
            Step::Array(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextMatchSnapshot> {
        match self {
            Step::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_activity(&self) -> Option<&ActivitySnapshot> {
        match self {
            Step::Activity(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_knapsack(&self) -> Option<&KnapsackSnapshot> {
        match self {
            Step::Knapsack(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_graph(&self) -> Option<&GraphSnapshot> {
        match self {
            Step::Graph(s) => Some(s),
            _ => None,
        }
    }
}
