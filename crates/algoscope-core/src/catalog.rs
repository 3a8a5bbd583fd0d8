//! Problem families and the algorithms each one offers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A problem family. Determines the dataset shape and the applicable algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Family {
    Sorting,
    Searching,
    StringSearching,
    Greedy,
    Graph,
}

impl Family {
    /// Every family, in menu order.
    pub const ALL: [Family; 5] = [
        Family::Sorting,
        Family::Searching,
        Family::StringSearching,
        Family::Greedy,
        Family::Graph,
    ];

    /// Human-readable family name.
    pub fn name(&self) -> &'static str {
        match self {
            Family::Sorting => "Sorting",
            Family::Searching => "Searching",
            Family::StringSearching => "String Searching",
            Family::Greedy => "Greedy",
            Family::Graph => "Graph",
        }
    }

    /// Algorithms available for this family, in menu order.
    pub fn algorithms(&self) -> &'static [Algorithm] {
        match self {
            Family::Sorting => &[
                Algorithm::BubbleSort,
                Algorithm::InsertionSort,
                Algorithm::SelectionSort,
                Algorithm::MergeSort,
                Algorithm::QuickSort,
            ],
            Family::Searching => &[Algorithm::LinearSearch, Algorithm::BinarySearch],
            Family::StringSearching => &[Algorithm::NaiveSearch, Algorithm::Kmp],
            Family::Greedy => &[Algorithm::ActivitySelection, Algorithm::FractionalKnapsack],
            Family::Graph => &[Algorithm::Dijkstra, Algorithm::Prim],
        }
    }

    /// Algorithm selected when the user switches to this family.
    pub fn default_algorithm(&self) -> Algorithm {
        self.algorithms()[0]
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Family {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Family::ALL
            .into_iter()
            .find(|family| normalize(family.name()) == wanted)
            .ok_or_else(|| Error::InvalidInput(format!("unknown family: {s}")))
    }
}

/// Every algorithm the engine can dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    BubbleSort,
    InsertionSort,
    SelectionSort,
    MergeSort,
    QuickSort,
    LinearSearch,
    BinarySearch,
    NaiveSearch,
    Kmp,
    ActivitySelection,
    FractionalKnapsack,
    Dijkstra,
    Prim,
}

impl Algorithm {
    pub const ALL: [Algorithm; 13] = [
        Algorithm::BubbleSort,
        Algorithm::InsertionSort,
        Algorithm::SelectionSort,
        Algorithm::MergeSort,
        Algorithm::QuickSort,
        Algorithm::LinearSearch,
        Algorithm::BinarySearch,
        Algorithm::NaiveSearch,
        Algorithm::Kmp,
        Algorithm::ActivitySelection,
        Algorithm::FractionalKnapsack,
        Algorithm::Dijkstra,
        Algorithm::Prim,
    ];

    /// Display name shown in menus and messages.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::BubbleSort => "Bubble Sort",
            Algorithm::InsertionSort => "Insertion Sort",
            Algorithm::SelectionSort => "Selection Sort",
            Algorithm::MergeSort => "Merge Sort",
            Algorithm::QuickSort => "Quick Sort",
            Algorithm::LinearSearch => "Linear Search",
            Algorithm::BinarySearch => "Binary Search",
            Algorithm::NaiveSearch => "Naive Search",
            Algorithm::Kmp => "Knuth-Morris-Pratt",
            Algorithm::ActivitySelection => "Activity Selection",
            Algorithm::FractionalKnapsack => "Fractional Knapsack",
            Algorithm::Dijkstra => "Dijkstra's Algorithm",
            Algorithm::Prim => "Prim's Algorithm",
        }
    }

    /// Stable kebab-case identifier, matching the serde representation.
    pub fn id(&self) -> &'static str {
        match self {
            Algorithm::BubbleSort => "bubble-sort",
            Algorithm::InsertionSort => "insertion-sort",
            Algorithm::SelectionSort => "selection-sort",
            Algorithm::MergeSort => "merge-sort",
            Algorithm::QuickSort => "quick-sort",
            Algorithm::LinearSearch => "linear-search",
            Algorithm::BinarySearch => "binary-search",
            Algorithm::NaiveSearch => "naive-search",
            Algorithm::Kmp => "kmp",
            Algorithm::ActivitySelection => "activity-selection",
            Algorithm::FractionalKnapsack => "fractional-knapsack",
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::Prim => "prim",
        }
    }

    /// The family this algorithm belongs to.
    pub fn family(&self) -> Family {
        match self {
            Algorithm::BubbleSort
            | Algorithm::InsertionSort
            | Algorithm::SelectionSort
            | Algorithm::MergeSort
            | Algorithm::QuickSort => Family::Sorting,
            Algorithm::LinearSearch | Algorithm::BinarySearch => Family::Searching,
            Algorithm::NaiveSearch | Algorithm::Kmp => Family::StringSearching,
            Algorithm::ActivitySelection | Algorithm::FractionalKnapsack => Family::Greedy,
            Algorithm::Dijkstra | Algorithm::Prim => Family::Graph,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    /// Accepts either the kebab-case id or the display name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Algorithm::ALL
            .into_iter()
            .find(|algo| normalize(algo.id()) == wanted || normalize(algo.name()) == wanted)
            .ok_or_else(|| Error::UnknownAlgorithm(s.trim().to_string()))
    }
}

// Lowercase alphanumerics only, so "Dijkstra's Algorithm", "dijkstras-algorithm"
// and "DIJKSTRAS ALGORITHM" compare equal.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_algorithm_is_listed_under_its_family() {
        for algo in Algorithm::ALL {
            assert!(
                algo.family().algorithms().contains(&algo),
                "{} missing from {}",
                algo,
                algo.family()
            );
        }
        let listed: usize = Family::ALL.iter().map(|f| f.algorithms().len()).sum();
        assert_eq!(listed, Algorithm::ALL.len());
    }

    #[test]
    fn default_algorithms() {
        assert_eq!(Family::Sorting.default_algorithm(), Algorithm::BubbleSort);
        assert_eq!(Family::Searching.default_algorithm(), Algorithm::LinearSearch);
        assert_eq!(Family::StringSearching.default_algorithm(), Algorithm::NaiveSearch);
        assert_eq!(Family::Greedy.default_algorithm(), Algorithm::ActivitySelection);
        assert_eq!(Family::Graph.default_algorithm(), Algorithm::Dijkstra);
    }

    #[test]
    fn parses_ids_and_display_names() {
        assert_eq!("bubble-sort".parse::<Algorithm>().unwrap(), Algorithm::BubbleSort);
        assert_eq!("Dijkstra's Algorithm".parse::<Algorithm>().unwrap(), Algorithm::Dijkstra);
        assert_eq!(" KNUTH-MORRIS-PRATT ".parse::<Algorithm>().unwrap(), Algorithm::Kmp);
        assert_eq!("string searching".parse::<Family>().unwrap(), Family::StringSearching);
    }

    #[test]
    fn unknown_identifier_is_an_error() {
        let err = "bogo-sort".parse::<Algorithm>().unwrap_err();
        assert_eq!(err, Error::UnknownAlgorithm("bogo-sort".into()));
        assert_eq!(err.to_string(), "bogo-sort is not implemented yet");
    }

    #[test]
    fn serde_uses_ids() {
        for algo in Algorithm::ALL {
            let json = serde_json::to_string(&algo).unwrap();
            assert_eq!(json, format!("\"{}\"", algo.id()));
        }
        assert_eq!(
            serde_json::to_string(&Family::StringSearching).unwrap(),
            "\"string-searching\""
        );
    }
}
