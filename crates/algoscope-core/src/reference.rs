//! Static reference listings shown next to each animation.

use serde::Serialize;

use crate::catalog::Algorithm;

/// Plain implementations of one algorithm in two languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReferenceListing {
    pub python: &'static str,
    pub rust: &'static str,
}

/// Listing for `algorithm`, if one exists.
pub fn reference_listing(algorithm: Algorithm) -> Option<ReferenceListing> {
    let (python, rust) = match algorithm {
        Algorithm::BubbleSort => (BUBBLE_PY, BUBBLE_RS),
        Algorithm::InsertionSort => (INSERTION_PY, INSERTION_RS),
        Algorithm::SelectionSort => (SELECTION_PY, SELECTION_RS),
        Algorithm::MergeSort => (MERGE_PY, MERGE_RS),
        Algorithm::QuickSort => (QUICK_PY, QUICK_RS),
        Algorithm::LinearSearch => (LINEAR_PY, LINEAR_RS),
        Algorithm::BinarySearch => (BINARY_PY, BINARY_RS),
        Algorithm::NaiveSearch => (NAIVE_PY, NAIVE_RS),
        Algorithm::Kmp => (KMP_PY, KMP_RS),
        Algorithm::ActivitySelection => (ACTIVITY_PY, ACTIVITY_RS),
        Algorithm::FractionalKnapsack => (KNAPSACK_PY, KNAPSACK_RS),
        Algorithm::Dijkstra => (DIJKSTRA_PY, DIJKSTRA_RS),
        Algorithm::Prim => (PRIM_PY, PRIM_RS),
    };
    Some(ReferenceListing { python, rust })
}

const BUBBLE_PY: &str = r#"def bubble_sort(arr):
    n = len(arr)
    for i in range(n - 1):
        for j in range(n - i - 1):
            if arr[j] > arr[j + 1]:
                arr[j], arr[j + 1] = arr[j + 1], arr[j]
    return arr"#;

const BUBBLE_RS: &str = r#"fn bubble_sort(arr: &mut [i64]) {
    let n = arr.len();
    for i in 0..n.saturating_sub(1) {
        for j in 0..n - i - 1 {
            if arr[j] > arr[j + 1] {
                arr.swap(j, j + 1);
            }
        }
    }
}"#;

const INSERTION_PY: &str = r#"def insertion_sort(arr):
    for i in range(1, len(arr)):
        key = arr[i]
        j = i
        while j > 0 and arr[j - 1] > key:
            arr[j] = arr[j - 1]
            j -= 1
        arr[j] = key
    return arr"#;

const INSERTION_RS: &str = r#"fn insertion_sort(arr: &mut [i64]) {
    for i in 1..arr.len() {
        let key = arr[i];
        let mut j = i;
        while j > 0 && arr[j - 1] > key {
            arr[j] = arr[j - 1];
            j -= 1;
        }
        arr[j] = key;
    }
}"#;

const SELECTION_PY: &str = r#"def selection_sort(arr):
    for i in range(len(arr) - 1):
        smallest = i
        for j in range(i + 1, len(arr)):
            if arr[j] < arr[smallest]:
                smallest = j
        arr[i], arr[smallest] = arr[smallest], arr[i]
    return arr"#;

const SELECTION_RS: &str = r#"fn selection_sort(arr: &mut [i64]) {
    for i in 0..arr.len().saturating_sub(1) {
        let mut smallest = i;
        for j in i + 1..arr.len() {
            if arr[j] < arr[smallest] {
                smallest = j;
            }
        }
        arr.swap(i, smallest);
    }
}"#;

const MERGE_PY: &str = r#"def merge_sort(arr):
    if len(arr) <= 1:
        return arr
    mid = len(arr) // 2
    left = merge_sort(arr[:mid])
    right = merge_sort(arr[mid:])
    merged, i, j = [], 0, 0
    while i < len(left) and j < len(right):
        if right[j] < left[i]:
            merged.append(right[j])
            j += 1
        else:
            merged.append(left[i])
            i += 1
    return merged + left[i:] + right[j:]"#;

const MERGE_RS: &str = r#"fn merge_sort(arr: &[i64]) -> Vec<i64> {
    if arr.len() <= 1 {
        return arr.to_vec();
    }
    let (left, right) = arr.split_at(arr.len() / 2);
    let (left, right) = (merge_sort(left), merge_sort(right));
    let mut merged = Vec::with_capacity(arr.len());
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        if right[j] < left[i] {
            merged.push(right[j]);
            j += 1;
        } else {
            merged.push(left[i]);
            i += 1;
        }
    }
    merged.extend_from_slice(&left[i..]);
    merged.extend_from_slice(&right[j..]);
    merged
}"#;

const QUICK_PY: &str = r#"def quick_sort(arr, lo=0, hi=None):
    if hi is None:
        hi = len(arr) - 1
    if lo >= hi:
        return arr
    pivot = arr[hi]
    store = lo
    for j in range(lo, hi):
        if arr[j] < pivot:
            arr[store], arr[j] = arr[j], arr[store]
            store += 1
    arr[store], arr[hi] = arr[hi], arr[store]
    quick_sort(arr, lo, store - 1)
    quick_sort(arr, store + 1, hi)
    return arr"#;

const QUICK_RS: &str = r#"fn quick_sort(arr: &mut [i64]) {
    if arr.len() <= 1 {
        return;
    }
    let hi = arr.len() - 1;
    let pivot = arr[hi];
    let mut store = 0;
    for j in 0..hi {
        if arr[j] < pivot {
            arr.swap(store, j);
            store += 1;
        }
    }
    arr.swap(store, hi);
    let (left, right) = arr.split_at_mut(store);
    quick_sort(left);
    quick_sort(&mut right[1..]);
}"#;

const LINEAR_PY: &str = r#"def linear_search(arr, target):
    for i, value in enumerate(arr):
        if value == target:
            return i
    return -1"#;

const LINEAR_RS: &str = r#"fn linear_search(arr: &[i64], target: i64) -> Option<usize> {
    arr.iter().position(|&value| value == target)
}"#;

const BINARY_PY: &str = r#"def binary_search(arr, target):
    lo, hi = 0, len(arr)
    while lo < hi:
        mid = (lo + hi) // 2
        if arr[mid] == target:
            return mid
        if arr[mid] < target:
            lo = mid + 1
        else:
            hi = mid
    return -1"#;

const BINARY_RS: &str = r#"fn binary_search(arr: &[i64], target: i64) -> Option<usize> {
    let (mut lo, mut hi) = (0, arr.len());
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        match arr[mid].cmp(&target) {
            std::cmp::Ordering::Equal => return Some(mid),
            std::cmp::Ordering::Less => lo = mid + 1,
            std::cmp::Ordering::Greater => hi = mid,
        }
    }
    None
}"#;

const NAIVE_PY: &str = r#"def naive_search(text, pattern):
    n, m = len(text), len(pattern)
    for i in range(n - m + 1):
        if text[i:i + m] == pattern:
            return i
    return -1"#;

const NAIVE_RS: &str = r#"fn naive_search(text: &[char], pattern: &[char]) -> Option<usize> {
    if pattern.len() > text.len() {
        return None;
    }
    (0..=text.len() - pattern.len())
        .find(|&i| text[i..i + pattern.len()] == *pattern)
}"#;

const KMP_PY: &str = r#"def kmp_search(text, pattern):
    lps, length = [0] * len(pattern), 0
    for i in range(1, len(pattern)):
        while length and pattern[i] != pattern[length]:
            length = lps[length - 1]
        if pattern[i] == pattern[length]:
            length += 1
        lps[i] = length
    q = 0
    for i, c in enumerate(text):
        while q and c != pattern[q]:
            q = lps[q - 1]
        if c == pattern[q]:
            q += 1
        if q == len(pattern):
            return i - q + 1
    return -1"#;

const KMP_RS: &str = r#"fn kmp_search(text: &[char], pattern: &[char]) -> Option<usize> {
    let mut lps = vec![0; pattern.len()];
    let mut len = 0;
    for i in 1..pattern.len() {
        while len > 0 && pattern[i] != pattern[len] {
            len = lps[len - 1];
        }
        if pattern[i] == pattern[len] {
            len += 1;
        }
        lps[i] = len;
    }
    let mut q = 0;
    for (i, &c) in text.iter().enumerate() {
        while q > 0 && c != pattern[q] {
            q = lps[q - 1];
        }
        if c == pattern[q] {
            q += 1;
        }
        if q == pattern.len() {
            return Some(i + 1 - q);
        }
    }
    None
}"#;

const ACTIVITY_PY: &str = r#"def activity_selection(activities):
    activities = sorted(activities, key=lambda a: a["finish"])
    selected = [activities[0]]
    for activity in activities[1:]:
        if activity["start"] >= selected[-1]["finish"]:
            selected.append(activity)
    return selected"#;

const ACTIVITY_RS: &str = r#"fn activity_selection(mut activities: Vec<(f64, f64)>) -> Vec<(f64, f64)> {
    activities.sort_by(|a, b| a.1.total_cmp(&b.1));
    let mut selected: Vec<(f64, f64)> = Vec::new();
    for activity in activities {
        match selected.last() {
            Some(last) if activity.0 < last.1 => {}
            _ => selected.push(activity),
        }
    }
    selected
}"#;

const KNAPSACK_PY: &str = r#"def fractional_knapsack(items, capacity):
    items = sorted(items, key=lambda it: it["value"] / it["weight"], reverse=True)
    total = 0.0
    for item in items:
        if capacity <= 0:
            break
        if item["weight"] <= capacity:
            capacity -= item["weight"]
            total += item["value"]
        else:
            total += item["value"] * capacity / item["weight"]
            capacity = 0
    return total"#;

const KNAPSACK_RS: &str = r#"fn fractional_knapsack(mut items: Vec<(f64, f64)>, mut capacity: f64) -> f64 {
    // (weight, value), densest first
    items.sort_by(|a, b| (b.1 / b.0).total_cmp(&(a.1 / a.0)));
    let mut total = 0.0;
    for (weight, value) in items {
        if capacity <= 0.0 {
            break;
        }
        if weight <= capacity {
            capacity -= weight;
            total += value;
        } else {
            total += value * capacity / weight;
            capacity = 0.0;
        }
    }
    total
}"#;

const DIJKSTRA_PY: &str = r#"import heapq

def dijkstra(adjacency, start):
    dist = {node: float("inf") for node in adjacency}
    dist[start] = 0
    queue = [(0, start)]
    while queue:
        d, u = heapq.heappop(queue)
        if d > dist[u]:
            continue
        for v, weight in adjacency[u]:
            alt = d + weight
            if alt < dist[v]:
                dist[v] = alt
                heapq.heappush(queue, (alt, v))
    return dist"#;

const DIJKSTRA_RS: &str = r#"use std::cmp::Reverse;
use std::collections::BinaryHeap;

fn dijkstra(adjacency: &[Vec<(usize, u64)>], start: usize) -> Vec<Option<u64>> {
    let mut dist = vec![None; adjacency.len()];
    let mut queue = BinaryHeap::new();
    dist[start] = Some(0);
    queue.push(Reverse((0, start)));
    while let Some(Reverse((d, u))) = queue.pop() {
        if dist[u].is_some_and(|best| d > best) {
            continue;
        }
        for &(v, weight) in &adjacency[u] {
            let alt = d + weight;
            if dist[v].map_or(true, |best| alt < best) {
                dist[v] = Some(alt);
                queue.push(Reverse((alt, v)));
            }
        }
    }
    dist
}"#;

const PRIM_PY: &str = r#"import heapq

def prim(adjacency, start=0):
    visited = {start}
    frontier = [(w, start, v) for v, w in adjacency[start]]
    heapq.heapify(frontier)
    tree = []
    while frontier and len(visited) < len(adjacency):
        w, u, v = heapq.heappop(frontier)
        if v in visited:
            continue
        visited.add(v)
        tree.append((u, v, w))
        for nxt, weight in adjacency[v]:
            if nxt not in visited:
                heapq.heappush(frontier, (weight, v, nxt))
    return tree"#;

const PRIM_RS: &str = r#"use std::cmp::Reverse;
use std::collections::BinaryHeap;

fn prim(adjacency: &[Vec<(usize, u64)>]) -> Vec<(usize, usize, u64)> {
    let mut visited = vec![false; adjacency.len()];
    let mut frontier = BinaryHeap::new();
    let mut tree = Vec::new();
    visited[0] = true;
    for &(v, w) in &adjacency[0] {
        frontier.push(Reverse((w, 0, v)));
    }
    while let Some(Reverse((w, u, v))) = frontier.pop() {
        if visited[v] {
            continue;
        }
        visited[v] = true;
        tree.push((u, v, w));
        for &(next, weight) in &adjacency[v] {
            if !visited[next] {
                frontier.push(Reverse((weight, v, next)));
            }
        }
    }
    tree
}"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_algorithm_has_a_listing() {
        for algorithm in Algorithm::ALL {
            let listing = reference_listing(algorithm).unwrap();
            assert!(listing.python.starts_with("def ") || listing.python.starts_with("import "));
            assert!(listing.rust.contains("fn "), "{algorithm}");
        }
    }

    #[test]
    fn listings_serialize_by_language() {
        let listing = reference_listing(Algorithm::LinearSearch).unwrap();
        let json = serde_json::to_value(listing).unwrap();
        assert!(json["python"].as_str().unwrap().contains("enumerate"));
        assert!(json["rust"].as_str().unwrap().contains("position"));
    }
}
