//! Linear and binary search over an integer array.

use super::{Advance, Outbox, Steps};
use crate::step::{highlights, ArraySnapshot, Highlights, Step, Tag};

fn frame(values: &[i64], highlights: Highlights, message: String) -> Step {
    Step::Array(ArraySnapshot {
        values: values.to_vec(),
        highlights,
        message,
    })
}

fn not_found(values: &[i64], target: i64) -> Step {
    frame(
        values,
        Highlights::new(),
        format!("{target} not found in the array."),
    )
}

fn found(values: &[i64], target: i64, index: usize) -> Step {
    frame(
        values,
        highlights([(index, Tag::Found)]),
        format!("Found {target} at index {index}."),
    )
}

/// Scan left to right, probing every index until the target turns up.
pub struct LinearSearch {
    values: Vec<i64>,
    target: i64,
    next: Option<usize>,
}

pub fn linear_search(values: &[i64], target: i64) -> Steps<LinearSearch> {
    Steps::new(LinearSearch {
        values: values.to_vec(),
        target,
        next: None,
    })
}

impl Advance for LinearSearch {
    fn advance(&mut self, out: &mut Outbox) -> bool {
        let i = match self.next {
            None => {
                out.push_back(frame(
                    &self.values,
                    Highlights::new(),
                    format!("Searching for {}.", self.target),
                ));
                self.next = Some(0);
                return true;
            }
            Some(i) => i,
        };

        let Some(&value) = self.values.get(i) else {
            out.push_back(not_found(&self.values, self.target));
            return false;
        };
        out.push_back(frame(
            &self.values,
            highlights([(i, Tag::Probe)]),
            format!("Checking index {i} ({value})."),
        ));
        if value == self.target {
            out.push_back(found(&self.values, self.target, i));
            return false;
        }
        self.next = Some(i + 1);
        true
    }
}

/// Halve a sorted copy of the array until the target is found or the range is empty.
pub struct BinarySearch {
    values: Vec<i64>,
    target: i64,
    // Half-open candidate range.
    lo: usize,
    hi: usize,
    announced: bool,
}

pub fn binary_search(values: &[i64], target: i64) -> Steps<BinarySearch> {
    let mut sorted = values.to_vec();
    sorted.sort();
    let hi = sorted.len();
    Steps::new(BinarySearch {
        values: sorted,
        target,
        lo: 0,
        hi,
        announced: false,
    })
}

impl Advance for BinarySearch {
    fn advance(&mut self, out: &mut Outbox) -> bool {
        if !self.announced {
            self.announced = true;
            out.push_back(frame(
                &self.values,
                Highlights::new(),
                format!("Array must be sorted. Searching for {}.", self.target),
            ));
            return true;
        }
        if self.lo >= self.hi {
            out.push_back(not_found(&self.values, self.target));
            return false;
        }

        let mid = self.lo + (self.hi - self.lo - 1) / 2;
        let value = self.values[mid];
        let mut marks: Highlights = (0..self.values.len())
            .filter(|&i| i < self.lo || i >= self.hi)
            .map(|i| (i, Tag::Eliminated))
            .collect();
        marks.insert(mid, Tag::Probe);
        out.push_back(frame(
            &self.values,
            marks,
            format!("Probing middle element {value} at index {mid}."),
        ));

        if value == self.target {
            out.push_back(found(&self.values, self.target, mid));
            return false;
        }
        if value < self.target {
            self.lo = mid + 1;
        } else {
            self.hi = mid;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages<I: Iterator<Item = Step>>(steps: I) -> Vec<String> {
        steps.map(|s| s.message().to_string()).collect()
    }

    #[test]
    fn linear_search_probes_until_found() {
        let msgs = messages(linear_search(&[4, 7, 9], 7));
        assert_eq!(
            msgs,
            vec![
                "Searching for 7.",
                "Checking index 0 (4).",
                "Checking index 1 (7).",
                "Found 7 at index 1.",
            ]
        );
    }

    #[test]
    fn linear_search_reports_absence() {
        let steps: Vec<Step> = linear_search(&[1, 2], 5).collect();
        assert_eq!(steps.len(), 4);
        assert_eq!(steps[3].message(), "5 not found in the array.");
    }

    #[test]
    fn linear_search_on_empty_array() {
        let msgs = messages(linear_search(&[], 3));
        assert_eq!(msgs, vec!["Searching for 3.", "3 not found in the array."]);
    }

    #[test]
    fn binary_search_works_on_sorted_copy() {
        let steps: Vec<Step> = binary_search(&[50, 10, 40, 20, 30], 40).collect();
        let first = steps[0].as_array().unwrap();
        assert_eq!(first.values, vec![10, 20, 30, 40, 50]);
        assert!(first.message.starts_with("Array must be sorted."));

        let last = steps.last().unwrap().as_array().unwrap();
        assert_eq!(last.message, "Found 40 at index 3.");
        assert_eq!(last.highlights.get(&3), Some(&Tag::Found));
    }

    #[test]
    fn binary_search_eliminates_outside_range() {
        let steps: Vec<Step> = binary_search(&[1, 2, 3, 4, 5, 6, 7], 7).collect();
        // Second probe happens after the lower half was discarded.
        let second_probe = steps[2].as_array().unwrap();
        assert_eq!(second_probe.highlights.get(&0), Some(&Tag::Eliminated));
        assert_eq!(second_probe.highlights.get(&3), Some(&Tag::Eliminated));
        assert!(second_probe.highlights.values().any(|t| *t == Tag::Probe));
    }

    #[test]
    fn binary_search_reports_absence() {
        let last = binary_search(&[2, 4, 6], 5).last().unwrap();
        assert_eq!(last.message(), "5 not found in the array.");
    }
}
