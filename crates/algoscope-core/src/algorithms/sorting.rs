//! Comparison sorts over an integer array.

use super::{Advance, Outbox, Steps};
use crate::step::{highlights, ArraySnapshot, Highlights, Step, Tag};

pub(crate) const SORTED_MESSAGE: &str = "Array is sorted!";

fn frame(values: &[i64], highlights: Highlights, message: String) -> Step {
    Step::Array(ArraySnapshot {
        values: values.to_vec(),
        highlights,
        message,
    })
}

fn sorted_frame(values: &[i64]) -> Step {
    frame(values, Highlights::new(), SORTED_MESSAGE.to_string())
}

/// Bubble sort: adjacent compare-and-swap passes.
pub struct BubbleSort {
    values: Vec<i64>,
    pass: usize,
    j: usize,
}

pub fn bubble_sort(values: &[i64]) -> Steps<BubbleSort> {
    Steps::new(BubbleSort {
        values: values.to_vec(),
        pass: 0,
        j: 0,
    })
}

impl Advance for BubbleSort {
    fn advance(&mut self, out: &mut Outbox) -> bool {
        let n = self.values.len();
        if self.pass + 1 >= n {
            out.push_back(sorted_frame(&self.values));
            return false;
        }
        if self.j + 1 >= n - self.pass {
            self.pass += 1;
            self.j = 0;
            return true;
        }

        let j = self.j;
        let (a, b) = (self.values[j], self.values[j + 1]);
        out.push_back(frame(
            &self.values,
            highlights([(j, Tag::Compare), (j + 1, Tag::Compare)]),
            format!("Comparing {a} and {b}."),
        ));
        if a > b {
            self.values.swap(j, j + 1);
            out.push_back(frame(
                &self.values,
                highlights([(j, Tag::Swap), (j + 1, Tag::Swap)]),
                format!("Swapped {a} and {b}."),
            ));
        }
        self.j += 1;
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InsertionPhase {
    Select,
    Scan,
    Place,
    Finish,
}

/// Insertion sort: shift larger elements right until the key's slot opens.
pub struct InsertionSort {
    values: Vec<i64>,
    i: usize,
    hole: usize,
    key: i64,
    phase: InsertionPhase,
}

pub fn insertion_sort(values: &[i64]) -> Steps<InsertionSort> {
    Steps::new(InsertionSort {
        values: values.to_vec(),
        i: 1,
        hole: 0,
        key: 0,
        phase: InsertionPhase::Select,
    })
}

impl Advance for InsertionSort {
    fn advance(&mut self, out: &mut Outbox) -> bool {
        match self.phase {
            InsertionPhase::Select => {
                if self.i >= self.values.len() {
                    self.phase = InsertionPhase::Finish;
                    return true;
                }
                self.key = self.values[self.i];
                self.hole = self.i;
                out.push_back(frame(
                    &self.values,
                    highlights([(self.i, Tag::Pivot)]),
                    format!("Selecting {} as the key to insert.", self.key),
                ));
                self.phase = InsertionPhase::Scan;
            }
            InsertionPhase::Scan => {
                if self.hole == 0 {
                    self.phase = InsertionPhase::Place;
                    return true;
                }
                let h = self.hole;
                let left = self.values[h - 1];
                out.push_back(frame(
                    &self.values,
                    highlights([(h - 1, Tag::Compare), (h, Tag::Compare)]),
                    format!("Comparing {left} and {}.", self.key),
                ));
                if left > self.key {
                    self.values[h] = left;
                    self.hole = h - 1;
                    out.push_back(frame(
                        &self.values,
                        highlights([(h - 1, Tag::Swap), (h, Tag::Swap)]),
                        format!("Shifting {left} right."),
                    ));
                } else {
                    self.phase = InsertionPhase::Place;
                }
            }
            InsertionPhase::Place => {
                let h = self.hole;
                self.values[h] = self.key;
                out.push_back(frame(
                    &self.values,
                    highlights([(h, Tag::Sorted)]),
                    format!("Inserted {} at index {h}.", self.key),
                ));
                self.i += 1;
                self.phase = InsertionPhase::Select;
            }
            InsertionPhase::Finish => {
                out.push_back(sorted_frame(&self.values));
                return false;
            }
        }
        true
    }
}

/// Selection sort: find the minimum of the unsorted suffix, swap it into place.
pub struct SelectionSort {
    values: Vec<i64>,
    i: usize,
    j: usize,
    min: usize,
}

pub fn selection_sort(values: &[i64]) -> Steps<SelectionSort> {
    Steps::new(SelectionSort {
        values: values.to_vec(),
        i: 0,
        j: 1,
        min: 0,
    })
}

impl Advance for SelectionSort {
    fn advance(&mut self, out: &mut Outbox) -> bool {
        let n = self.values.len();
        if self.i + 1 >= n {
            out.push_back(sorted_frame(&self.values));
            return false;
        }

        if self.j < n {
            out.push_back(frame(
                &self.values,
                highlights([
                    (self.i, Tag::Pivot),
                    (self.j, Tag::Compare),
                    (self.min, Tag::Compare),
                ]),
                format!("Finding minimum, current min is {}.", self.values[self.min]),
            ));
            if self.values[self.j] < self.values[self.min] {
                self.min = self.j;
            }
            self.j += 1;
            return true;
        }

        let (i, min) = (self.i, self.min);
        if min != i {
            let (a, b) = (self.values[i], self.values[min]);
            self.values.swap(i, min);
            out.push_back(frame(
                &self.values,
                highlights([(i, Tag::Swap), (min, Tag::Swap)]),
                format!("Swapped {a} and {b}."),
            ));
        } else {
            out.push_back(frame(
                &self.values,
                highlights([(i, Tag::Sorted)]),
                format!("{} is already in place.", self.values[i]),
            ));
        }
        self.i += 1;
        self.j = self.i + 1;
        self.min = self.i;
        true
    }
}

#[derive(Debug, Clone, Copy)]
struct Merge {
    start: usize,
    left: usize,
    mid: usize,
    hi: usize,
}

/// Bottom-up merge sort.
///
/// Runs are merged in place by rotation, so every frame shows a permutation
/// of the input.
pub struct MergeSort {
    values: Vec<i64>,
    width: usize,
    lo: usize,
    merge: Option<Merge>,
}

pub fn merge_sort(values: &[i64]) -> Steps<MergeSort> {
    Steps::new(MergeSort {
        values: values.to_vec(),
        width: 1,
        lo: 0,
        merge: None,
    })
}

impl Advance for MergeSort {
    fn advance(&mut self, out: &mut Outbox) -> bool {
        let n = self.values.len();

        if let Some(mut m) = self.merge {
            if m.left < m.mid && m.mid < m.hi {
                let (a, b) = (self.values[m.left], self.values[m.mid]);
                out.push_back(frame(
                    &self.values,
                    highlights([(m.left, Tag::Compare), (m.mid, Tag::Compare)]),
                    format!("Comparing {a} and {b}."),
                ));
                if b < a {
                    self.values[m.left..=m.mid].rotate_right(1);
                    out.push_back(frame(
                        &self.values,
                        highlights([(m.left, Tag::Swap), (m.left + 1, Tag::Swap)]),
                        format!("Moved {b} in front of {a}."),
                    ));
                    m.mid += 1;
                }
                m.left += 1;
                self.merge = Some(m);
                return true;
            }

            self.merge = None;
            out.push_back(frame(
                &self.values,
                (m.start..m.hi).map(|i| (i, Tag::Sorted)).collect(),
                format!("Merged indices {} to {}.", m.start, m.hi - 1),
            ));
            return true;
        }

        if self.width >= n {
            out.push_back(sorted_frame(&self.values));
            return false;
        }
        if self.lo >= n {
            self.width *= 2;
            self.lo = 0;
            return true;
        }

        let lo = self.lo;
        let mid = (lo + self.width).min(n);
        let hi = (lo + 2 * self.width).min(n);
        if mid < hi {
            self.merge = Some(Merge {
                start: lo,
                left: lo,
                mid,
                hi,
            });
            out.push_back(frame(
                &self.values,
                (lo..hi).map(|i| (i, Tag::Consider)).collect(),
                format!(
                    "Merging runs {lo}..{} and {mid}..{}.",
                    mid - 1,
                    hi - 1
                ),
            ));
        }
        self.lo += 2 * self.width;
        true
    }
}

#[derive(Debug, Clone, Copy)]
struct Partition {
    lo: usize,
    hi: usize,
    store: usize,
    j: usize,
}

/// Quick sort with Lomuto partitioning around the last element of each range.
pub struct QuickSort {
    values: Vec<i64>,
    ranges: Vec<(usize, usize)>,
    active: Option<Partition>,
}

pub fn quick_sort(values: &[i64]) -> Steps<QuickSort> {
    let ranges = if values.len() > 1 {
        vec![(0, values.len() - 1)]
    } else {
        Vec::new()
    };
    Steps::new(QuickSort {
        values: values.to_vec(),
        ranges,
        active: None,
    })
}

impl Advance for QuickSort {
    fn advance(&mut self, out: &mut Outbox) -> bool {
        if let Some(mut p) = self.active {
            let pivot = self.values[p.hi];
            if p.j < p.hi {
                let j = p.j;
                let v = self.values[j];
                out.push_back(frame(
                    &self.values,
                    highlights([(p.store, Tag::Probe), (j, Tag::Compare), (p.hi, Tag::Pivot)]),
                    format!("Comparing {v} with pivot {pivot}."),
                ));
                if v < pivot {
                    if p.store != j {
                        let displaced = self.values[p.store];
                        self.values.swap(p.store, j);
                        out.push_back(frame(
                            &self.values,
                            highlights([(p.store, Tag::Swap), (j, Tag::Swap), (p.hi, Tag::Pivot)]),
                            format!("Swapped {v} and {displaced}."),
                        ));
                    }
                    p.store += 1;
                }
                p.j += 1;
                self.active = Some(p);
                return true;
            }

            if p.store != p.hi {
                self.values.swap(p.store, p.hi);
            }
            out.push_back(frame(
                &self.values,
                highlights([(p.store, Tag::Sorted)]),
                format!("Pivot {pivot} placed at index {}.", p.store),
            ));
            self.active = None;
            // Left range is pushed last so it is partitioned first.
            if p.store + 1 < p.hi {
                self.ranges.push((p.store + 1, p.hi));
            }
            if p.store > p.lo + 1 {
                self.ranges.push((p.lo, p.store - 1));
            }
            return true;
        }

        match self.ranges.pop() {
            Some((lo, hi)) => {
                self.active = Some(Partition {
                    lo,
                    hi,
                    store: lo,
                    j: lo,
                });
                let mut marks: Highlights = (lo..hi).map(|i| (i, Tag::Consider)).collect();
                marks.insert(hi, Tag::Pivot);
                out.push_back(frame(
                    &self.values,
                    marks,
                    format!(
                        "Partitioning indices {lo} to {hi} around pivot {}.",
                        self.values[hi]
                    ),
                ));
                true
            }
            None => {
                out.push_back(sorted_frame(&self.values));
                false
            }
        }
    }
}
