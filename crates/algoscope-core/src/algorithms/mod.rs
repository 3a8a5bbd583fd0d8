//! Algorithm step-generators.
//!
//! Each algorithm is an explicit state machine implementing [`Advance`]: one
//! call performs one unit of work (a comparison, a swap, a relaxation) and
//! pushes the frames that unit produced. [`Steps`] wraps a machine as a pull
//! based [`Iterator`], so frames can be consumed one at a time or collected.
//!
//! Every machine works on its own copy of the input and its last frame names
//! the terminal outcome.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use crate::step::Step;

mod graph;
mod greedy;
mod searching;
mod sorting;
mod strings;

pub use graph::{dijkstra, prim, Dijkstra, Prim};
pub use greedy::{activity_selection, fractional_knapsack, ActivitySelection, FractionalKnapsack};
pub use searching::{binary_search, linear_search, BinarySearch, LinearSearch};
pub use sorting::{
    bubble_sort, insertion_sort, merge_sort, quick_sort, selection_sort, BubbleSort,
    InsertionSort, MergeSort, QuickSort, SelectionSort,
};
pub use strings::{kmp_search, naive_search, KmpSearch, NaiveSearch};

/// Frames produced by one unit of work, in order.
pub type Outbox = VecDeque<Step>;

/// A resumable algorithm.
pub trait Advance {
    /// Perform the next unit of work and push its frames onto `out`.
    ///
    /// Returns `false` once the algorithm has finished. The finishing call may
    /// still push frames (the terminal one in particular).
    fn advance(&mut self, out: &mut Outbox) -> bool;
}

/// Forward-only, non-restartable step sequence driven by an [`Advance`] machine.
pub struct Steps<A> {
    machine: A,
    pending: Outbox,
    finished: bool,
}

impl<A: Advance> Steps<A> {
    pub fn new(machine: A) -> Self {
        Self {
            machine,
            pending: VecDeque::new(),
            finished: false,
        }
    }

    /// Whether another frame is available. May run the machine forward to find out.
    pub fn has_next(&mut self) -> bool {
        self.fill();
        !self.pending.is_empty()
    }

    fn fill(&mut self) {
        while self.pending.is_empty() && !self.finished {
            self.finished = !self.machine.advance(&mut self.pending);
        }
    }
}

impl<A: Advance> Iterator for Steps<A> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        self.fill();
        self.pending.pop_front()
    }
}

impl<A: Advance> FusedIterator for Steps<A> {}

/// Index of the first minimal element, or `None` when empty.
///
/// Equivalent to a stable ascending sort followed by taking the head, which
/// keeps queue order reproducible on ties.
pub(crate) fn first_min_by<T>(items: &[T], key: impl Fn(&T) -> f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, item) in items.iter().enumerate() {
        let k = key(item);
        match best {
            Some((_, best_key)) if k >= best_key => {}
            _ => best = Some((i, k)),
        }
    }
    best.map(|(i, _)| i)
}
