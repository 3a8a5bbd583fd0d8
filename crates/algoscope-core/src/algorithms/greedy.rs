//! Greedy choice algorithms: activity selection and the fractional knapsack.

use std::collections::BTreeSet;

use super::{Advance, Outbox, Steps};
use crate::step::{highlights, Activity, ActivitySnapshot, Highlights, Item, KnapsackSnapshot, Load, Step, Tag};

/// Pick a maximum set of mutually compatible activities by earliest finish.
pub struct ActivitySelection {
    activities: Vec<Activity>,
    selected: BTreeSet<usize>,
    last: usize,
    next: Option<usize>,
}

pub fn activity_selection(activities: &[Activity]) -> Steps<ActivitySelection> {
    let mut activities = activities.to_vec();
    // Stable, so already ordered input is unchanged.
    activities.sort_by(|a, b| a.finish.total_cmp(&b.finish));
    Steps::new(ActivitySelection {
        activities,
        selected: BTreeSet::new(),
        last: 0,
        next: None,
    })
}

impl ActivitySelection {
    fn frame(&self, highlights: Highlights, message: String) -> Step {
        Step::Activity(ActivitySnapshot {
            activities: self.activities.clone(),
            highlights,
            selected: self.selected.clone(),
            message,
        })
    }

    fn finish(&self, out: &mut Outbox) {
        let marks = self.selected.iter().map(|&i| (i, Tag::Select)).collect();
        out.push_back(self.frame(
            marks,
            format!(
                "Finished selecting activities: {} chosen.",
                self.selected.len()
            ),
        ));
    }
}

impl Advance for ActivitySelection {
    fn advance(&mut self, out: &mut Outbox) -> bool {
        let i = match self.next {
            Some(i) => i,
            None => {
                if self.activities.is_empty() {
                    self.finish(out);
                    return false;
                }
                out.push_back(self.frame(
                    Highlights::new(),
                    "Starting with activities sorted by finish time.".to_string(),
                ));
                self.selected.insert(0);
                out.push_back(self.frame(
                    highlights([(0, Tag::Select)]),
                    format!(
                        "Selected {}, the activity that finishes first.",
                        self.activities[0].name
                    ),
                ));
                self.last = 0;
                self.next = Some(1);
                return true;
            }
        };

        if i >= self.activities.len() {
            self.finish(out);
            return false;
        }

        let last = &self.activities[self.last];
        let current = &self.activities[i];
        out.push_back(self.frame(
            highlights([(self.last, Tag::Select), (i, Tag::Consider)]),
            format!(
                "Considering {} ({} to {}).",
                current.name, current.start, current.finish
            ),
        ));

        if current.start >= last.finish {
            let name = current.name.clone();
            self.selected.insert(i);
            self.last = i;
            out.push_back(self.frame(
                highlights([(i, Tag::Select)]),
                format!("{name} starts after the last selected activity finishes. Selected."),
            ));
        } else {
            let (name, other) = (current.name.clone(), last.name.clone());
            out.push_back(self.frame(
                highlights([(i, Tag::Reject)]),
                format!("{name} conflicts with {other}. Rejected."),
            ));
        }
        self.next = Some(i + 1);
        true
    }
}

/// Fill the knapsack by descending value density, splitting the last item if needed.
pub struct FractionalKnapsack {
    items: Vec<Item>,
    capacity: f64,
    load: Load,
    taken: Highlights,
    next: Option<usize>,
}

pub fn fractional_knapsack(items: &[Item], capacity: f64) -> Steps<FractionalKnapsack> {
    let mut items = items.to_vec();
    items.sort_by(|a, b| b.ratio().total_cmp(&a.ratio()));
    Steps::new(FractionalKnapsack {
        items,
        capacity,
        load: Load::default(),
        taken: Highlights::new(),
        next: None,
    })
}

impl FractionalKnapsack {
    fn frame(&self, highlights: Highlights, message: String) -> Step {
        Step::Knapsack(KnapsackSnapshot {
            items: self.items.clone(),
            highlights,
            accumulated: self.load,
            capacity: self.capacity,
            message,
        })
    }

    fn remaining(&self) -> f64 {
        self.capacity - self.load.weight
    }

    fn finish(&self, out: &mut Outbox) {
        let message = if self.remaining() <= 0.0 {
            "Knapsack is full."
        } else {
            "All items fit in the knapsack."
        };
        out.push_back(self.frame(self.taken.clone(), message.to_string()));
    }
}

impl Advance for FractionalKnapsack {
    fn advance(&mut self, out: &mut Outbox) -> bool {
        let i = match self.next {
            Some(i) => i,
            None => {
                out.push_back(self.frame(
                    Highlights::new(),
                    "Items sorted by value/weight ratio.".to_string(),
                ));
                self.next = Some(0);
                return true;
            }
        };

        if i >= self.items.len() || self.remaining() <= 0.0 {
            self.finish(out);
            return false;
        }

        let item = self.items[i];
        let label = i + 1;
        let mut marks = self.taken.clone();
        marks.insert(i, Tag::Consider);
        out.push_back(self.frame(
            marks,
            format!(
                "Considering Item {label} (weight {}, value {}, ratio {:.2}).",
                item.weight(),
                item.value(),
                item.ratio()
            ),
        ));

        let remaining = self.remaining();
        if item.weight() <= remaining {
            self.load.weight += item.weight();
            self.load.value += item.value();
            self.taken.insert(i, Tag::Select);
            out.push_back(self.frame(self.taken.clone(), format!("Took entire Item {label}.")));
            self.next = Some(i + 1);
        } else {
            let fraction = remaining / item.weight();
            self.load.weight = self.capacity;
            self.load.value += item.value() * fraction;
            self.taken.insert(i, Tag::Select);
            out.push_back(self.frame(
                self.taken.clone(),
                format!("Took {:.0}% of Item {label}.", fraction * 100.0),
            ));
            // Capacity is exhausted; the next call reports the final load.
            self.next = Some(self.items.len());
        }
        true
    }
}
