//! Routing from an algorithm id and a dataset to a step sequence.

use std::panic::{self, AssertUnwindSafe};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, error};

use crate::algorithms::{
    activity_selection, binary_search, bubble_sort, dijkstra, fractional_knapsack,
    insertion_sort, kmp_search, linear_search, merge_sort, naive_search, prim, quick_sort,
    selection_sort,
};
use crate::catalog::Algorithm;
use crate::dataset::{Dataset, KnapsackProblem, TextProblem};
use crate::error::{Error, Result};
use crate::graph::NodeId;
use crate::step::Step;

/// Boxed lazy step sequence.
pub type StepStream = Box<dyn Iterator<Item = Step> + Send>;

/// Message shown in place of an animation when generation fails.
pub const GENERATION_ERROR_MESSAGE: &str = "Error generating steps. Check algorithm implementation.";

/// Routes algorithms to their step-generators.
///
/// Owns the random source for the choices a run makes beyond its dataset: the
/// search target and the Dijkstra destination.
#[derive(Debug, Clone)]
pub struct Dispatcher<R: Rng = ChaCha8Rng> {
    rng: R,
}

impl Dispatcher<ChaCha8Rng> {
    /// Reproducible dispatcher.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::with_rng(ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> Dispatcher<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// The random source, shared with dataset generation.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Build the lazy step sequence for `algorithm` over `dataset`.
    pub fn dispatch(&mut self, algorithm: Algorithm, dataset: &Dataset) -> Result<StepStream> {
        if !dataset.fits(algorithm.family()) {
            return Err(Error::DatasetMismatch {
                algorithm,
                found: dataset.shape(),
            });
        }

        let stream: StepStream = match (algorithm, dataset) {
            (Algorithm::BubbleSort, Dataset::Array(values)) => Box::new(bubble_sort(values)),
            (Algorithm::InsertionSort, Dataset::Array(values)) => Box::new(insertion_sort(values)),
            (Algorithm::SelectionSort, Dataset::Array(values)) => Box::new(selection_sort(values)),
            (Algorithm::MergeSort, Dataset::Array(values)) => Box::new(merge_sort(values)),
            (Algorithm::QuickSort, Dataset::Array(values)) => Box::new(quick_sort(values)),
            (Algorithm::LinearSearch, Dataset::Array(values)) => {
                let target = self.pick_target(values)?;
                Box::new(linear_search(values, target))
            }
            (Algorithm::BinarySearch, Dataset::Array(values)) => {
                let target = self.pick_target(values)?;
                Box::new(binary_search(values, target))
            }
            (Algorithm::NaiveSearch, Dataset::Text(problem)) => {
                validate_text(problem)?;
                Box::new(naive_search(&problem.text, &problem.pattern))
            }
            (Algorithm::Kmp, Dataset::Text(problem)) => {
                validate_text(problem)?;
                Box::new(kmp_search(&problem.text, &problem.pattern))
            }
            (Algorithm::ActivitySelection, Dataset::Greedy(problems)) => {
                if problems.activities.is_empty() {
                    return Err(Error::InvalidDataset("no activities to schedule".into()));
                }
                Box::new(activity_selection(&problems.activities))
            }
            (Algorithm::FractionalKnapsack, Dataset::Greedy(problems)) => {
                validate_knapsack(&problems.knapsack)?;
                let KnapsackProblem { items, capacity } = &problems.knapsack;
                Box::new(fractional_knapsack(items, *capacity))
            }
            (Algorithm::Dijkstra, Dataset::Graph(graph)) => {
                graph.validate()?;
                let destination = NodeId(self.rng.gen_range(0..graph.node_count()));
                Box::new(dijkstra(graph, destination))
            }
            (Algorithm::Prim, Dataset::Graph(graph)) => {
                graph.validate()?;
                Box::new(prim(graph))
            }
            _ => {
                return Err(Error::DatasetMismatch {
                    algorithm,
                    found: dataset.shape(),
                })
            }
        };
        Ok(stream)
    }

    /// Like [`dispatch`](Self::dispatch), resolving the algorithm from its id or name.
    pub fn dispatch_named(&mut self, id: &str, dataset: &Dataset) -> Result<StepStream> {
        let algorithm: Algorithm = id.parse()?;
        self.dispatch(algorithm, dataset)
    }

    /// Materialise the full step sequence. Never fails.
    ///
    /// Errors and panics inside a generator are logged and replaced by a single
    /// notice frame.
    pub fn generate(&mut self, algorithm: Algorithm, dataset: &Dataset) -> Vec<Step> {
        let result = self.dispatch(algorithm, dataset);
        contain(algorithm.id(), result)
    }

    /// Like [`generate`](Self::generate), resolving the algorithm from its id or name.
    pub fn generate_named(&mut self, id: &str, dataset: &Dataset) -> Vec<Step> {
        let result = self.dispatch_named(id, dataset);
        contain(id, result)
    }

    fn pick_target(&mut self, values: &[i64]) -> Result<i64> {
        if values.is_empty() {
            return Err(Error::InvalidDataset("cannot search an empty array".into()));
        }
        Ok(values[self.rng.gen_range(0..values.len())])
    }
}

fn contain(id: &str, result: Result<StepStream>) -> Vec<Step> {
    let outcome = result.and_then(|stream| {
        panic::catch_unwind(AssertUnwindSafe(|| stream.collect::<Vec<_>>()))
            .map_err(|payload| Error::GenerationFault(panic_message(payload.as_ref())))
    });

    match outcome {
        Ok(steps) => {
            debug!(algorithm = id, steps = steps.len(), "generated steps");
            steps
        }
        Err(Error::UnknownAlgorithm(name)) => {
            vec![Step::notice(format!("{name} is not implemented yet."))]
        }
        Err(err) => {
            error!(algorithm = id, error = %err, "step generation failed");
            vec![Step::notice(GENERATION_ERROR_MESSAGE)]
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "generator panicked".to_string()
    }
}

fn validate_text(problem: &TextProblem) -> Result<()> {
    if problem.text.is_empty() {
        return Err(Error::InvalidDataset("text is empty".into()));
    }
    if problem.pattern.is_empty() {
        return Err(Error::InvalidDataset("pattern is empty".into()));
    }
    if problem.pattern.chars().count() > problem.text.chars().count() {
        return Err(Error::InvalidDataset("pattern is longer than the text".into()));
    }
    Ok(())
}

fn validate_knapsack(problem: &KnapsackProblem) -> Result<()> {
    if !problem.capacity.is_finite() || problem.capacity <= 0.0 {
        return Err(Error::InvalidDataset(format!(
            "knapsack capacity {} is not positive",
            problem.capacity
        )));
    }
    for (i, item) in problem.items.iter().enumerate() {
        if !item.weight().is_finite() || item.weight() <= 0.0 {
            return Err(Error::InvalidDataset(format!(
                "item {} has weight {}",
                i + 1,
                item.weight()
            )));
        }
    }
    Ok(())
}
