//! Algoscope Core
//!
//! Step-generation engine for classic algorithm visualizations.
//!
//! # Architecture
//!
//! - **Dataset**: Seeded random inputs for each problem family
//! - **Algorithms**: Resumable state machines that emit one frame per observable transition
//! - **Dispatcher**: Routes an algorithm and a dataset to a step sequence, containing failures
//! - **Step**: Serializable snapshots consumed by a player
//!
//! # Usage
//!
//! ```ignore
//! let mut dispatcher = Dispatcher::seeded(42);
//! let data = Dataset::generate(Family::Sorting, dispatcher.rng_mut());
//! let steps = dispatcher.generate(Algorithm::BubbleSort, &data);
//! ```

pub mod algorithms;
pub mod catalog;
pub mod dataset;
pub mod dispatch;
pub mod error;
pub mod graph;
pub mod input;
pub mod reference;
pub mod step;

pub use catalog::{Algorithm, Family};
pub use dataset::{Dataset, GreedyProblems, KnapsackProblem, TextProblem};
pub use dispatch::{Dispatcher, StepStream, GENERATION_ERROR_MESSAGE};
pub use error::{Error, Result};
pub use graph::{Distance, Edge, EdgeKey, Graph, Node, NodeId};
pub use reference::{reference_listing, ReferenceListing};
pub use step::{
    Activity, ActivitySnapshot, ArraySnapshot, GraphSnapshot, Highlights, Item, KnapsackSnapshot,
    Load, Step, Tag, TextMatchSnapshot,
};
