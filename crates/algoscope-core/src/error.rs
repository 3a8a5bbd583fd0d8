//! Error types for algoscope-core.

use thiserror::Error;

use crate::catalog::Algorithm;

/// Result type for algoscope-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while preparing or generating step sequences.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The identifier does not name any known algorithm.
    #[error("{0} is not implemented yet")]
    UnknownAlgorithm(String),

    /// The dataset shape does not belong to the algorithm's family.
    #[error("{algorithm} cannot run on {found} data")]
    DatasetMismatch {
        algorithm: Algorithm,
        found: &'static str,
    },

    /// The dataset has the right shape but violates a structural precondition.
    #[error("invalid dataset: {0}")]
    InvalidDataset(String),

    /// Custom user input was rejected before reaching the engine.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A generator failed while materialising its steps.
    #[error("generation fault: {0}")]
    GenerationFault(String),
}
