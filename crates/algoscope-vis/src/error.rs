//! Error types for the visualization server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use algoscope_core::Family;

/// Result type for visualization operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving a session.
#[derive(Debug, Error)]
pub enum Error {
    /// Engine error
    #[error(transparent)]
    Core(#[from] algoscope_core::Error),

    /// Request does not apply to the selected family
    #[error("{subject} is not available for {family}")]
    FamilyMismatch { subject: String, family: Family },

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::Core(algoscope_core::Error::UnknownAlgorithm(_)) => StatusCode::NOT_FOUND,
            Error::Core(_) | Error::FamilyMismatch { .. } => StatusCode::BAD_REQUEST,
            Error::Config(_) | Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        let unknown = Error::from(algoscope_core::Error::UnknownAlgorithm("heap".into()));
        assert_eq!(unknown.status(), StatusCode::NOT_FOUND);

        let invalid = Error::from(algoscope_core::Error::InvalidInput("empty".into()));
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let mismatch = Error::FamilyMismatch {
            subject: "Prim's Algorithm".into(),
            family: Family::Sorting,
        };
        assert_eq!(mismatch.status(), StatusCode::BAD_REQUEST);
        assert_eq!(mismatch.to_string(), "Prim's Algorithm is not available for Sorting");
    }
}
