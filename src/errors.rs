//! Centralized error handling for RuAggregate
//!
//! Every fallible operation in the crate returns [`Result`], whose error side is
//! the single [`AggregateError`] enum. Errors are propagated to the caller
//! unchanged; nothing in the engine turns an error into a default number.

use thiserror::Error;

/// Main error type for RuAggregate operations
#[derive(Debug, Error)]
pub enum AggregateError {
    /// An aggregator was handed a missing collection, or an empty one it cannot reduce
    #[error("Invalid input for aggregator '{aggregator}': {cause}")]
    InvalidInput { aggregator: String, cause: String },

    /// No aggregator is registered under the requested name
    #[error("Aggregator '{name}' not found (known aggregators: {})", .known.join(", "))]
    NotFound { name: String, known: Vec<String> },

    /// Registry population failed, e.g. two aggregators share a name
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Text that does not describe a number
    #[error("Unable to parse '{input}' as a number")]
    Parse { input: String },

    /// Thread pool configuration error
    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    /// I/O operation errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AggregateError {
    /// Builds an [`AggregateError::InvalidInput`] for the named aggregator
    pub fn invalid_input(aggregator: impl Into<String>, cause: impl Into<String>) -> Self {
        Self::InvalidInput {
            aggregator: aggregator.into(),
            cause: cause.into(),
        }
    }

    /// Name of the aggregator this error concerns, when there is one
    #[must_use]
    pub fn aggregator_name(&self) -> Option<&str> {
        match self {
            Self::InvalidInput { aggregator, .. } => Some(aggregator),
            Self::NotFound { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// Result type alias for RuAggregate operations
pub type Result<T> = std::result::Result<T, AggregateError>;
