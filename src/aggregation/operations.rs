//! Core aggregation trait and the built-in operation catalogue
//!
//! This module defines the fundamental types shared by every reducer.

use super::{Average, Count, Max, Median, Min, StdDev, Sum, Variance};
use crate::errors::{AggregateError, Result};
use crate::number::Number;
use std::sync::Arc;

/// A named, stateless reducer from a collection of numbers to one number.
///
/// Implementations hold no mutable state, so one instance can serve any number
/// of concurrent callers. `compute` must depend on its input only and must not
/// keep hold of the slice after returning.
pub trait Aggregator: Send + Sync {
    /// Registry name, fixed for the lifetime of the system (uppercase by convention)
    fn name(&self) -> &str;

    /// One-line human readable description
    fn description(&self) -> &str;

    /// Reduces `values` to a single number.
    ///
    /// `None` stands for a missing collection handed over by the upstream
    /// pipeline, as opposed to `Some(&[])`, a present but empty one.
    ///
    /// # Errors
    ///
    /// Returns [`AggregateError::InvalidInput`] if the collection is missing,
    /// or empty for a reducer that needs at least one element.
    fn compute(&self, values: Option<&[Number]>) -> Result<Number>;
}

/// Enforces the shared precondition: the collection is present and non-empty.
///
/// # Errors
///
/// Returns [`AggregateError::InvalidInput`] naming `aggregator` otherwise.
pub fn require_values<'a>(aggregator: &str, values: Option<&'a [Number]>) -> Result<&'a [Number]> {
    match values {
        None => Err(AggregateError::invalid_input(
            aggregator,
            "cannot aggregate a null or empty collection (collection is missing)",
        )),
        Some([]) => Err(AggregateError::invalid_input(
            aggregator,
            "cannot aggregate a null or empty collection (collection is empty)",
        )),
        Some(values) => Ok(values),
    }
}

/// Built-in aggregation operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateOperation {
    /// Smallest value
    Min,
    /// Largest value
    Max,
    /// Sum of values
    Sum,
    /// Arithmetic mean
    Average,
    /// Number of values
    Count,
    /// Middle value of the sorted collection
    Median,
    /// Population standard deviation
    StdDev,
    /// Population variance
    Variance,
}

impl AggregateOperation {
    /// Get the registry name of the operation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Min => "MIN",
            Self::Max => "MAX",
            Self::Sum => "SUM",
            Self::Average => "AVG",
            Self::Count => "COUNT",
            Self::Median => "MEDIAN",
            Self::StdDev => "STDDEV",
            Self::Variance => "VARIANCE",
        }
    }

    /// Looks up a built-in operation by its exact registry name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|op| op.as_str() == name)
    }

    /// Every built-in operation
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Min,
            Self::Max,
            Self::Sum,
            Self::Average,
            Self::Count,
            Self::Median,
            Self::StdDev,
            Self::Variance,
        ]
    }

    /// Creates the aggregator implementing this operation
    #[must_use]
    pub fn aggregator(self) -> Arc<dyn Aggregator> {
        match self {
            Self::Min => Arc::new(Min),
            Self::Max => Arc::new(Max),
            Self::Sum => Arc::new(Sum),
            Self::Average => Arc::new(Average),
            Self::Count => Arc::new(Count),
            Self::Median => Arc::new(Median),
            Self::StdDev => Arc::new(StdDev),
            Self::Variance => Arc::new(Variance),
        }
    }
}
