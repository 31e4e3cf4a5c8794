//! RuAggregate: named, pluggable aggregation for reporting pipelines
//!
//! RuAggregate reduces a collection of numeric measurements to one summary
//! value (minimum, maximum, sum, average, count, median, ...) chosen by a short
//! name such as `"MIN"`. Report authors configure the name; the engine resolves
//! it at evaluation time.
//!
//! ## Key Features
//!
//! - **Dispatch by Name**: An explicitly built, read-only registry of aggregators
//! - **Numeric Comparison**: Mixed integer and floating-point inputs compare by value
//! - **No Silent Defaults**: Missing or empty collections are errors, never zero
//! - **Parallel Processing**: Evaluate one aggregation over many groups using Rayon
//!
//! ## Module Organization
//!
//! - [`number`]: The [`Number`] value type and boundary conversions
//! - [`ordering`]: Numeric sorting of value collections
//! - [`aggregation`]: The [`Aggregator`] trait and built-in reducers
//! - [`registry`]: Name-based lookup and dispatch
//! - [`parallel`]: Thread pool configuration and batch evaluation
//! - [`errors`]: Centralized error handling
//!
//! ## Usage Examples
//!
//! ```rust
//! use ru_aggregate::prelude::*;
//!
//! let registry = AggregatorRegistry::with_builtins().unwrap();
//! let values = [Number::from(1), Number::from(2), Number::from(3), Number::from(4)];
//!
//! let median = registry.aggregate("MEDIAN", Some(&values[..])).unwrap();
//! assert_eq!(median, Number::Float(2.5));
//!
//! assert!(registry.aggregate("BOGUS", Some(&values[..])).is_err());
//! ```

pub mod aggregation;
pub mod errors;
pub mod number;
pub mod ordering;
pub mod parallel;
pub mod registry;

// Direct re-exports for the public API
pub use aggregation::{AggregateOperation, Aggregator};
pub use errors::{AggregateError, Result};
pub use number::{numbers_from_array, numeric_cmp, parse_values, read_values, Number};
pub use ordering::sort_numbers;
pub use parallel::{aggregate_groups, get_parallel_info, ParallelConfig, ParallelInfo};
pub use registry::{AggregatorRegistry, RegistryBuilder};

// High-level convenience API
pub mod prelude {
    //! Commonly used imports for convenience
    pub use crate::aggregation::{AggregateOperation, Aggregator};
    pub use crate::errors::{AggregateError, Result};
    pub use crate::number::Number;
    pub use crate::parallel::ParallelConfig;
    pub use crate::registry::{AggregatorRegistry, RegistryBuilder};
}
