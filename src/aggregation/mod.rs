//! Aggregators: named reducers from a value collection to one number
//!
//! # Organization
//!
//! This module is organized into submodules:
//! - [`operations`]: The [`Aggregator`] trait and the built-in operation catalogue
//! - [`order_statistics`]: Reducers that read a sorted position (min, max, median)
//! - [`accumulate`]: Reducers that fold over every element (sum, average, count)
//! - [`dispersion`]: Spread around the mean (variance, standard deviation)

pub mod accumulate;
pub mod dispersion;
pub mod operations;
pub mod order_statistics;

// Re-export the main types for convenience
pub use accumulate::{Average, Count, Sum};
pub use dispersion::{StdDev, Variance};
pub use operations::{require_values, AggregateOperation, Aggregator};
pub use order_statistics::{Max, Median, Min};
