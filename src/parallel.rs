//! Parallel processing configuration and batch evaluation
//!
//! This module provides abstractions for configuring Rayon's thread pools and
//! for evaluating one named aggregation over many groups of values at once,
//! e.g. one group per report row.

use crate::errors::{AggregateError, Result};
use crate::number::Number;
use crate::registry::AggregatorRegistry;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info};

/// Configuration for parallel processing
#[derive(Debug, Clone, Default)]
pub struct ParallelConfig {
    pub num_threads: Option<usize>,
}

impl ParallelConfig {
    /// Create a new parallel configuration
    #[must_use]
    pub const fn new(num_threads: Option<usize>) -> Self {
        Self { num_threads }
    }

    /// Create a configuration that uses the default thread pool
    #[must_use]
    pub const fn new_default() -> Self {
        Self { num_threads: None }
    }

    /// Create a configuration that uses all available CPU cores
    #[must_use]
    pub fn all_cores() -> Self {
        Self {
            num_threads: Some(num_cpus::get()),
        }
    }

    /// Create a configuration that uses a specific number of threads
    #[must_use]
    pub const fn with_threads(num_threads: usize) -> Self {
        Self {
            num_threads: Some(num_threads),
        }
    }

    /// Get the current number of threads being used
    #[must_use]
    pub fn current_threads(&self) -> usize {
        rayon::current_num_threads()
    }

    fn builder(&self) -> Result<ThreadPoolBuilder> {
        match self.num_threads {
            Some(0) => Err(AggregateError::ThreadPool(
                "thread count must be at least 1".to_string(),
            )),
            Some(num_threads) => Ok(ThreadPoolBuilder::new().num_threads(num_threads)),
            None => Ok(ThreadPoolBuilder::new()),
        }
    }

    /// Build a dedicated thread pool with this configuration
    ///
    /// # Errors
    ///
    /// Returns [`AggregateError::ThreadPool`] for a zero thread count or if
    /// Rayon fails to spawn the pool.
    pub fn build_pool(&self) -> Result<ThreadPool> {
        self.builder()?.build().map_err(|e| {
            AggregateError::ThreadPool(format!("Failed to build thread pool: {e}"))
        })
    }

    /// Set up the global Rayon thread pool with the specified configuration
    ///
    /// # Errors
    ///
    /// Returns [`AggregateError::ThreadPool`] for a zero thread count or if
    /// the global pool was already initialized.
    pub fn setup_global_pool(&self) -> Result<()> {
        let Some(num_threads) = self.num_threads else {
            info!("Using default thread pool configuration");
            return Ok(());
        };

        self.builder()?.build_global().map_err(|e| {
            AggregateError::ThreadPool(format!(
                "Failed to initialize thread pool with {num_threads} threads: {e}"
            ))
        })?;

        info!(threads = num_threads, "Configured parallel processing");
        Ok(())
    }
}

/// Evaluates aggregation `name` over each group in parallel.
///
/// The name is resolved once up front. Results come back in group order, one
/// per group; a group that fails (e.g. an empty group under `"MIN"`) yields its
/// own error without affecting the others.
///
/// # Errors
///
/// Returns [`AggregateError::NotFound`] if `name` is not registered.
pub fn aggregate_groups(
    registry: &AggregatorRegistry,
    name: &str,
    groups: &[Vec<Number>],
) -> Result<Vec<Result<Number>>> {
    let aggregator = registry.resolve(name)?;
    debug!(aggregator = name, groups = groups.len(), "aggregating groups");

    Ok(groups
        .par_iter()
        .map(|group| aggregator.compute(Some(group.as_slice())))
        .collect())
}

/// Get information about the current parallel configuration
#[must_use]
pub fn get_parallel_info() -> ParallelInfo {
    ParallelInfo {
        current_threads: rayon::current_num_threads(),
        available_cores: num_cpus::get(),
        available_parallelism: std::thread::available_parallelism()
            .map(std::num::NonZeroUsize::get)
            .unwrap_or(1),
    }
}

/// Information about the parallel processing environment
#[derive(Debug, Clone)]
pub struct ParallelInfo {
    pub current_threads: usize,
    pub available_cores: usize,
    pub available_parallelism: usize,
}

impl ParallelInfo {
    /// Log parallel processing information
    pub fn log_info(&self) {
        info!(
            current_threads = self.current_threads,
            available_cores = self.available_cores,
            available_parallelism = self.available_parallelism,
            "Parallel processing information"
        );
    }
}
