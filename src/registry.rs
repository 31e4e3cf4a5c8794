//! Name-based aggregator registry and dispatcher
//!
//! Reporting code refers to aggregations by short names such as `"MIN"`. The
//! registry maps those names to [`Aggregator`] instances. It is populated once
//! through a [`RegistryBuilder`] at startup and is read-only afterwards, so
//! lookups need no locking and the registry can be shared freely across
//! threads by reference.
//!
//! ```rust
//! use ru_aggregate::prelude::*;
//!
//! let registry = AggregatorRegistry::with_builtins().unwrap();
//! let values = [Number::from(5), Number::from(3), Number::from(9)];
//! assert_eq!(registry.aggregate("MIN", Some(&values[..])).unwrap(), Number::from(3));
//! ```

use crate::aggregation::{AggregateOperation, Aggregator};
use crate::errors::{AggregateError, Result};
use crate::number::Number;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Collects aggregators before the registry is frozen
#[derive(Default)]
pub struct RegistryBuilder {
    aggregators: BTreeMap<String, Arc<dyn Aggregator>>,
}

impl RegistryBuilder {
    /// Create an empty builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an aggregator under the name it declares.
    ///
    /// # Errors
    ///
    /// Returns [`AggregateError::Configuration`] if that name is already taken.
    pub fn register(mut self, aggregator: Arc<dyn Aggregator>) -> Result<Self> {
        let name = aggregator.name().to_string();
        if self.aggregators.contains_key(&name) {
            return Err(AggregateError::Configuration(format!(
                "an aggregator named '{name}' is already registered"
            )));
        }
        debug!(aggregator = %name, "registered aggregator");
        self.aggregators.insert(name, aggregator);
        Ok(self)
    }

    /// Registers every built-in operation.
    ///
    /// # Errors
    ///
    /// Returns [`AggregateError::Configuration`] if a built-in name was
    /// already registered.
    pub fn register_builtins(self) -> Result<Self> {
        AggregateOperation::all()
            .iter()
            .try_fold(self, |builder, op| builder.register(op.aggregator()))
    }

    /// Freezes the registry
    #[must_use]
    pub fn build(self) -> AggregatorRegistry {
        info!(count = self.aggregators.len(), "aggregator registry ready");
        AggregatorRegistry {
            aggregators: self.aggregators,
        }
    }
}

/// Immutable name → aggregator mapping
pub struct AggregatorRegistry {
    aggregators: BTreeMap<String, Arc<dyn Aggregator>>,
}

impl AggregatorRegistry {
    /// Start building a registry
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// A registry holding every built-in operation
    ///
    /// # Errors
    ///
    /// Never fails in practice; the built-in names are distinct.
    pub fn with_builtins() -> Result<Self> {
        Ok(RegistryBuilder::new().register_builtins()?.build())
    }

    /// Looks up an aggregator by exact, case-sensitive name.
    ///
    /// # Errors
    ///
    /// Returns [`AggregateError::NotFound`] naming `name` and listing the
    /// registered names. No fallback aggregator is ever substituted.
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn Aggregator>> {
        self.aggregators
            .get(name)
            .cloned()
            .ok_or_else(|| AggregateError::NotFound {
                name: name.to_string(),
                known: self.names(),
            })
    }

    /// Resolves `name` and computes it over `values`.
    ///
    /// # Errors
    ///
    /// Propagates [`AggregateError::NotFound`] from resolution and any error
    /// raised by the aggregator, unchanged.
    pub fn aggregate(&self, name: &str, values: Option<&[Number]>) -> Result<Number> {
        self.resolve(name)?.compute(values)
    }

    /// Runs every registered aggregator over `values`, in name order
    #[must_use]
    pub fn summarize(&self, values: Option<&[Number]>) -> Vec<(String, Result<Number>)> {
        self.aggregators
            .iter()
            .map(|(name, aggregator)| (name.clone(), aggregator.compute(values)))
            .collect()
    }

    /// Registered names, sorted
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.aggregators.keys().cloned().collect()
    }

    /// Registered aggregators, sorted by name
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Aggregator>> {
        self.aggregators.values()
    }

    /// Whether `name` is registered
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.aggregators.contains_key(name)
    }

    /// Number of registered aggregators
    #[must_use]
    pub fn len(&self) -> usize {
        self.aggregators.len()
    }

    /// Whether nothing is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aggregators.is_empty()
    }
}

impl fmt::Debug for AggregatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AggregatorRegistry")
            .field("names", &self.names())
            .finish()
    }
}
