//! Reducers that fold over every element
//!
//! Integers and floats are accumulated separately: integers exactly in `i128`,
//! floats with Neumaier compensated summation. A sum of integers therefore
//! stays exact and integral unless it no longer fits an `i64`.

use super::operations::{require_values, Aggregator};
use crate::errors::{AggregateError, Result};
use crate::number::Number;

/// Running total split by representation
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Total {
    integers: i128,
    floats: f64,
    compensation: f64,
    saw_float: bool,
}

impl Total {
    pub(crate) fn of(values: &[Number]) -> Self {
        values.iter().fold(Self::default(), |mut total, &value| {
            total.add(value);
            total
        })
    }

    fn add(&mut self, value: Number) {
        match value {
            Number::Integer(i) => self.integers += i128::from(i),
            Number::Float(x) => {
                self.saw_float = true;
                let t = self.floats + x;
                // Once the total leaves the finite range the correction term is inf - inf
                if !t.is_finite() {
                    self.floats = t;
                    return;
                }
                if self.floats.abs() >= x.abs() {
                    self.compensation += (self.floats - t) + x;
                } else {
                    self.compensation += (x - t) + self.floats;
                }
                self.floats = t;
            }
        }
    }

    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn to_f64(self) -> f64 {
        if !self.floats.is_finite() {
            return self.floats;
        }
        self.integers as f64 + (self.floats + self.compensation)
    }

    /// Integral when every input was an integer and the total fits `i64`
    pub(crate) fn to_number(self) -> Number {
        if !self.saw_float {
            if let Ok(total) = i64::try_from(self.integers) {
                return Number::Integer(total);
            }
        }
        Number::Float(self.to_f64())
    }
}

/// Sum of values
#[derive(Debug, Clone, Copy, Default)]
pub struct Sum;

impl Aggregator for Sum {
    fn name(&self) -> &str {
        "SUM"
    }

    fn description(&self) -> &str {
        "Sum of all values"
    }

    fn compute(&self, values: Option<&[Number]>) -> Result<Number> {
        let values = require_values(self.name(), values)?;
        Ok(Total::of(values).to_number())
    }
}

/// Arithmetic mean, always a float
#[derive(Debug, Clone, Copy, Default)]
pub struct Average;

impl Aggregator for Average {
    fn name(&self) -> &str {
        "AVG"
    }

    fn description(&self) -> &str {
        "Arithmetic mean of all values"
    }

    #[allow(clippy::cast_precision_loss)]
    fn compute(&self, values: Option<&[Number]>) -> Result<Number> {
        let values = require_values(self.name(), values)?;
        Ok(Number::Float(Total::of(values).to_f64() / values.len() as f64))
    }
}

/// Number of values. The only reducer that accepts an empty collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct Count;

impl Aggregator for Count {
    fn name(&self) -> &str {
        "COUNT"
    }

    fn description(&self) -> &str {
        "Number of values, zero for an empty collection"
    }

    fn compute(&self, values: Option<&[Number]>) -> Result<Number> {
        let values = values.ok_or_else(|| {
            AggregateError::invalid_input(
                self.name(),
                "cannot aggregate a null or empty collection (collection is missing)",
            )
        })?;
        Ok(Number::from(values.len()))
    }
}
