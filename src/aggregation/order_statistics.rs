//! Order-statistic reducers
//!
//! Each one sorts a copy of the input through [`sort_numbers`] and reads a
//! position from it. Min and max hand back the winning element as it was
//! supplied, so an integral minimum stays integral.

use super::operations::{require_values, Aggregator};
use crate::errors::Result;
use crate::number::Number;
use crate::ordering::sort_numbers;

/// Smallest value
#[derive(Debug, Clone, Copy, Default)]
pub struct Min;

impl Aggregator for Min {
    fn name(&self) -> &str {
        "MIN"
    }

    fn description(&self) -> &str {
        "Smallest value in the collection"
    }

    fn compute(&self, values: Option<&[Number]>) -> Result<Number> {
        let values = require_values(self.name(), values)?;
        Ok(sort_numbers(values, true)[0])
    }
}

/// Largest value
#[derive(Debug, Clone, Copy, Default)]
pub struct Max;

impl Aggregator for Max {
    fn name(&self) -> &str {
        "MAX"
    }

    fn description(&self) -> &str {
        "Largest value in the collection"
    }

    fn compute(&self, values: Option<&[Number]>) -> Result<Number> {
        let values = require_values(self.name(), values)?;
        Ok(sort_numbers(values, false)[0])
    }
}

/// Middle value; the mean of the two middle values for an even count
#[derive(Debug, Clone, Copy, Default)]
pub struct Median;

impl Aggregator for Median {
    fn name(&self) -> &str {
        "MEDIAN"
    }

    fn description(&self) -> &str {
        "Middle value of the sorted collection"
    }

    fn compute(&self, values: Option<&[Number]>) -> Result<Number> {
        let values = require_values(self.name(), values)?;
        let sorted = sort_numbers(values, true);
        let mid = sorted.len() / 2;

        if sorted.len() % 2 == 1 {
            return Ok(sorted[mid]);
        }
        Ok(Number::Float(midpoint(sorted[mid - 1], sorted[mid])))
    }
}

#[allow(clippy::cast_precision_loss)]
fn midpoint(a: Number, b: Number) -> f64 {
    match (a, b) {
        // Add in i128 so two large integers cannot overflow
        (Number::Integer(x), Number::Integer(y)) => (i128::from(x) + i128::from(y)) as f64 / 2.0,
        // Halve first so two large finite values cannot overflow
        _ => a.to_f64() / 2.0 + b.to_f64() / 2.0,
    }
}
