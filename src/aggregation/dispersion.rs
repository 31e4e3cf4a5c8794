//! Spread around the mean, population form (divides by n)

use super::accumulate::Total;
use super::operations::{require_values, Aggregator};
use crate::errors::Result;
use crate::number::Number;

#[allow(clippy::cast_precision_loss)]
fn population_variance(values: &[Number]) -> f64 {
    let n = values.len() as f64;
    let mean = Total::of(values).to_f64() / n;
    values
        .iter()
        .map(|value| (value.to_f64() - mean).powi(2))
        .sum::<f64>()
        / n
}

/// Population variance
#[derive(Debug, Clone, Copy, Default)]
pub struct Variance;

impl Aggregator for Variance {
    fn name(&self) -> &str {
        "VARIANCE"
    }

    fn description(&self) -> &str {
        "Population variance of the values"
    }

    fn compute(&self, values: Option<&[Number]>) -> Result<Number> {
        let values = require_values(self.name(), values)?;
        Ok(Number::Float(population_variance(values)))
    }
}

/// Population standard deviation
#[derive(Debug, Clone, Copy, Default)]
pub struct StdDev;

impl Aggregator for StdDev {
    fn name(&self) -> &str {
        "STDDEV"
    }

    fn description(&self) -> &str {
        "Population standard deviation of the values"
    }

    fn compute(&self, values: Option<&[Number]>) -> Result<Number> {
        let values = require_values(self.name(), values)?;
        Ok(Number::Float(population_variance(values).sqrt()))
    }
}
