//! Numeric ordering of value collections
//!
//! Order-statistic aggregators (min, max, median) work on a sorted copy of
//! their input. Sorting compares numeric value via [`numeric_cmp`], never
//! representation, so mixed integer/float collections order correctly.

use crate::number::{numeric_cmp, Number};
use rayon::prelude::*;

/// Collections at least this long are sorted on the Rayon pool
pub const PARALLEL_SORT_THRESHOLD: usize = 16_384;

/// Returns a sorted copy of `values`.
///
/// Ascending order is stable: equal values keep their input order. Descending
/// order is exactly the reverse of the ascending result. The input is left
/// untouched and an empty input yields an empty vector.
#[must_use]
pub fn sort_numbers(values: &[Number], ascending: bool) -> Vec<Number> {
    let mut sorted = values.to_vec();

    if sorted.len() >= PARALLEL_SORT_THRESHOLD {
        sorted.par_sort_by(numeric_cmp);
    } else {
        sorted.sort_by(numeric_cmp);
    }

    if !ascending {
        sorted.reverse();
    }
    sorted
}
