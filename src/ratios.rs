//! Pairwise ratio features.
//!
//! Every unordered pair of measurements `(i, j)` with `i < j` yields one
//! ratio `m[i] / m[j]`, giving C(6, 2) = 15 scale-invariant features:
//!
//! ```text
//!  k : pair    k : pair    k : pair
//!  0 : (0,1)   5 : (1,2)  10 : (2,4)
//!  1 : (0,2)   6 : (1,3)  11 : (2,5)
//!  2 : (0,3)   7 : (1,4)  12 : (3,4)
//!  3 : (0,4)   8 : (1,5)  13 : (3,5)
//!  4 : (0,5)   9 : (2,3)  14 : (4,5)
//! ```
//!
//! Division follows IEEE-754: a zero denominator gives a signed infinity and
//! `0 / 0` gives NaN. Neither is trapped.

use crate::error::Result;
use crate::types::{Dataset, Measurements, RatioVector, MEASUREMENT_COUNT};

/// Number of ratios derived from one measurement vector.
pub const RATIO_COUNT: usize = MEASUREMENT_COUNT * (MEASUREMENT_COUNT - 1) / 2;

/// Measurement index pairs, in the order their ratios appear.
pub const RATIO_PAIRS: [(usize, usize); RATIO_COUNT] = [
    (0, 1),
    (0, 2),
    (0, 3),
    (0, 4),
    (0, 5),
    (1, 2),
    (1, 3),
    (1, 4),
    (1, 5),
    (2, 3),
    (2, 4),
    (2, 5),
    (3, 4),
    (3, 5),
    (4, 5),
];

/// Compute the 15 pairwise ratios of a raw measurement slice.
///
/// Returns [`Error::InvalidInput`](crate::Error::InvalidInput) unless the
/// slice holds exactly six values.
pub fn compute_ratios(measurements: &[f64]) -> Result<RatioVector> {
    Ok(Measurements::from_slice(measurements)?.ratios())
}

impl Measurements {
    /// The 15 pairwise ratios of these measurements.
    pub fn ratios(&self) -> RatioVector {
        let m = self.as_slice();
        RATIO_PAIRS
            .iter()
            .map(|&(i, j)| m[i] / m[j])
            .collect::<Vec<_>>()
            .into()
    }
}

/// Convert every entry of a raw dataset into its ratio vector.
///
/// Labels and their order are preserved; the input is left untouched.
pub fn convert_dataset(raw: &Dataset<Measurements>) -> Dataset<RatioVector> {
    raw.map_values(Measurements::ratios)
}
