use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of raw distances measured per face.
pub const MEASUREMENT_COUNT: usize = 6;

/// One of the six linear distances between facial landmarks.
///
/// The declaration order is the order values appear in a [`Measurements`]
/// vector and on a dataset line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Distance {
    /// Top of head to bottom of chin.
    HeadToChin,
    /// Left ear to right ear.
    EarToEar,
    /// Midpoint between the eyes to top of head.
    EyesToHeadTop,
    /// Center of left eye to center of right eye.
    EyeToEye,
    /// Nose length, top to bottom.
    NoseLength,
    /// Bottom of chin to middle of mouth.
    ChinToMouth,
}

impl Distance {
    pub const ALL: [Distance; MEASUREMENT_COUNT] = [
        Distance::HeadToChin,
        Distance::EarToEar,
        Distance::EyesToHeadTop,
        Distance::EyeToEye,
        Distance::NoseLength,
        Distance::ChinToMouth,
    ];

    /// Position of this distance inside a measurement vector.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Prompt shown when asking a user for this distance.
    pub const fn prompt(self) -> &'static str {
        match self {
            Distance::HeadToChin => "Enter the distance from top of head to bottom of chin: ",
            Distance::EarToEar => "Enter the distance from left ear to right ear: ",
            Distance::EyesToHeadTop => {
                "Enter the distance from center point between the eyes and top of head: "
            }
            Distance::EyeToEye => {
                "Enter the distance from center of left eye to center of right eye: "
            }
            Distance::NoseLength => "Enter the length of nose from top to bottom: ",
            Distance::ChinToMouth => "Enter the distance from bottom of chin to middle of mouth: ",
        }
    }
}

/// The six raw distances measured on one face, in [`Distance::ALL`] order.
///
/// Values are expected to be positive but this is not enforced; zero or
/// negative entries simply produce non-finite or negative ratios.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    values: [f64; MEASUREMENT_COUNT],
}

impl Measurements {
    pub const fn new(values: [f64; MEASUREMENT_COUNT]) -> Self {
        Self { values }
    }

    /// Build from a slice, which must hold exactly six values.
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        let values: [f64; MEASUREMENT_COUNT] =
            values.try_into().map_err(|_| Error::InvalidInput {
                expected: MEASUREMENT_COUNT,
                actual: values.len(),
            })?;
        Ok(Self { values })
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, distance: Distance) -> f64 {
        self.values[distance.index()]
    }
}

impl TryFrom<&[f64]> for Measurements {
    type Error = Error;

    fn try_from(values: &[f64]) -> Result<Self> {
        Self::from_slice(values)
    }
}

impl std::ops::Index<usize> for Measurements {
    type Output = f64;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.values[idx]
    }
}

impl std::ops::Index<Distance> for Measurements {
    type Output = f64;

    fn index(&self, distance: Distance) -> &Self::Output {
        &self.values[distance.index()]
    }
}

/// Scale-invariant feature vector compared by the matcher.
///
/// Produced with 15 entries by [`compute_ratios`](crate::compute_ratios), but
/// any length is accepted so that scoring can be exercised on small vectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioVector {
    pub values: Vec<f64>,
}

impl RatioVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

impl From<Vec<f64>> for RatioVector {
    fn from(values: Vec<f64>) -> Self {
        Self { values }
    }
}

impl AsRef<[f64]> for RatioVector {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

impl std::ops::Index<usize> for RatioVector {
    type Output = f64;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.values[idx]
    }
}

/// Labeled collection of faces with unique labels.
///
/// Iteration follows insertion order. Re-inserting an existing label
/// replaces its value but keeps its original position, so a scan over the
/// dataset is reproducible across runs and platforms.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset<V> {
    entries: Vec<(String, V)>,
    index: HashMap<String, usize>,
}

impl<V> Dataset<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Insert a value, returning the previous value stored under `label`.
    pub fn insert(&mut self, label: impl Into<String>, value: V) -> Option<V> {
        let label = label.into();
        if let Some(&pos) = self.index.get(&label) {
            return Some(std::mem::replace(&mut self.entries[pos].1, value));
        }
        self.index.insert(label.clone(), self.entries.len());
        self.entries.push((label, value));
        None
    }

    pub fn get(&self, label: &str) -> Option<&V> {
        self.index.get(label).map(|&pos| &self.entries[pos].1)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(label, value)| (label.as_str(), value))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    /// Apply `f` to every value, keeping labels and order.
    pub fn map_values<U, F>(&self, mut f: F) -> Dataset<U>
    where
        F: FnMut(&V) -> U,
    {
        Dataset {
            entries: self
                .entries
                .iter()
                .map(|(label, value)| (label.clone(), f(value)))
                .collect(),
            index: self.index.clone(),
        }
    }
}

impl<V> Default for Dataset<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Into<String>, V> FromIterator<(S, V)> for Dataset<V> {
    fn from_iter<I: IntoIterator<Item = (S, V)>>(iter: I) -> Self {
        let mut dataset = Dataset::new();
        for (label, value) in iter {
            dataset.insert(label, value);
        }
        dataset
    }
}
