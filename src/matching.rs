//! Nearest-face search over ratio vectors.
//!
//! The distance between a dataset entry (the *reference*) and the face being
//! identified (the *query*) is the sum of squared relative errors
//!
//! ```text
//! score = Σ ((query[i] - reference[i]) / reference[i])²
//! ```
//!
//! The denominator is always the reference component, so the metric is not
//! symmetric. Lower is better and identical vectors score 0.

use std::cmp::Ordering;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::types::{Dataset, RatioVector};

/// Score a query against a reference vector of the same length.
pub fn score(reference: &[f64], query: &[f64]) -> Result<f64> {
    if reference.len() != query.len() {
        return Err(Error::InvalidInput {
            expected: reference.len(),
            actual: query.len(),
        });
    }

    Ok(reference
        .iter()
        .zip(query)
        .map(|(r, q)| ((q - r) / r).powi(2))
        .sum())
}

/// Find the dataset entry closest to `query`.
///
/// Shorthand for `MatchEngine::new(dataset).find_best_match(query)`.
pub fn find_best_match(dataset: &Dataset<RatioVector>, query: &RatioVector) -> Result<MatchResult> {
    MatchEngine::new(dataset).find_best_match(query)
}

/// A dataset label together with its score against a query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scored {
    pub label: String,
    pub score: f64,
}

/// Outcome of a single query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    /// Label of the best-scoring entry.
    #[serde(rename = "best_match")]
    pub label: String,
    /// Score of the best-scoring entry.
    pub score: f64,
    /// Every entry's score in scan order, present in diagnostic mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<Vec<Scored>>,
}

/// Scores queries against a borrowed, read-only dataset.
///
/// Entries are scanned in the dataset's insertion order and the best entry
/// is only replaced on strict improvement, so on exact ties the label seen
/// first wins. NaN scores rank below every number, including infinity.
#[derive(Debug, Clone, Copy)]
pub struct MatchEngine<'a> {
    dataset: &'a Dataset<RatioVector>,
    diagnostics: bool,
}

impl<'a> MatchEngine<'a> {
    pub fn new(dataset: &'a Dataset<RatioVector>) -> Self {
        Self {
            dataset,
            diagnostics: false,
        }
    }

    /// Record every entry's score in the returned [`MatchResult`].
    ///
    /// This never changes which entry is selected.
    pub fn with_diagnostics(mut self, diagnostics: bool) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn dataset(&self) -> &'a Dataset<RatioVector> {
        self.dataset
    }

    /// Return the label with the lowest score against `query`.
    ///
    /// Fails with [`Error::NotFound`] on an empty dataset and with
    /// [`Error::InvalidInput`] if any entry's length differs from the query's.
    pub fn find_best_match(&self, query: &RatioVector) -> Result<MatchResult> {
        let mut best: Option<(&str, f64)> = None;
        let mut scores = self
            .diagnostics
            .then(|| Vec::with_capacity(self.dataset.len()));

        for (label, reference) in self.dataset.iter() {
            let difference = score(reference.as_slice(), query.as_slice())?;

            if let Some(table) = scores.as_mut() {
                table.push(Scored {
                    label: label.to_string(),
                    score: difference,
                });
            }

            let improves = match best {
                None => true,
                Some((_, min_difference)) => {
                    compare_scores(difference, min_difference) == Ordering::Less
                }
            };
            if improves {
                best = Some((label, difference));
            }
        }

        let (label, min_difference) = best.ok_or(Error::NotFound)?;
        Ok(MatchResult {
            label: label.to_string(),
            score: min_difference,
            scores,
        })
    }

    /// Score every entry and sort by ascending score.
    ///
    /// Ties keep scan order and NaN scores come last, so the first element
    /// agrees with [`find_best_match`](Self::find_best_match).
    pub fn rank(&self, query: &RatioVector) -> Result<Vec<Scored>> {
        let mut ranked = self
            .dataset
            .iter()
            .map(|(label, reference)| {
                Ok(Scored {
                    label: label.to_string(),
                    score: score(reference.as_slice(), query.as_slice())?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        ranked.sort_by(|a, b| compare_scores(a.score, b.score));
        Ok(ranked)
    }
}

/// Total order on scores with NaN placed after every number.
fn compare_scores(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ratios::compute_ratios;

    fn dataset(entries: &[(&str, &[f64])]) -> Dataset<RatioVector> {
        entries
            .iter()
            .map(|(label, values)| (*label, RatioVector::from(values.to_vec())))
            .collect()
    }

    fn query(values: &[f64]) -> RatioVector {
        RatioVector::from(values.to_vec())
    }

    #[test]
    fn identical_vectors_score_zero() {
        let r = compute_ratios(&[22.0, 15.0, 11.0, 6.5, 5.0, 4.5]).unwrap();
        assert_eq!(score(r.as_slice(), r.as_slice()).unwrap(), 0.0);
    }

    #[test]
    fn score_sums_squared_relative_errors() {
        // ((3 - 2) / 2)^2 + ((4 - 4) / 4)^2 + ((5 - 10) / 10)^2 = 0.25 + 0 + 0.25
        let s = score(&[2.0, 4.0, 10.0], &[3.0, 4.0, 5.0]).unwrap();
        assert!((s - 0.5).abs() < 1e-12);
    }

    #[test]
    fn score_is_asymmetric() {
        let a = [2.0, 4.0];
        let b = [4.0, 4.0];

        // Relative to a: ((4 - 2) / 2)^2 = 1
        assert_eq!(score(&a, &b).unwrap(), 1.0);
        // Relative to b: ((2 - 4) / 4)^2 = 0.25
        assert_eq!(score(&b, &a).unwrap(), 0.25);
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let reference = vec![1.0; 15];
        let short = vec![1.0; 14];

        let err = score(&reference, &short).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidInput {
                expected: 15,
                actual: 14
            }
        ));

        let data = dataset(&[("a", &reference[..])]);
        assert!(matches!(
            find_best_match(&data, &query(&short)),
            Err(Error::InvalidInput { .. })
        ));
    }

    #[test]
    fn exact_match_wins() {
        let data = dataset(&[("a", &[1.0, 2.0, 3.0]), ("b", &[1.0, 2.0, 4.0])]);
        let result = find_best_match(&data, &query(&[1.0, 2.0, 3.0])).unwrap();

        assert_eq!(result.label, "a");
        assert_eq!(result.score, 0.0);
        assert!(result.scores.is_none());
    }

    #[test]
    fn ties_go_to_first_seen() {
        let data = dataset(&[("x", &[1.0, 1.0]), ("y", &[1.0, 1.0])]);
        let result = find_best_match(&data, &query(&[1.0, 1.0])).unwrap();
        assert_eq!(result.label, "x");

        let reversed = dataset(&[("y", &[1.0, 1.0]), ("x", &[1.0, 1.0])]);
        let result = find_best_match(&reversed, &query(&[1.0, 1.0])).unwrap();
        assert_eq!(result.label, "y");
    }

    #[test]
    fn empty_dataset_is_not_found() {
        let data = Dataset::new();
        assert!(matches!(
            find_best_match(&data, &query(&[1.0])),
            Err(Error::NotFound)
        ));
    }

    #[test]
    fn non_finite_reference_never_beats_finite_alternative() {
        let broken = compute_ratios(&[20.0, 0.0, 10.0, 6.0, 5.0, 4.0]).unwrap();
        assert!(broken.values.iter().any(|r| r.is_infinite()));

        let good = compute_ratios(&[21.0, 15.0, 10.0, 6.0, 5.0, 4.0]).unwrap();
        let target = compute_ratios(&[20.0, 14.0, 10.0, 6.0, 5.0, 4.0]).unwrap();

        let broken_score = score(broken.as_slice(), target.as_slice()).unwrap();
        assert!(!broken_score.is_finite());

        let data: Dataset<RatioVector> = [("broken", broken), ("good", good)].into_iter().collect();
        let result = find_best_match(&data, &target).unwrap();
        assert_eq!(result.label, "good");
        assert!(result.score.is_finite());
    }

    #[test]
    fn nan_ranks_below_infinity() {
        // 0 / 0 component: NaN
        let nan_ref: &[f64] = &[0.0, 1.0];
        // Non-zero query over a zero reference: +inf
        let inf_ref: &[f64] = &[0.0, 2.0];
        let q = query(&[0.0, 1.0]);
        assert!(score(nan_ref, q.as_slice()).unwrap().is_nan());

        let q_inf = query(&[1.0, 2.0]);
        assert_eq!(score(inf_ref, q_inf.as_slice()).unwrap(), f64::INFINITY);

        let data = dataset(&[("nan", &[0.0, 1.0]), ("inf", &[1.0, 0.0])]);
        // "nan": (0-0)/0 -> NaN; "inf": ((1-0)/0)^2 -> inf
        let result = find_best_match(&data, &query(&[0.0, 1.0])).unwrap();
        assert_eq!(result.label, "inf");
        assert_eq!(result.score, f64::INFINITY);
    }

    #[test]
    fn lone_nan_entry_is_still_returned() {
        let data = dataset(&[("only", &[0.0])]);
        let result = find_best_match(&data, &query(&[0.0])).unwrap();
        assert_eq!(result.label, "only");
        assert!(result.score.is_nan());
    }

    #[test]
    fn diagnostics_do_not_change_result() {
        let data = dataset(&[
            ("a", &[1.0, 2.0]),
            ("b", &[2.0, 2.0]),
            ("c", &[1.0, 4.0]),
        ]);
        let q = query(&[2.0, 2.0]);

        let plain = MatchEngine::new(&data).find_best_match(&q).unwrap();
        let verbose = MatchEngine::new(&data)
            .with_diagnostics(true)
            .find_best_match(&q)
            .unwrap();

        assert_eq!(plain.label, "b");
        assert_eq!(verbose.label, plain.label);
        assert_eq!(verbose.score, plain.score);

        let table = verbose.scores.unwrap();
        let labels: Vec<_> = table.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["a", "b", "c"]);
        // a: ((2-1)/1)^2 + 0 = 1
        assert_eq!(table[0].score, 1.0);
        assert_eq!(table[1].score, 0.0);
        // c: 1 + ((2-4)/4)^2 = 1.25
        assert_eq!(table[2].score, 1.25);
    }

    #[test]
    fn rank_sorts_ascending_with_nan_last() {
        let data = dataset(&[
            ("nan", &[0.0, 1.0]),
            ("far", &[1.0, 4.0]),
            ("tie1", &[2.0, 1.0]),
            ("same", &[0.5, 1.0]),
            ("tie2", &[2.0, 1.0]),
        ]);
        let q = query(&[0.0, 1.0]);

        let ranked = MatchEngine::new(&data).rank(&q).unwrap();
        let labels: Vec<_> = ranked.iter().map(|s| s.label.as_str()).collect();
        // tie1, same and tie2 all score 1; far scores 1 + 0.5625
        assert_eq!(labels, vec!["tie1", "same", "tie2", "far", "nan"]);
        assert!(ranked[4].score.is_nan());

        let best = find_best_match(&data, &q).unwrap();
        assert_eq!(best.label, ranked[0].label);
    }
}
