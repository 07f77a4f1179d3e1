//! # ratio-face
//!
//! Identify a face by comparing scale-invariant ratios of facial distances.
//!
//! This crate provides:
//! - **Ratio features**: the 15 pairwise ratios of six linear facial
//!   distances (head height, ear-to-ear width, eyes to head top, eye spacing,
//!   nose length, chin to mouth)
//! - **Matching**: a sum-of-squared-relative-error score and an arg-min
//!   search over a labeled dataset
//! - **Dataset loading**: a small `FACE <label>` text format, plain or
//!   bzip2-compressed
//!
//! Because every feature is a ratio, measurements taken at any scale (pixels,
//! millimetres, inches) can be compared directly.
//!
//! ## Quick Start
//!
//! ```rust
//! use ratio_face::{compute_ratios, find_best_match, parse_dataset, convert_dataset};
//!
//! let text = "\
//! FACE alice.jpg
//! 22.0 15.0 11.0 6.5 5.0 4.5
//! FACE bob.jpg
//! 24.0 17.0 12.5 6.0 6.0 5.5
//! ";
//! let raw = parse_dataset(text.as_bytes()).unwrap();
//! let dataset = convert_dataset(&raw);
//!
//! // The same face measured at twice the scale
//! let query = compute_ratios(&[44.0, 30.0, 22.0, 13.0, 10.0, 9.0]).unwrap();
//!
//! let result = find_best_match(&dataset, &query).unwrap();
//! assert_eq!(result.label, "alice.jpg");
//! assert!(result.score < 1e-12);
//! ```
//!
//! ## Diagnostics
//!
//! [`MatchEngine::with_diagnostics`] keeps every entry's score alongside the
//! best match, and [`MatchEngine::rank`] returns the whole dataset ordered by
//! score.

pub mod dataset;
mod error;
pub mod input;
mod matching;
mod ratios;
pub mod report;
mod types;

pub use dataset::{load_dataset, load_ratios, parse_dataset};
pub use error::{Error, Result};
pub use matching::{find_best_match, score, MatchEngine, MatchResult, Scored};
pub use ratios::{compute_ratios, convert_dataset, RATIO_COUNT, RATIO_PAIRS};
pub use types::{Dataset, Distance, Measurements, RatioVector, MEASUREMENT_COUNT};
