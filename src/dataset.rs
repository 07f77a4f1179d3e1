//! Loader for the plain-text face dataset format.
//!
//! A dataset is a sequence of blocks. Each block is a `FACE <label>` header
//! followed by one line holding the six measurements in
//! [`Distance::ALL`](crate::Distance::ALL) order:
//!
//! ```text
//! # comment lines and blank lines are ignored
//! FACE alice.jpg
//! 22.1 15.3 10.8 6.4 5.1 4.6
//!
//! FACE bob.jpg
//! 24.0 16.2 11.9 6.9 5.7 5.0
//! ```
//!
//! Files ending in `.bz2` are decompressed on the fly.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use bzip2::read::BzDecoder;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::ratios::convert_dataset;
use crate::types::{Dataset, Measurements, RatioVector, MEASUREMENT_COUNT};

const FACE_KEYWORD: &str = "FACE";

/// Parser position relative to the current `FACE` block.
enum Block {
    /// No header seen yet.
    None,
    /// Header seen on `line`, measurements not yet read.
    Open { label: String, line: usize },
    /// Header and its measurement line have been read.
    Closed { label: String },
}

/// Load a dataset from a plain or `.bz2` compressed file.
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset<Measurements>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let is_bz2 = path.extension().is_some_and(|ext| ext == "bz2");

    let dataset = if is_bz2 {
        parse_dataset(BufReader::new(BzDecoder::new(reader)))?
    } else {
        parse_dataset(reader)?
    };

    info!(path = %path.display(), faces = dataset.len(), "loaded face dataset");
    Ok(dataset)
}

/// Load a dataset and convert every face to its ratio vector.
pub fn load_ratios<P: AsRef<Path>>(path: P) -> Result<Dataset<RatioVector>> {
    Ok(convert_dataset(&load_dataset(path)?))
}

/// Parse a dataset from any buffered reader.
pub fn parse_dataset<R: BufRead>(reader: R) -> Result<Dataset<Measurements>> {
    let mut dataset = Dataset::new();
    let mut block = Block::None;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut tokens = trimmed.split_whitespace();
        if tokens.next() == Some(FACE_KEYWORD) {
            if let Block::Open { label, line } = &block {
                return Err(missing_measurements(label, *line));
            }

            let label = tokens
                .next()
                .ok_or_else(|| Error::parse(line_no, "FACE header is missing a label"))?;
            if tokens.next().is_some() {
                return Err(Error::parse(
                    line_no,
                    "FACE header must contain a single label",
                ));
            }

            block = Block::Open {
                label: label.to_string(),
                line: line_no,
            };
            continue;
        }

        let label = match block {
            Block::None => {
                return Err(Error::parse(
                    line_no,
                    "measurements found before any FACE header",
                ))
            }
            Block::Closed { label } => {
                return Err(Error::parse(
                    line_no,
                    format!("face {label} already has a measurement line"),
                ))
            }
            Block::Open { label, .. } => label,
        };

        let measurements = parse_measurement_line(trimmed, line_no)?;
        debug!(face = %label, line = line_no, "parsed face measurements");

        if dataset.insert(label.clone(), measurements).is_some() {
            warn!(face = %label, line = line_no, "duplicate face label, replacing earlier entry");
        }
        block = Block::Closed { label };
    }

    if let Block::Open { label, line } = &block {
        return Err(missing_measurements(label, *line));
    }

    Ok(dataset)
}

fn parse_measurement_line(line: &str, line_no: usize) -> Result<Measurements> {
    let values = line
        .split_whitespace()
        .map(|token| {
            token
                .parse::<f64>()
                .map_err(|_| Error::parse(line_no, format!("invalid number '{token}'")))
        })
        .collect::<Result<Vec<_>>>()?;

    if values.len() != MEASUREMENT_COUNT {
        return Err(Error::parse(
            line_no,
            format!(
                "expected {} measurements, found {}",
                MEASUREMENT_COUNT,
                values.len()
            ),
        ));
    }

    Measurements::from_slice(&values)
}

fn missing_measurements(label: &str, line: usize) -> Error {
    Error::parse(line, format!("face {label} has no measurement line"))
}
