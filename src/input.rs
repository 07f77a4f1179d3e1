//! Obtaining a query face's measurements.

use std::io::{self, BufRead, Write};

use crate::error::{Error, Result};
use crate::types::{Distance, Measurements, MEASUREMENT_COUNT};

const INVALID_NUMBER_PROMPT: &str = "Error: you must enter a valid number: ";

/// Ask for each of the six distances in turn.
///
/// Prompts are written to `output`. A line whose first token is not a number
/// is answered with an error message and read again. Running out of input
/// before all six values are read is an [`io::ErrorKind::UnexpectedEof`].
pub fn prompt_measurements<R: BufRead, W: Write>(mut input: R, mut output: W) -> Result<Measurements> {
    let mut values = [0.0; MEASUREMENT_COUNT];

    for distance in Distance::ALL {
        write!(output, "{}", distance.prompt())?;
        output.flush()?;
        values[distance.index()] = read_number(&mut input, &mut output)?;
    }

    Ok(Measurements::new(values))
}

fn read_number<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<f64> {
    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input ended before all measurements were entered",
            )
            .into());
        }

        if let Some(value) = line
            .split_whitespace()
            .next()
            .and_then(|token| token.parse::<f64>().ok())
        {
            return Ok(value);
        }

        write!(output, "{}", INVALID_NUMBER_PROMPT)?;
        output.flush()?;
    }
}

/// Parse six measurements from a comma and/or whitespace separated list,
/// e.g. `"22,15.5,11,6.5,5,4.5"`.
pub fn parse_measurements(text: &str) -> Result<Measurements> {
    let values = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<f64>()
                .map_err(|_| Error::parse(1, format!("invalid number '{token}'")))
        })
        .collect::<Result<Vec<_>>>()?;

    Measurements::from_slice(&values)
}
