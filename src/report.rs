//! Rendering of match results.

use serde::Serialize;

use crate::error::Result;
use crate::matching::{MatchResult, Scored};

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    result: &'a MatchResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    top: Option<&'a [Scored]>,
}

/// Plain-text report: one `<label>: <score>` line per entry when the
/// result carries diagnostics, then `Best match: <label>`.
pub fn format_human_readable(result: &MatchResult) -> String {
    let mut s = String::new();

    if let Some(scores) = &result.scores {
        for entry in scores {
            s.push_str(&format!("{}: {}\n", entry.label, entry.score));
        }
    }
    s.push_str(&format!("Best match: {}\n", result.label));

    s
}

/// Numbered listing of the best `n` ranked entries.
pub fn format_ranking(ranked: &[Scored], n: usize) -> String {
    let mut s = String::new();

    for (i, entry) in ranked.iter().take(n).enumerate() {
        s.push_str(&format!("{:>3}. {} ({:.6})\n", i + 1, entry.label, entry.score));
    }

    s
}

/// Pretty-printed JSON report, optionally with a `top` ranking array.
/// Non-finite scores serialize as `null`.
pub fn format_json(result: &MatchResult, top: Option<&[Scored]>) -> Result<String> {
    Ok(serde_json::to_string_pretty(&JsonReport { result, top })?)
}
