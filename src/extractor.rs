//! Phone number extraction from free-form message text.
//!
//! Deterministic digit-run scan, no LLM or locale tables. A message can
//! carry several numeric runs (order IDs, dates); only the first qualifying
//! run is used and the rest are ignored.

use std::sync::OnceLock;

use regex::Regex;

/// Digit-run lengths accepted as candidate numbers.
const RUN_PATTERN: &str = r"\d{7,15}";

/// Lengths treated as national mobile numbers and preferred over other runs.
const PREFERRED_LENGTHS: [usize; 2] = [10, 11];

fn run_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(RUN_PATTERN).expect("digit-run pattern is valid"))
}

/// Find the most plausible phone number in `text`, digits only.
///
/// Scans for digit runs of length 7–15 and returns the first run whose
/// length is exactly 10 or 11, falling back to the first run found.
/// Returns `None` when the text has no run in range; callers treat that
/// as "not a lookup request" and stay silent.
pub fn extract_number(text: &str) -> Option<String> {
    let runs: Vec<&str> = run_regex().find_iter(text).map(|m| m.as_str()).collect();

    runs.iter()
        .find(|run| PREFERRED_LENGTHS.contains(&run.len()))
        .or_else(|| runs.first())
        .map(|run| (*run).to_owned())
}
