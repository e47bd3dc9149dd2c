//! Reading line-oriented name lists and option values.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Read one name per line, trimming each line and skipping blank ones.
///
/// A leading byte-order mark is ignored.
pub fn read_names(path: &Path) -> Result<Vec<String>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read names: {}", path.display()))?;
    Ok(parse_names(&text))
}

pub fn parse_names(text: &str) -> Vec<String> {
    text.trim_start_matches('\u{feff}')
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read a synonym specification file verbatim.
pub fn read_synonyms(path: &Path) -> Result<String> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read synonyms: {}", path.display()))?;
    Ok(text.trim_start_matches('\u{feff}').to_string())
}

/// Parse a threshold given either as a fraction (`0.75`) or a percentage
/// (`75`, `75%`).
///
/// Values up to 1 are fractions; larger values up to 100 are percentages.
/// Range checks beyond that are left to option validation.
pub fn parse_threshold(value: &str) -> std::result::Result<f64, String> {
    let trimmed = value.trim();
    let (number, percent) = match trimmed.strip_suffix('%') {
        Some(number) => (number.trim(), true),
        None => (trimmed, false),
    };
    let parsed: f64 = number
        .parse()
        .map_err(|_| format!("invalid threshold '{value}'"))?;
    if !parsed.is_finite() {
        return Err(format!("invalid threshold '{value}'"));
    }
    if percent || (parsed > 1.0 && parsed <= 100.0) {
        Ok(parsed / 100.0)
    } else {
        Ok(parsed)
    }
}
