//! Human-readable byte sizes.
//!
//! Two entry points:
//! - [`pretty_size`]    — bytes → `"1.5K"` style string
//! - [`reverse_pretty`] — `"512K"` style string → bytes
//!
//! The suffix table is fixed: B, K, M, G, T with 1024-based multipliers. The
//! forward direction picks the largest suffix that keeps the mantissa at or
//! above 1 and rounds to two decimals; the reverse direction requires a
//! trailing suffix letter and truncates the scaled value to whole bytes.

use crate::error::{Error, Result};

/// Suffixes in ascending order of magnitude.
pub const SUFFIXES: [(char, u64); 5] = [
    ('B', 1),
    ('K', 1 << 10),
    ('M', 1 << 20),
    ('G', 1 << 30),
    ('T', 1 << 40),
];

/// Formats a byte count with the largest applicable suffix.
///
/// `1536` becomes `"1.5K"`, `1048576` becomes `"1M"`. Values below one byte
/// render as `"0B"`.
pub fn pretty_size(size_in_bytes: u64) -> String {
    for &(suffix, limit) in SUFFIXES.iter().rev() {
        if size_in_bytes >= limit {
            let scaled = (size_in_bytes as f64 / limit as f64 * 100.0).round() / 100.0;
            return format!("{}{}", scaled, suffix);
        }
    }
    "0B".to_owned()
}

/// Parses a size string with a mandatory trailing suffix letter.
///
/// The leading portion may be any decimal number (`"0.5K"` → 512). Fails with
/// [`Error::InvalidSize`] when the suffix is unknown, the number does not
/// parse, or the value is negative.
pub fn reverse_pretty(readable: &str) -> Result<u64> {
    let suffix = readable
        .chars()
        .last()
        .ok_or_else(|| Error::InvalidSize("empty size string".to_owned()))?;
    let multiplier = SUFFIXES
        .iter()
        .find(|&&(s, _)| s == suffix)
        .map(|&(_, m)| m)
        .ok_or_else(|| {
            Error::InvalidSize(format!(
                "'{}' is not a valid size suffix, use one of: B, K, M, G, T",
                suffix
            ))
        })?;
    let number = &readable[..readable.len() - suffix.len_utf8()];
    let value: f64 = number
        .parse()
        .map_err(|_| Error::InvalidSize(format!("cannot parse '{}' as a number", number)))?;
    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidSize(format!(
            "'{}' does not describe a non-negative size",
            readable
        )));
    }
    Ok((value * multiplier as f64) as u64)
}

// ─── Tests ────────────────────────────────────────────────────────────────────
