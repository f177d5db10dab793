//! Field value kinds and numeric extraction.
//!
//! Records expose every field as display text, so numbers arrive wrapped in
//! units: `"45%"`, `"8.9 GiB / 16 GiB"`, `"1.2 / 4 cores"`. The helpers here
//! pull the leading number out of such text for comparison and sorting.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(?:\.\d+)?").expect("leading-number pattern is valid"));

/// How a field's values are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// Free-form text, matched by substring.
    #[default]
    String,
    /// Text that starts with a number (optionally followed by a unit).
    /// Supports `>`, `<`, `>=`, `<=` comparisons and numeric sorting.
    Numeric,
    /// A small closed set of values (status, cluster, namespace...).
    /// Offered as dropdown options and per-field suggestions.
    Enum,
}

impl ValueKind {
    /// Returns `true` for [`ValueKind::Numeric`].
    pub fn is_numeric(self) -> bool {
        matches!(self, ValueKind::Numeric)
    }

    /// Returns `true` for [`ValueKind::Enum`].
    pub fn is_enum(self) -> bool {
        matches!(self, ValueKind::Enum)
    }
}

/// Extracts the unsigned decimal number at the very start of `value`.
///
/// No sign and no leading whitespace; a trailing dot without digits is not
/// part of the number.
///
/// ```
/// use clusterview_seeker::leading_number;
///
/// assert_eq!(leading_number("45%"), Some(45.0));
/// assert_eq!(leading_number("8.9 GiB / 16 GiB"), Some(8.9));
/// assert_eq!(leading_number("1.2 / 4 cores"), Some(1.2));
/// assert_eq!(leading_number("Ready"), None);
/// ```
pub fn leading_number(value: &str) -> Option<f64> {
    LEADING_NUMBER
        .find(value)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Parses the operand of a comparison the way a lenient float parser would:
/// surrounding whitespace and trailing units are ignored (`"8GiB"` is 8).
///
/// Returns `None` when no finite number can be read.
pub fn parse_operand(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if let Ok(n) = trimmed.parse::<f64>() {
        return n.is_finite().then_some(n);
    }

    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1.0, &trimmed[1..]),
        Some(b'+') => (1.0, &trimmed[1..]),
        _ => (1.0, trimmed),
    };

    if let Some(n) = leading_number(digits) {
        return Some(sign * n);
    }

    // ".5" style fractions
    digits
        .strip_prefix('.')
        .and_then(|frac| {
            let len = frac.bytes().take_while(u8::is_ascii_digit).count();
            (len > 0).then(|| format!("0.{}", &frac[..len]))
        })
        .and_then(|s| s.parse::<f64>().ok())
        .map(|n| sign * n)
}

/// Numeric sort key: the leading number, or zero when there is none.
pub fn sort_number(value: &str) -> f64 {
    leading_number(value).unwrap_or(0.0)
}

/// Case-insensitive substring test.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Case-insensitive equality.
pub fn eq_ci(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
