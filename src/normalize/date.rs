//! Date coercion for roster exports.
//!
//! Upstream exports write dates as ISO `YYYY-MM-DD`, as US `M/D/YY[YY]`
//! (sometimes followed by a time), or in assorted other shapes. Coercion
//! is best effort: recognised shapes become ISO, anything else is cut to
//! its first ten characters.

use serde::{Deserialize, Serialize};

/// How to interpret date cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFormatHint {
    /// Detect ISO first, then `MM/DD/YYYY`.
    #[default]
    Auto,
    /// Always read slashed dates as `MM/DD/YYYY`; skip ISO detection.
    #[serde(rename = "mm_dd_yyyy", alias = "mm-dd-yyyy")]
    MonthDayYear,
}

/// Coerces a raw date cell to an ISO `YYYY-MM-DD` string where possible.
///
/// # Examples
///
/// ```
/// use stonebridge_pairing::normalize::{DateFormatHint, coerce_date};
///
/// assert_eq!(coerce_date("3/4/24", DateFormatHint::Auto), "2024-03-04");
/// assert_eq!(coerce_date("2024-03-04", DateFormatHint::Auto), "2024-03-04");
/// assert_eq!(coerce_date("12/31/2023 08:00", DateFormatHint::Auto), "2023-12-31");
/// ```
pub fn coerce_date(raw: &str, hint: DateFormatHint) -> String {
    let s = raw.trim();

    if hint == DateFormatHint::Auto && looks_like_iso(s) {
        return first_chars(s, 10);
    }

    if let Some(iso) = month_day_year(s) {
        return iso;
    }

    first_chars(s, 10)
}

/// Dash checks at character positions 4 and 7.
fn looks_like_iso(s: &str) -> bool {
    let chars: Vec<char> = s.chars().take(10).collect();
    chars.len() >= 10 && chars[4] == '-' && chars[7] == '-'
}

fn month_day_year(s: &str) -> Option<String> {
    if !s.contains('/') {
        return None;
    }

    let date_part = s.split_whitespace().next()?;
    let parts: Vec<&str> = date_part.split('/').collect();
    if parts.len() < 3 {
        return None;
    }

    let year = if parts[2].chars().count() == 2 {
        format!("20{}", parts[2])
    } else {
        parts[2].to_string()
    };

    Some(format!("{}-{:0>2}-{:0>2}", year, parts[0], parts[1]))
}

fn first_chars(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}
