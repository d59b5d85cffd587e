use std::fmt::Display;

/// Used whenever a date column is empty or missing.
pub const DEFAULT_DATE: &str = "2025-01-01";

/// Tried in this order, the first one that splits into three numbers wins.
const SEPARATORS: [char; 3] = ['.', '/', '-'];

/// Outcome of [`normalize_date`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedDate {
    /// `YYYY-MM-DD`
    Iso(String),
    /// No separator produced three integer parts, the input is kept as is.
    Unrecognized(String),
    /// The input was empty, [`DEFAULT_DATE`] is used.
    Default,
}

impl NormalizedDate {
    pub fn as_str(&self) -> &str {
        match self {
            NormalizedDate::Iso(s) | NormalizedDate::Unrecognized(s) => s,
            NormalizedDate::Default => DEFAULT_DATE,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            NormalizedDate::Iso(s) | NormalizedDate::Unrecognized(s) => s,
            NormalizedDate::Default => DEFAULT_DATE.to_string(),
        }
    }

    /// `true` if the value is not derived from a recognized day-month-year date.
    pub fn is_fallback(&self) -> bool {
        !matches!(self, NormalizedDate::Iso(_))
    }
}

impl Display for NormalizedDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Turns a day-month-year date such as `31.01.2025`, `31/1/2025` or
/// `31-01-2025` into `2025-01-31`.
///
/// Day and month are not range checked. A string that contains more than one
/// kind of separator is split on whichever comes first in `.`, `/`, `-`, even
/// if another split would have made more sense. Strings that are already in
/// `YYYY-MM-DD` form are returned unchanged.
pub fn normalize_date(input: &str) -> NormalizedDate {
    // blank counts as empty, not only ""
    if input.trim().is_empty() {
        return NormalizedDate::Default;
    }
    for sep in SEPARATORS {
        let parts: Vec<&str> = input.split(sep).collect();
        if parts.len() != 3 {
            continue;
        }
        if sep == '-' && is_iso(&parts) {
            return NormalizedDate::Iso(input.to_string());
        }
        let parsed = (
            parts[0].trim().parse::<i64>(),
            parts[1].trim().parse::<i64>(),
            parts[2].trim().parse::<i64>(),
        );
        if let (Ok(day), Ok(month), Ok(year)) = parsed {
            return NormalizedDate::Iso(format!("{:04}-{:02}-{:02}", year, month, day));
        }
    }
    NormalizedDate::Unrecognized(input.to_string())
}

/// Shorthand for `normalize_date(input).into_string()`.
pub fn normalize(input: &str) -> String {
    normalize_date(input).into_string()
}

/// Anything `{:04}-{:02}-{:02}` can produce from non-negative numbers.
fn is_iso(parts: &[&str]) -> bool {
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    parts.iter().all(|p| digits(p))
        && parts[0].len() >= 4
        && parts[1].len() >= 2
        && parts[2].len() >= 2
}
