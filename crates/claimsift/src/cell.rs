//! Cell parsers: typed comparison values derived from raw cell text.
//!
//! Raw text is the canonical representation of every cell. The functions here
//! derive a typed value on demand and report failure as `None` rather than an
//! error, so a malformed cell can never abort a filter or sort pass.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SiftError};

/// A date compared at day granularity. Time of day is never kept.
pub type CalendarDate = NaiveDate;

/// Cell text that marks an unsigned record.
pub const PENDING_SIGNATURE: &str = "pending signature";

/// Short form of [`PENDING_SIGNATURE`] used by the signed-date column.
pub const PENDING: &str = "pending";

/// Signature state of a record, reduced from a status or date cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureState {
    /// Not yet signed.
    Pending,
    /// Signed.
    Signed,
}

impl SignatureState {
    /// Returns the display name of this state.
    pub fn as_str(self) -> &'static str {
        match self {
            SignatureState::Pending => "pending",
            SignatureState::Signed => "signed",
        }
    }
}

impl std::fmt::Display for SignatureState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parses a currency cell such as `"$1,234.50"`.
///
/// Dollar signs, thousands separators and whitespace are stripped before the
/// remainder is read as a number. Returns `None` for empty cells, for text
/// that is not a number, and for non-finite results.
///
/// ```
/// use claimsift::parse_amount;
///
/// assert_eq!(parse_amount("$1,234.50"), Some(1234.50));
/// assert_eq!(parse_amount("N/A"), None);
/// ```
pub fn parse_amount(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| *c != '$' && *c != ',' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parses a display date such as `"03/04/2021 10:00 AM"`.
///
/// Only the token before the first space is read, in `MM/DD/YYYY` form; any
/// time component is ignored. Returns `None` for the pending markers, for
/// months outside 1..=12, days outside 1..=31, years not after 1900, and for
/// days that do not exist in the given month.
///
/// ```
/// use claimsift::parse_display_date;
/// use chrono::NaiveDate;
///
/// assert_eq!(
///     parse_display_date("03/04/2021 10:00 AM"),
///     NaiveDate::from_ymd_opt(2021, 3, 4),
/// );
/// assert_eq!(parse_display_date("Pending"), None);
/// ```
pub fn parse_display_date(text: &str) -> Option<CalendarDate> {
    let text = text.trim();
    if text.is_empty() || is_pending_marker(text) {
        return None;
    }

    let token = text.split(' ').next()?;
    let mut parts = token.split('/');
    let (month, day, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let month: u32 = month.parse().ok()?;
    let day: u32 = day.parse().ok()?;
    let year: i32 = year.parse().ok()?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) || year <= 1900 {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parses a filter bound entered as `YYYY-MM-DD`, the format date inputs emit.
pub fn parse_iso_date(text: &str) -> Result<CalendarDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|source| SiftError::InvalidDateBound {
        value: text.to_string(),
        source,
    })
}

/// Classifies a signature cell.
///
/// An empty cell or one reading "pending signature" (any case) is
/// [`SignatureState::Pending`]; anything else counts as signed.
pub fn classify_status(text: &str) -> SignatureState {
    let text = text.trim();
    if text.is_empty() || text.eq_ignore_ascii_case(PENDING_SIGNATURE) {
        SignatureState::Pending
    } else {
        SignatureState::Signed
    }
}

fn is_pending_marker(text: &str) -> bool {
    text.eq_ignore_ascii_case(PENDING) || text.eq_ignore_ascii_case(PENDING_SIGNATURE)
}
