//! Coupled status selectors.
//!
//! The admin page offers two dropdowns that express the same tri-state
//! signature filter in different vocabularies: one over the "Signature"
//! column and one phrased in terms of the signed-date column. [`SyncedSelectors`]
//! owns the single underlying [`StatusFilter`] and translates every change
//! into the paired selector's value, so the two can never disagree when a
//! filter pass runs.
//!
//! | Status          | Signature selector | Signed-date selector              |
//! |-----------------|--------------------|-----------------------------------|
//! | `Any`           | `all`              | `all`                             |
//! | `Pending`       | `pending`          | `pending_signature_via_date_col`  |
//! | `Signed`        | `signed`           | `signed_via_date_col`             |

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cell::SignatureState;
use crate::criterion::FilterCriterion;
use crate::error::{Result, SiftError};

/// Tri-state signature filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    /// No constraint ("All" on the selectors).
    #[default]
    #[serde(alias = "all")]
    Any,
    /// Only unsigned records.
    Pending,
    /// Only signed records.
    Signed,
}

impl StatusFilter {
    /// Returns `true` if a record in `state` passes this filter.
    pub fn admits(self, state: SignatureState) -> bool {
        match self {
            StatusFilter::Any => true,
            StatusFilter::Pending => state == SignatureState::Pending,
            StatusFilter::Signed => state == SignatureState::Signed,
        }
    }

    /// Returns `true` unless this is [`StatusFilter::Any`].
    pub fn is_active(self) -> bool {
        self != StatusFilter::Any
    }

    /// Parses a value from the given selector's vocabulary.
    pub fn from_selector_value(selector: Selector, value: &str) -> Result<StatusFilter> {
        let value = value.trim();
        let found = [StatusFilter::Any, StatusFilter::Pending, StatusFilter::Signed]
            .into_iter()
            .find(|status| selector.accepts(*status, value));
        found.ok_or_else(|| SiftError::UnknownSelectorValue {
            selector: selector.as_str(),
            value: value.to_string(),
        })
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(Selector::SignatureStatus.value_for(*self))
    }
}

/// One of the two paired dropdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selector {
    /// Values `all`, `pending`, `signed`.
    SignatureStatus,
    /// Values `all`, `pending_signature_via_date_col`, `signed_via_date_col`.
    SignedDateStatus,
}

impl Selector {
    /// The selector this one is kept in agreement with.
    pub fn paired(self) -> Selector {
        match self {
            Selector::SignatureStatus => Selector::SignedDateStatus,
            Selector::SignedDateStatus => Selector::SignatureStatus,
        }
    }

    /// The value this selector shows for `status`.
    pub fn value_for(self, status: StatusFilter) -> &'static str {
        match (self, status) {
            (_, StatusFilter::Any) => "all",
            (Selector::SignatureStatus, StatusFilter::Pending) => "pending",
            (Selector::SignatureStatus, StatusFilter::Signed) => "signed",
            (Selector::SignedDateStatus, StatusFilter::Pending) => "pending_signature_via_date_col",
            (Selector::SignedDateStatus, StatusFilter::Signed) => "signed_via_date_col",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Selector::SignatureStatus => "signature status",
            Selector::SignedDateStatus => "signed date status",
        }
    }

    // Older pages suffixed the signed-date values with `_dd`.
    fn accepts(self, status: StatusFilter, value: &str) -> bool {
        let canonical = self.value_for(status);
        value.eq_ignore_ascii_case(canonical)
            || (self == Selector::SignedDateStatus
                && status.is_active()
                && value
                    .strip_suffix("_dd")
                    .is_some_and(|v| v.eq_ignore_ascii_case(canonical)))
    }
}

/// What the host must write back after a selector change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorUpdate {
    /// The resolved tri-state value.
    pub status: StatusFilter,
    /// The selector whose displayed value must be rewritten.
    pub paired: Selector,
    /// The value to write into the paired selector.
    pub paired_value: &'static str,
}

/// The synchronized selector pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncedSelectors {
    status: StatusFilter,
}

impl SyncedSelectors {
    pub fn new(status: StatusFilter) -> Self {
        SyncedSelectors { status }
    }

    /// The shared tri-state value.
    pub fn status(&self) -> StatusFilter {
        self.status
    }

    /// The value currently shown by `selector`.
    pub fn value(&self, selector: Selector) -> &'static str {
        selector.value_for(self.status)
    }

    /// Sets the shared value from a typed status, as if `selector` changed.
    pub fn set(&mut self, selector: Selector, status: StatusFilter) -> SelectorUpdate {
        self.status = status;
        let paired = selector.paired();
        let update = SelectorUpdate {
            status,
            paired,
            paired_value: paired.value_for(status),
        };
        debug!(
            selector = selector.as_str(),
            %status,
            paired_value = update.paired_value,
            "synchronized selectors"
        );
        update
    }

    /// Handles a change event carrying `value` from `selector`.
    ///
    /// Values outside the selector's vocabulary fall back to "all", which is
    /// what the page's own dropdowns do for an unrecognized option.
    pub fn on_change(&mut self, selector: Selector, value: &str) -> SelectorUpdate {
        let status = StatusFilter::from_selector_value(selector, value).unwrap_or_else(|err| {
            warn!("{err}; treating as 'all'");
            StatusFilter::Any
        });
        self.set(selector, status)
    }

    /// Strict variant of [`on_change`](Self::on_change) that rejects unknown
    /// values and leaves the state untouched.
    pub fn try_change(&mut self, selector: Selector, value: &str) -> Result<SelectorUpdate> {
        let status = StatusFilter::from_selector_value(selector, value)?;
        Ok(self.set(selector, status))
    }

    /// The status criterion this pair contributes on `column`, if any.
    pub fn criterion(&self, column: &str) -> Option<FilterCriterion> {
        self.status
            .is_active()
            .then(|| FilterCriterion::status(column, self.status))
    }
}
