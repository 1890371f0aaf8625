//! Claimsift - client-side filtering and sorting for claim record tables.
//!
//! Claimsift decides which rows of an administrative claims table are visible
//! and in which order, without a server round-trip. The host supplies the rows
//! and the current filter and sort requests; claimsift returns decisions and
//! leaves rendering to the host.
//!
//! - Cell parsers for amounts, display dates and signature status
//! - Six criterion kinds, combined strictly with AND
//! - Stable, type-aware sorting with per-column direction memory
//! - A synchronizer for the two selectors that share one status value
//!
//! # Quick Start
//!
//! ```rust
//! use claimsift::{Dataset, FilterSet, Row, SortRequest, sort_visible};
//!
//! let data = Dataset::with_inferred_columns(
//!     ["Claimant Name", "Total Claim Amount"],
//!     vec![
//!         Row::new("1").with_cell("Claimant Name", "Ann").with_cell("Total Claim Amount", "$100"),
//!         Row::new("2").with_cell("Claimant Name", "Bob").with_cell("Total Claim Amount", ""),
//!         Row::new("3").with_cell("Claimant Name", "Cy").with_cell("Total Claim Amount", "$75"),
//!     ],
//! )?;
//!
//! let visibility = FilterSet::new()
//!     .amount_range("Total Claim Amount", Some(60.0), None)
//!     .visible_rows(&data);
//!
//! let order = sort_visible(
//!     &data,
//!     visibility.visible_ids(),
//!     &SortRequest::ascending("Total Claim Amount"),
//! );
//! let order: Vec<&str> = order.iter().map(|id| id.as_str()).collect();
//! assert_eq!(order, ["3", "1"]);
//! # Ok::<(), claimsift::SiftError>(())
//! ```
//!
//! # Visibility Semantics
//!
//! ```text
//! visible(row) = every active criterion passes
//! ```
//!
//! | Criterion               | Passes when                                         |
//! |-------------------------|-----------------------------------------------------|
//! | `Substring`             | normalized cell contains the normalized needle      |
//! | `ExactMatch`            | trimmed cell equals the value, ignoring case        |
//! | `NumericRange`          | cell parses as an amount inside the inclusive range |
//! | `DateRange`             | cell parses as a date inside the inclusive range    |
//! | `StatusClass`           | the cell's pending/signed class is the wanted one   |
//! | `BoilerplateDeviation`  | normalized cell differs from the canonical text     |
//!
//! A criterion with empty configuration is inactive and always passes.
//!
//! # Diagnostics
//!
//! Missing columns and unparsable filter bounds are reported through
//! [`tracing`] and never surface as errors; install a subscriber to see them.

mod cell;
mod criterion;
mod error;
mod filter;
mod normalize;
mod ordering;
mod panel;
pub mod schema;
mod selector;
mod session;
mod table;

// Re-export public API
pub use cell::{
    classify_status, parse_amount, parse_display_date, parse_iso_date, CalendarDate,
    SignatureState, PENDING, PENDING_SIGNATURE,
};
pub use criterion::{FilterCriterion, MissingColumnPolicy, PreparedCriterion};
pub use error::{Result, SiftError};
pub use filter::{visible_rows, FilterSet, Visibility};
pub use normalize::{normalize, same_narrative};
pub use ordering::{compare_cells, sort_visible, SortDirection, SortKey, SortRequest, SortState};
pub use panel::{AmountSlot, ClaimsFilterPanel, DateSlot};
pub use selector::{Selector, SelectorUpdate, StatusFilter, SyncedSelectors};
pub use session::TableSession;
pub use table::{CellSource, Column, ColumnKind, Dataset, Row, RowId};
