//! Sort engine: type-aware, stable ordering of visible rows.
//!
//! Provides [`SortDirection`], [`SortRequest`], the per-column [`SortState`]
//! and [`sort_visible`]. Comparators dispatch on the column's
//! [`ColumnKind`]:
//!
//! | Kind       | Both parse        | One parses                  | Neither parses          |
//! |------------|-------------------|-----------------------------|-------------------------|
//! | `Date`     | by day            | the valid date sorts first  | case-insensitive text   |
//! | `Currency` | numerically       | the unparsable sorts first  | equal                   |
//! | otherwise  | case-insensitive trimmed text                                             |

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cell::{parse_amount, parse_display_date, CalendarDate};
use crate::table::{CellSource, ColumnKind, Dataset, RowId};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    pub fn is_ascending(self) -> bool {
        matches!(self, SortDirection::Ascending)
    }

    /// Applies this direction to an ascending comparison.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    /// The opposite direction.
    pub fn toggled(self) -> SortDirection {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A column and the direction to sort it in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortRequest {
    pub column: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortRequest {
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        SortRequest {
            column: column.into(),
            direction,
        }
    }

    pub fn ascending(column: impl Into<String>) -> Self {
        SortRequest::new(column, SortDirection::Ascending)
    }

    pub fn descending(column: impl Into<String>) -> Self {
        SortRequest::new(column, SortDirection::Descending)
    }
}

/// Remembered sort directions, one per column.
///
/// The first request for a column sorts ascending and each repeat flips it.
/// Switching columns keeps the other columns' remembered directions, but only
/// the most recently sorted column is reported as [`active`](Self::active).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    directions: HashMap<String, SortDirection>,
    active: Option<String>,
}

impl SortState {
    pub fn new() -> Self {
        SortState::default()
    }

    /// Produces the request for a click on `column` and records it.
    pub fn request(&mut self, column: &str) -> SortRequest {
        let direction = match self.directions.get(column) {
            Some(SortDirection::Ascending) => SortDirection::Descending,
            _ => SortDirection::Ascending,
        };
        self.directions.insert(column.to_string(), direction);
        self.active = Some(column.to_string());
        SortRequest::new(column, direction)
    }

    /// The last direction applied to `column`, if it was ever sorted.
    pub fn direction(&self, column: &str) -> Option<SortDirection> {
        self.directions.get(column).copied()
    }

    /// The column whose indicator is shown, with its direction.
    pub fn active(&self) -> Option<(&str, SortDirection)> {
        let column = self.active.as_deref()?;
        Some((column, self.directions.get(column).copied().unwrap_or_default()))
    }

    /// Forgets every remembered direction.
    pub fn clear(&mut self) {
        self.directions.clear();
        self.active = None;
    }
}

/// A cell's comparison key, derived once per sort.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Date {
        day: Option<CalendarDate>,
        text: String,
    },
    Amount(Option<f64>),
    Text(String),
}

impl SortKey {
    /// Builds the key for a raw cell of the given kind.
    pub fn new(kind: ColumnKind, cell: &str) -> SortKey {
        let cell = cell.trim();
        match kind {
            ColumnKind::Date => SortKey::Date {
                day: parse_display_date(cell),
                text: cell.to_lowercase(),
            },
            ColumnKind::Currency => SortKey::Amount(parse_amount(cell)),
            ColumnKind::Text | ColumnKind::Status => SortKey::Text(cell.to_lowercase()),
        }
    }

    /// Ascending comparison. Keys of different shapes compare equal.
    pub fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (
                SortKey::Date { day: a, text: ta },
                SortKey::Date { day: b, text: tb },
            ) => match (a, b) {
                (Some(a), Some(b)) => a.cmp(b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => ta.cmp(tb),
            },
            (SortKey::Amount(a), SortKey::Amount(b)) => match (a, b) {
                (Some(a), Some(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// Compares two raw cells of a column of `kind`, ascending.
pub fn compare_cells(kind: ColumnKind, a: &str, b: &str) -> Ordering {
    SortKey::new(kind, a).compare(&SortKey::new(kind, b))
}

/// Orders `visible` (the currently shown rows, in presentation order) by the
/// requested column.
///
/// The sort is stable, so rows with equal keys keep their relative order. Ids
/// not found in the dataset are read as empty cells. A column the dataset
/// lacks leaves the order unchanged.
pub fn sort_visible(dataset: &Dataset, visible: &[RowId], request: &SortRequest) -> Vec<RowId> {
    let Some(column) = dataset.column(&request.column) else {
        warn!(column = %request.column, "column not found; sort leaves order unchanged");
        return visible.to_vec();
    };

    let mut keyed: Vec<(SortKey, &RowId)> = visible
        .iter()
        .map(|id| {
            let cell = dataset
                .row(id)
                .map(|row| row.cell_or_empty(&column.name))
                .unwrap_or("");
            (SortKey::new(column.kind, cell), id)
        })
        .collect();

    keyed.sort_by(|(a, _), (b, _)| request.direction.apply(a.compare(b)));

    debug!(
        column = %request.column,
        kind = %column.kind,
        direction = %request.direction,
        rows = keyed.len(),
        "sorted visible rows"
    );
    keyed.into_iter().map(|(_, id)| id.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Column, Row};

    fn ids(v: &[RowId]) -> Vec<&str> {
        v.iter().map(RowId::as_str).collect()
    }

    fn single_column(kind: ColumnKind, cells: &[&str]) -> (Dataset, Vec<RowId>) {
        let rows: Vec<Row> = cells
            .iter()
            .enumerate()
            .map(|(i, cell)| Row::new(i).with_cell("c", *cell))
            .collect();
        let ds = Dataset::new(vec![Column::new("c", kind)], rows).unwrap();
        let order = ds.ids().cloned().collect();
        (ds, order)
    }

    #[test]
    fn direction_apply() {
        assert_eq!(SortDirection::Ascending.apply(Ordering::Less), Ordering::Less);
        assert_eq!(SortDirection::Descending.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(SortDirection::Descending.apply(Ordering::Equal), Ordering::Equal);
        assert_eq!(SortDirection::Ascending.toggled(), SortDirection::Descending);
        assert_eq!(SortDirection::Descending.to_string(), "desc");
    }

    #[test]
    fn state_toggles_per_column() {
        let mut state = SortState::new();
        assert_eq!(state.request("a").direction, SortDirection::Ascending);
        assert_eq!(state.request("a").direction, SortDirection::Descending);
        assert_eq!(state.request("b").direction, SortDirection::Ascending);
        assert_eq!(state.active(), Some(("b", SortDirection::Ascending)));
        // "a" kept its memory while "b" was active
        assert_eq!(state.request("a").direction, SortDirection::Ascending);
        assert_eq!(state.direction("b"), Some(SortDirection::Ascending));
        state.clear();
        assert_eq!(state.active(), None);
        assert_eq!(state.direction("a"), None);
    }

    #[test]
    fn text_is_case_insensitive_and_trimmed() {
        assert_eq!(compare_cells(ColumnKind::Text, "apple", "Banana"), Ordering::Less);
        assert_eq!(compare_cells(ColumnKind::Text, "  APPLE", "apple "), Ordering::Equal);
        assert_eq!(compare_cells(ColumnKind::Status, "signed", "Pending"), Ordering::Greater);
    }

    #[test]
    fn dates_before_pending() {
        assert_eq!(
            compare_cells(ColumnKind::Date, "03/01/2021", "02/01/2022"),
            Ordering::Less
        );
        assert_eq!(
            compare_cells(ColumnKind::Date, "12/31/2030", "Pending"),
            Ordering::Less
        );
        assert_eq!(
            compare_cells(ColumnKind::Date, "pending", "03/01/2021"),
            Ordering::Greater
        );
        assert_eq!(
            compare_cells(ColumnKind::Date, "Pending", "unknown"),
            Ordering::Less
        );
    }

    #[test]
    fn dates_ignore_time_of_day() {
        assert_eq!(
            compare_cells(ColumnKind::Date, "03/01/2021 11:00 PM", "03/01/2021 01:00 AM"),
            Ordering::Equal
        );
    }

    #[test]
    fn amounts_nulls_first() {
        assert_eq!(compare_cells(ColumnKind::Currency, "$9", "$10"), Ordering::Less);
        assert_eq!(compare_cells(ColumnKind::Currency, "", "$10"), Ordering::Less);
        assert_eq!(compare_cells(ColumnKind::Currency, "$1", "N/A"), Ordering::Greater);
        assert_eq!(compare_cells(ColumnKind::Currency, "", "N/A"), Ordering::Equal);
    }

    #[test]
    fn signed_zero_amounts_are_equal() {
        assert_eq!(compare_cells(ColumnKind::Currency, "-$0", "$0"), Ordering::Equal);
        assert_eq!(compare_cells(ColumnKind::Currency, "$0.00", "-0"), Ordering::Equal);
        let (ds, order) = single_column(ColumnKind::Currency, &["$0", "-$0", "$0.00"]);
        let asc = sort_visible(&ds, &order, &SortRequest::ascending("c"));
        assert_eq!(ids(&asc), vec!["0", "1", "2"]);
    }

    #[test]
    fn sorts_currency_ascending_and_descending() {
        let (ds, order) = single_column(ColumnKind::Currency, &["$100", "", "$50", "$1,000"]);
        let asc = sort_visible(&ds, &order, &SortRequest::ascending("c"));
        assert_eq!(ids(&asc), vec!["1", "2", "0", "3"]);
        let desc = sort_visible(&ds, &order, &SortRequest::descending("c"));
        assert_eq!(ids(&desc), vec!["3", "0", "2", "1"]);
    }

    #[test]
    fn sorts_dates_with_pending_last() {
        let (ds, order) =
            single_column(ColumnKind::Date, &["Pending", "03/03/2021", "03/01/2021 9:00 AM"]);
        let asc = sort_visible(&ds, &order, &SortRequest::ascending("c"));
        assert_eq!(ids(&asc), vec!["2", "1", "0"]);
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let (ds, _) = single_column(ColumnKind::Text, &["b", "A", "a", "B"]);
        let order: Vec<RowId> = ["3", "2", "1", "0"].into_iter().map(RowId::from).collect();
        let asc = sort_visible(&ds, &order, &SortRequest::ascending("c"));
        assert_eq!(ids(&asc), vec!["2", "1", "3", "0"]);
        let desc = sort_visible(&ds, &order, &SortRequest::descending("c"));
        assert_eq!(ids(&desc), vec!["3", "0", "2", "1"]);
    }

    #[test]
    fn only_given_rows_are_sorted() {
        let (ds, _) = single_column(ColumnKind::Text, &["d", "c", "b", "a"]);
        let subset: Vec<RowId> = vec!["0".into(), "2".into()];
        let sorted = sort_visible(&ds, &subset, &SortRequest::ascending("c"));
        assert_eq!(ids(&sorted), vec!["2", "0"]);
    }

    #[test]
    fn missing_column_keeps_order() {
        let (ds, order) = single_column(ColumnKind::Text, &["b", "a"]);
        let sorted = sort_visible(&ds, &order, &SortRequest::ascending("nope"));
        assert_eq!(sorted, order);
    }
}
