//! Filter engine: conjunctive visibility over a dataset.
//!
//! ```text
//! visible(row) = every active criterion passes
//! ```
//!
//! There is no OR between criteria. Inactive criteria contribute nothing, so
//! an empty set shows every row, and adding a criterion can only shrink the
//! visible set.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::cell::CalendarDate;
use crate::criterion::{FilterCriterion, MissingColumnPolicy, PreparedCriterion};
use crate::selector::StatusFilter;
use crate::table::{CellSource, Dataset, RowId};

/// An ordered collection of criteria combined with logical AND.
///
/// # Example
///
/// ```
/// use claimsift::{Dataset, FilterSet, Row, RowId};
///
/// let data = Dataset::with_inferred_columns(
///     ["Claimant Name", "Total Claim Amount"],
///     vec![
///         Row::new("1").with_cell("Claimant Name", "Ann").with_cell("Total Claim Amount", "$100"),
///         Row::new("2").with_cell("Claimant Name", "Bob").with_cell("Total Claim Amount", "$50"),
///     ],
/// )?;
///
/// let filters = FilterSet::new().amount_range("Total Claim Amount", Some(60.0), None);
/// let visibility = filters.visible_rows(&data);
/// assert_eq!(visibility.visible_ids(), &[RowId::from("1")]);
/// # Ok::<(), claimsift::SiftError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    criteria: Vec<FilterCriterion>,
}

impl FilterSet {
    /// Creates an empty set, which shows every row.
    pub fn new() -> Self {
        FilterSet::default()
    }

    /// Adds a criterion.
    pub fn with(mut self, criterion: FilterCriterion) -> Self {
        self.criteria.push(criterion);
        self
    }

    pub fn push(&mut self, criterion: FilterCriterion) {
        self.criteria.push(criterion);
    }

    // ========================================================================
    // Shorthand builders
    // ========================================================================

    /// Adds a case-insensitive "contains" criterion.
    pub fn substring(self, column: &str, needle: &str) -> Self {
        self.with(FilterCriterion::substring(column, needle))
    }

    /// Adds a case-insensitive equality criterion.
    pub fn exact(self, column: &str, value: &str) -> Self {
        self.with(FilterCriterion::exact(column, value))
    }

    /// Adds an inclusive amount range.
    pub fn amount_range(self, column: &str, min: Option<f64>, max: Option<f64>) -> Self {
        self.with(FilterCriterion::amount_range(column, min, max))
    }

    /// Adds an inclusive day range.
    pub fn date_range(
        self,
        column: &str,
        start: Option<CalendarDate>,
        end: Option<CalendarDate>,
    ) -> Self {
        self.with(FilterCriterion::date_range(column, start, end))
    }

    /// Adds a signature status criterion.
    pub fn status(self, column: &str, wanted: StatusFilter) -> Self {
        self.with(FilterCriterion::status(column, wanted))
    }

    /// Hides rows whose `column` text is the given boilerplate.
    pub fn deviation(self, column: &str, canonical_text: &str) -> Self {
        self.with(FilterCriterion::deviation(column, canonical_text))
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    pub fn criteria(&self) -> &[FilterCriterion] {
        &self.criteria
    }

    /// Iterates over the criteria that constrain anything.
    pub fn active(&self) -> impl Iterator<Item = &FilterCriterion> {
        self.criteria.iter().filter(|c| c.is_active())
    }

    /// Returns `true` if no criterion is active (every row is visible).
    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Tests one row against every criterion, without any dataset context.
    pub fn matches<R: CellSource>(&self, row: &R) -> bool {
        self.criteria.iter().all(|c| c.passes(row))
    }

    /// Computes the visibility of every row in `dataset`.
    ///
    /// Criteria naming a column the dataset lacks follow their
    /// [`MissingColumnPolicy`], with one warning per criterion per pass.
    pub fn visible_rows(&self, dataset: &Dataset) -> Visibility {
        let mut checks: Vec<PreparedCriterion<'_>> = Vec::new();
        let mut exclude_all = false;

        for prepared in self.criteria.iter().filter_map(FilterCriterion::prepare) {
            if dataset.has_column(prepared.column()) {
                checks.push(prepared);
                continue;
            }
            let criterion = prepared.criterion();
            match criterion.missing_column_policy() {
                MissingColumnPolicy::Skip => {
                    warn!(
                        column = criterion.column(),
                        kind = criterion.kind_name(),
                        "column not found; criterion ignored"
                    );
                }
                MissingColumnPolicy::Exclude => {
                    warn!(
                        column = criterion.column(),
                        kind = criterion.kind_name(),
                        "column not found; range cannot be satisfied, hiding all rows"
                    );
                    exclude_all = true;
                }
            }
        }

        let mut visibility = Visibility::default();
        for row in dataset.rows() {
            let show = !exclude_all && checks.iter().all(|check| check.passes(row));
            visibility.record(&row.id, show);
        }

        debug!(
            criteria = checks.len(),
            visible = visibility.len(),
            total = visibility.total(),
            "filter pass complete"
        );
        visibility
    }
}

impl From<Vec<FilterCriterion>> for FilterSet {
    fn from(criteria: Vec<FilterCriterion>) -> Self {
        FilterSet { criteria }
    }
}

impl FromIterator<FilterCriterion> for FilterSet {
    fn from_iter<I: IntoIterator<Item = FilterCriterion>>(iter: I) -> Self {
        FilterSet {
            criteria: iter.into_iter().collect(),
        }
    }
}

impl Extend<FilterCriterion> for FilterSet {
    fn extend<I: IntoIterator<Item = FilterCriterion>>(&mut self, iter: I) {
        self.criteria.extend(iter);
    }
}

/// Computes row visibility for `criteria` over `dataset`.
pub fn visible_rows(dataset: &Dataset, criteria: &[FilterCriterion]) -> Visibility {
    FilterSet::from(criteria.to_vec()).visible_rows(dataset)
}

/// The outcome of a filter pass: one show/hide decision per row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Visibility {
    visible: Vec<RowId>,
    hidden: Vec<RowId>,
    shown: HashSet<RowId>,
}

impl Visibility {
    /// Every row of `dataset` visible.
    pub fn all(dataset: &Dataset) -> Self {
        let mut visibility = Visibility::default();
        for id in dataset.ids() {
            visibility.record(id, true);
        }
        visibility
    }

    fn record(&mut self, id: &RowId, show: bool) {
        if show {
            self.visible.push(id.clone());
            self.shown.insert(id.clone());
        } else {
            self.hidden.push(id.clone());
        }
    }

    /// Returns `true` if the row is shown.
    pub fn is_visible(&self, id: &RowId) -> bool {
        self.shown.contains(id)
    }

    /// Visible row ids in dataset order.
    pub fn visible_ids(&self) -> &[RowId] {
        &self.visible
    }

    /// Hidden row ids in dataset order.
    pub fn hidden_ids(&self) -> &[RowId] {
        &self.hidden
    }

    /// Number of visible rows.
    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// Number of rows decided.
    pub fn total(&self) -> usize {
        self.visible.len() + self.hidden.len()
    }
}
