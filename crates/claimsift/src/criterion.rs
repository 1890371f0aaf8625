//! Filter criteria and their evaluators.
//!
//! A [`FilterCriterion`] names one column and one rule. Before a pass the
//! engine turns each criterion into a [`PreparedCriterion`], normalizing
//! needles and canonical text once instead of once per row. A criterion whose
//! configuration is empty prepares to `None` and places no constraint.

use serde::{Deserialize, Serialize};

use crate::cell::{classify_status, parse_amount, parse_display_date, CalendarDate};
use crate::normalize::normalize;
use crate::selector::StatusFilter;
use crate::table::CellSource;

/// A single filter rule applied to one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterCriterion {
    /// Case-insensitive "contains" on normalized text.
    Substring { column: String, needle: String },
    /// Case-insensitive equality, used for single-choice dropdowns.
    ExactMatch { column: String, value: String },
    /// Inclusive amount bounds. Unparsable cells fail while any bound is set.
    NumericRange {
        column: String,
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
    },
    /// Inclusive day bounds. Pending or unparsable cells fail while any bound is set.
    DateRange {
        column: String,
        #[serde(default)]
        start: Option<CalendarDate>,
        #[serde(default)]
        end: Option<CalendarDate>,
    },
    /// Pending/signed classification of a status cell.
    StatusClass {
        column: String,
        #[serde(default)]
        wanted: StatusFilter,
    },
    /// Hides rows whose narrative is exactly the known boilerplate.
    BoilerplateDeviation {
        column: String,
        canonical_text: String,
    },
}

/// What happens to rows when a criterion names a column the dataset lacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingColumnPolicy {
    /// The criterion is dropped for the pass.
    Skip,
    /// Every row fails the criterion.
    Exclude,
}

impl FilterCriterion {
    pub fn substring(column: impl Into<String>, needle: impl Into<String>) -> Self {
        FilterCriterion::Substring {
            column: column.into(),
            needle: needle.into(),
        }
    }

    pub fn exact(column: impl Into<String>, value: impl Into<String>) -> Self {
        FilterCriterion::ExactMatch {
            column: column.into(),
            value: value.into(),
        }
    }

    pub fn amount_range(column: impl Into<String>, min: Option<f64>, max: Option<f64>) -> Self {
        FilterCriterion::NumericRange {
            column: column.into(),
            min,
            max,
        }
    }

    pub fn date_range(
        column: impl Into<String>,
        start: Option<CalendarDate>,
        end: Option<CalendarDate>,
    ) -> Self {
        FilterCriterion::DateRange {
            column: column.into(),
            start,
            end,
        }
    }

    pub fn status(column: impl Into<String>, wanted: StatusFilter) -> Self {
        FilterCriterion::StatusClass {
            column: column.into(),
            wanted,
        }
    }

    pub fn deviation(column: impl Into<String>, canonical_text: impl Into<String>) -> Self {
        FilterCriterion::BoilerplateDeviation {
            column: column.into(),
            canonical_text: canonical_text.into(),
        }
    }

    /// The column this criterion reads.
    pub fn column(&self) -> &str {
        match self {
            FilterCriterion::Substring { column, .. }
            | FilterCriterion::ExactMatch { column, .. }
            | FilterCriterion::NumericRange { column, .. }
            | FilterCriterion::DateRange { column, .. }
            | FilterCriterion::StatusClass { column, .. }
            | FilterCriterion::BoilerplateDeviation { column, .. } => column,
        }
    }

    /// Returns the display name of this criterion's kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            FilterCriterion::Substring { .. } => "substring",
            FilterCriterion::ExactMatch { .. } => "exact_match",
            FilterCriterion::NumericRange { .. } => "numeric_range",
            FilterCriterion::DateRange { .. } => "date_range",
            FilterCriterion::StatusClass { .. } => "status_class",
            FilterCriterion::BoilerplateDeviation { .. } => "boilerplate_deviation",
        }
    }

    /// Range checks cannot be satisfied without their column; the text and
    /// status rules are simply dropped.
    pub fn missing_column_policy(&self) -> MissingColumnPolicy {
        match self {
            FilterCriterion::NumericRange { .. } | FilterCriterion::DateRange { .. } => {
                MissingColumnPolicy::Exclude
            }
            _ => MissingColumnPolicy::Skip,
        }
    }

    /// Returns `true` if this criterion constrains anything.
    pub fn is_active(&self) -> bool {
        self.prepare().is_some()
    }

    /// Normalizes the configuration, or returns `None` when inactive.
    pub fn prepare(&self) -> Option<PreparedCriterion<'_>> {
        let rule = match self {
            FilterCriterion::Substring { needle, .. } => {
                let needle = normalize(needle);
                (!needle.is_empty()).then_some(Rule::Contains(needle))?
            }
            FilterCriterion::ExactMatch { value, .. } => {
                let value = value.trim().to_lowercase();
                (!value.is_empty()).then_some(Rule::Equals(value))?
            }
            FilterCriterion::NumericRange { min, max, .. } => {
                let min = min.filter(|n| !n.is_nan());
                let max = max.filter(|n| !n.is_nan());
                (min.is_some() || max.is_some()).then_some(Rule::Amount { min, max })?
            }
            FilterCriterion::DateRange { start, end, .. } => (start.is_some() || end.is_some())
                .then_some(Rule::Day {
                    start: *start,
                    end: *end,
                })?,
            FilterCriterion::StatusClass { wanted, .. } => {
                wanted.is_active().then_some(Rule::Status(*wanted))?
            }
            FilterCriterion::BoilerplateDeviation { canonical_text, .. } => {
                let canonical = normalize(canonical_text);
                (!canonical.is_empty()).then_some(Rule::NotBoilerplate(canonical))?
            }
        };
        Some(PreparedCriterion {
            criterion: self,
            rule,
        })
    }

    /// Evaluates this criterion against one row.
    ///
    /// Returns `true` if the row passes. An inactive criterion always passes;
    /// a cell the row lacks is read as empty text.
    pub fn passes<R: CellSource>(&self, row: &R) -> bool {
        match self.prepare() {
            Some(prepared) => prepared.passes(row),
            None => true,
        }
    }
}

/// An active criterion with its configuration normalized.
#[derive(Debug, Clone)]
pub struct PreparedCriterion<'a> {
    criterion: &'a FilterCriterion,
    rule: Rule,
}

#[derive(Debug, Clone)]
enum Rule {
    Contains(String),
    Equals(String),
    Amount {
        min: Option<f64>,
        max: Option<f64>,
    },
    Day {
        start: Option<CalendarDate>,
        end: Option<CalendarDate>,
    },
    Status(StatusFilter),
    NotBoilerplate(String),
}

impl<'a> PreparedCriterion<'a> {
    /// The criterion this was prepared from.
    pub fn criterion(&self) -> &'a FilterCriterion {
        self.criterion
    }

    pub fn column(&self) -> &'a str {
        self.criterion.column()
    }

    /// Returns `true` if the row passes.
    pub fn passes<R: CellSource>(&self, row: &R) -> bool {
        self.passes_cell(row.cell_or_empty(self.column()))
    }

    /// Returns `true` if a cell with this raw text passes.
    pub fn passes_cell(&self, cell: &str) -> bool {
        match &self.rule {
            Rule::Contains(needle) => normalize(cell).contains(needle.as_str()),
            Rule::Equals(value) => cell.trim().to_lowercase() == *value,
            Rule::Amount { min, max } => match parse_amount(cell) {
                Some(amount) => within(amount, *min, *max),
                None => false,
            },
            Rule::Day { start, end } => match parse_display_date(cell) {
                Some(day) => within(day, *start, *end),
                None => false,
            },
            Rule::Status(wanted) => wanted.admits(classify_status(cell)),
            Rule::NotBoilerplate(canonical) => normalize(cell) != *canonical,
        }
    }
}

fn within<T: PartialOrd>(value: T, low: Option<T>, high: Option<T>) -> bool {
    low.map_or(true, |low| value >= low) && high.map_or(true, |high| value <= high)
}
