//! Table data model: columns, rows and the dataset snapshot.
//!
//! Rows keep raw text only. Typed values are derived by the cell parsers each
//! time a criterion or comparator needs them, so an edited cell can never
//! leave a stale parsed value behind.

use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SiftError;

/// How a column's cells are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Free text, compared case-insensitively.
    #[default]
    Text,
    /// `MM/DD/YYYY` display dates, possibly followed by a time.
    Date,
    /// Dollar amounts.
    Currency,
    /// Signature status cells.
    Status,
}

impl ColumnKind {
    /// Guesses a column's kind from its header text.
    ///
    /// Headers mentioning "Date" hold display dates, headers ending in
    /// "Amount" hold currency, and the "Signature" column holds status text.
    pub fn infer(name: &str) -> ColumnKind {
        let name = name.trim();
        if name.contains("Date") {
            ColumnKind::Date
        } else if name.ends_with("Amount") {
            ColumnKind::Currency
        } else if name.eq_ignore_ascii_case("Signature") {
            ColumnKind::Status
        } else {
            ColumnKind::Text
        }
    }

    /// Returns the config name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnKind::Text => "text",
            ColumnKind::Date => "date",
            ColumnKind::Currency => "currency",
            ColumnKind::Status => "status",
        }
    }
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ColumnKind {
    type Err = SiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(ColumnKind::Text),
            "date" => Ok(ColumnKind::Date),
            "currency" => Ok(ColumnKind::Currency),
            "status" => Ok(ColumnKind::Status),
            _ => Err(SiftError::UnknownColumnKind(s.to_string())),
        }
    }
}

/// A named, typed column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

impl Column {
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Column {
            name: name.into(),
            kind,
        }
    }

    /// Creates a column whose kind is inferred from its name.
    pub fn inferred(name: impl Into<String>) -> Self {
        let name = name.into();
        let kind = ColumnKind::infer(&name);
        Column { name, kind }
    }
}

/// Opaque row identifier supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(String);

impl RowId {
    pub fn new(id: impl Into<String>) -> Self {
        RowId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RowId {
    fn from(id: &str) -> Self {
        RowId(id.to_string())
    }
}

impl From<String> for RowId {
    fn from(id: String) -> Self {
        RowId(id)
    }
}

impl From<usize> for RowId {
    fn from(id: usize) -> Self {
        RowId(id.to_string())
    }
}

/// Read access to a row's raw cells.
///
/// Criterion evaluators only need this much from a row, so hosts can expose
/// their own record types without copying into [`Row`].
pub trait CellSource {
    /// The row's identifier.
    fn row_id(&self) -> &RowId;

    /// Raw text of the cell in `column`, or `None` if the row has no such cell.
    fn cell(&self, column: &str) -> Option<&str>;

    /// Raw text of the cell in `column`, reading an absent cell as empty.
    fn cell_or_empty(&self, column: &str) -> &str {
        self.cell(column).unwrap_or("")
    }
}

/// One record: an id and its cells keyed by column name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub id: RowId,
    pub cells: BTreeMap<String, String>,
}

impl Row {
    pub fn new(id: impl Into<RowId>) -> Self {
        Row {
            id: id.into(),
            cells: BTreeMap::new(),
        }
    }

    /// Adds or replaces a cell.
    pub fn with_cell(mut self, column: impl Into<String>, text: impl Into<String>) -> Self {
        self.cells.insert(column.into(), text.into());
        self
    }

    /// Replaces the text of a cell in place.
    pub fn set_cell(&mut self, column: impl Into<String>, text: impl Into<String>) {
        self.cells.insert(column.into(), text.into());
    }
}

impl CellSource for Row {
    fn row_id(&self) -> &RowId {
        &self.id
    }

    fn cell(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }
}

/// An ordered row set with its column schema.
///
/// A dataset is treated as an immutable snapshot for the duration of a filter
/// or sort pass.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    columns: Vec<Column>,
    rows: Vec<Row>,
    index: HashMap<RowId, usize>,
}

impl Dataset {
    /// Creates a dataset.
    ///
    /// Visibility and presentation order are keyed by row id, so ids must be
    /// unique. The first repeated id is reported as
    /// [`SiftError::DuplicateRowId`].
    pub fn new(columns: Vec<Column>, rows: Vec<Row>) -> crate::error::Result<Self> {
        let mut index = HashMap::with_capacity(rows.len());
        for (pos, row) in rows.iter().enumerate() {
            if index.insert(row.id.clone(), pos).is_some() {
                return Err(SiftError::DuplicateRowId(row.id.to_string()));
            }
        }
        Ok(Dataset {
            columns,
            rows,
            index,
        })
    }

    /// Creates a dataset whose column kinds are inferred from the names.
    pub fn with_inferred_columns<I, S>(names: I, rows: Vec<Row>) -> crate::error::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns = names.into_iter().map(Column::inferred).collect();
        Dataset::new(columns, rows)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Looks up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Looks up a row by id.
    pub fn row(&self, id: &RowId) -> Option<&Row> {
        self.index.get(id).map(|&pos| &self.rows[pos])
    }

    /// Row ids in dataset order.
    pub fn ids(&self) -> impl Iterator<Item = &RowId> {
        self.rows.iter().map(|r| &r.id)
    }

    /// Replaces one cell's text. Returns `false` when no row has the id.
    pub fn set_cell(&mut self, id: &RowId, column: &str, text: impl Into<String>) -> bool {
        match self.index.get(id) {
            Some(&pos) => {
                self.rows[pos].set_cell(column, text);
                true
            }
            None => false,
        }
    }
}
