//! Renders a session's decisions for stdout.

use std::collections::BTreeMap;

use anyhow::{anyhow, Context, Result};
use claimsift::{Selector, SortDirection, TableSession};
use serde::{Deserialize, Serialize};

/// Output format for the visible rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One visible row id per line.
    #[default]
    Text,
    /// The decisions plus the visible rows as a JSON document.
    Json,
    /// The header and the visible rows, in presentation order.
    Csv,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    status: &'static str,
    signed_date_status: &'static str,
    sort: Option<ActiveSort<'a>>,
    visible: Vec<&'a str>,
    rows: Vec<RowReport<'a>>,
}

#[derive(Debug, Serialize)]
struct ActiveSort<'a> {
    column: &'a str,
    direction: SortDirection,
}

#[derive(Debug, Serialize)]
struct RowReport<'a> {
    id: &'a str,
    cells: &'a BTreeMap<String, String>,
}

/// Renders the visible rows of `session` in presentation order.
pub fn render(session: &TableSession, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(session)),
        OutputFormat::Json => render_json(session),
        OutputFormat::Csv => render_csv(session),
    }
}

fn render_text(session: &TableSession) -> String {
    session
        .visible_in_order()
        .iter()
        .map(|id| format!("{id}\n"))
        .collect()
}

fn render_json(session: &TableSession) -> Result<String> {
    let data = session.dataset();
    let order = session.visible_in_order();
    let rows: Vec<RowReport<'_>> = order
        .iter()
        .filter_map(|id| data.row(id))
        .map(|row| RowReport {
            id: row.id.as_str(),
            cells: &row.cells,
        })
        .collect();

    let selectors = session.selectors();
    let report = Report {
        status: selectors.value(Selector::SignatureStatus),
        signed_date_status: selectors.value(Selector::SignedDateStatus),
        sort: session
            .sort_state()
            .active()
            .map(|(column, direction)| ActiveSort { column, direction }),
        visible: rows.iter().map(|row| row.id).collect(),
        rows,
    };
    let mut json = serde_json::to_string_pretty(&report).context("JSON serialization failed")?;
    json.push('\n');
    Ok(json)
}

fn render_csv(session: &TableSession) -> Result<String> {
    let data = session.dataset();
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(data.columns().iter().map(|c| c.name.as_str()))?;
    for id in session.visible_in_order() {
        let Some(row) = data.row(&id) else { continue };
        wtr.write_record(data.columns().iter().map(|c| {
            row.cells.get(&c.name).map(String::as_str).unwrap_or("")
        }))?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| anyhow!("CSV serialization failed: {e}"))?;
    String::from_utf8(bytes).context("CSV output was not UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimsift::{schema, Dataset, FilterCriterion, Row, StatusFilter};

    fn session() -> TableSession {
        let rows = vec![
            Row::new("a")
                .with_cell(schema::CLAIMANT_NAME, "Ann")
                .with_cell(schema::SIGNATURE, "Ann"),
            Row::new("b")
                .with_cell(schema::CLAIMANT_NAME, "Bob, Jr.")
                .with_cell(schema::SIGNATURE, ""),
            Row::new("c").with_cell(schema::CLAIMANT_NAME, "Cy"),
        ];
        let mut session = TableSession::new(Dataset::with_inferred_columns(
            [schema::CLAIMANT_NAME, schema::SIGNATURE],
            rows,
        )
        .unwrap());
        session.set_status(Selector::SignatureStatus, StatusFilter::Pending);
        session.request_sort(schema::CLAIMANT_NAME);
        session.request_sort(schema::CLAIMANT_NAME);
        session
    }

    #[test]
    fn text_lists_visible_ids() {
        assert_eq!(render(&session(), OutputFormat::Text).unwrap(), "c\nb\n");
    }

    #[test]
    fn json_reports_selectors_and_sort() {
        let out = render(&session(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["status"], "pending");
        assert_eq!(value["signed_date_status"], "pending_signature_via_date_col");
        assert_eq!(value["sort"]["column"], schema::CLAIMANT_NAME);
        assert_eq!(value["sort"]["direction"], "descending");
        assert_eq!(value["visible"], serde_json::json!(["c", "b"]));
        assert_eq!(value["rows"][1]["cells"][schema::CLAIMANT_NAME], "Bob, Jr.");
    }

    #[test]
    fn csv_quotes_and_fills_cells() {
        let out = render(&session(), OutputFormat::Csv).unwrap();
        assert_eq!(out, "Claimant Name,Signature\nCy,\n\"Bob, Jr.\",\n");
    }

    #[test]
    fn empty_view() {
        let mut session = session();
        session.set_extra_criteria(vec![FilterCriterion::exact(schema::CLAIMANT_NAME, "Zed")]);
        session.apply_filters();
        assert_eq!(render(&session, OutputFormat::Text).unwrap(), "");
        let out = render(&session, OutputFormat::Json).unwrap();
        assert!(out.contains("\"visible\": []"));
    }
}
