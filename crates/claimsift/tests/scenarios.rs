//! End-to-end scenarios for the claims admin table.

use chrono::NaiveDate;
use claimsift::schema::{self, BOILERPLATE_BASIS, BOILERPLATE_INJURY};
use claimsift::{
    parse_amount, parse_display_date, sort_visible, visible_rows, ClaimsFilterPanel, Column,
    ColumnKind, Dataset, FilterCriterion, FilterSet, Row, RowId, Selector, SortRequest,
    StatusFilter, SyncedSelectors, TableSession,
};

fn ids(v: &[RowId]) -> Vec<&str> {
    v.iter().map(RowId::as_str).collect()
}

fn claims() -> Dataset {
    let rows = vec![
        Row::new("101")
            .with_cell(schema::CLAIMANT_NAME, "Dana Whitfield")
            .with_cell(schema::STATE, "OH")
            .with_cell(schema::SIGNATURE, "Dana Whitfield")
            .with_cell(schema::SIGNED, "03/05/2021 02:15 PM")
            .with_cell(schema::CREATED, "03/01/2021 09:00 AM")
            .with_cell(schema::BASIS_OF_CLAIM, BOILERPLATE_BASIS)
            .with_cell(schema::NATURE_OF_INJURY, BOILERPLATE_INJURY)
            .with_cell(schema::TOTAL_CLAIM_AMOUNT, "$250,000.00"),
        Row::new("102")
            .with_cell(schema::CLAIMANT_NAME, "Eli Park")
            .with_cell(schema::STATE, "pa")
            .with_cell(schema::SIGNATURE, "Pending Signature")
            .with_cell(schema::SIGNED, "Pending")
            .with_cell(schema::CREATED, "03/03/2021 11:30 AM")
            .with_cell(
                schema::BASIS_OF_CLAIM,
                BOILERPLATE_BASIS.replace("tear gas", "smoke"),
            )
            .with_cell(schema::NATURE_OF_INJURY, BOILERPLATE_INJURY.to_uppercase())
            .with_cell(schema::TOTAL_CLAIM_AMOUNT, ""),
        Row::new("103")
            .with_cell(schema::CLAIMANT_NAME, "Fran Ortiz")
            .with_cell(schema::STATE, "OH")
            .with_cell(schema::SIGNATURE, "")
            .with_cell(schema::SIGNED, "")
            .with_cell(schema::CREATED, "02/27/2021 04:45 PM")
            .with_cell(
                schema::BASIS_OF_CLAIM,
                format!("  {}\n", BOILERPLATE_BASIS.replace(' ', "\n\t ")),
            )
            .with_cell(schema::NATURE_OF_INJURY, "I was hit by a projectile.")
            .with_cell(schema::TOTAL_CLAIM_AMOUNT, "$50"),
    ];
    Dataset::new(schema::claims_columns(), rows).unwrap()
}

// ============================================================================
// Cell parsing
// ============================================================================

#[test]
fn amount_examples() {
    assert_eq!(parse_amount("$1,234.50"), Some(1234.50));
    assert_eq!(parse_amount(""), None);
    assert_eq!(parse_amount("N/A"), None);
}

#[test]
fn date_examples() {
    assert_eq!(
        parse_display_date("03/04/2021 10:00 AM"),
        NaiveDate::from_ymd_opt(2021, 3, 4)
    );
    assert_eq!(parse_display_date("Pending"), None);
}

// ============================================================================
// Filtering
// ============================================================================

#[test]
fn currency_range_scenario() {
    let data = Dataset::new(
        vec![Column::new("Amount", ColumnKind::Currency)],
        vec![
            Row::new("row0").with_cell("Amount", "$100"),
            Row::new("row1").with_cell("Amount", ""),
            Row::new("row2").with_cell("Amount", "$50"),
        ],
    )
    .unwrap();
    let vis = visible_rows(
        &data,
        &[FilterCriterion::amount_range("Amount", Some(60.0), None)],
    );
    assert_eq!(ids(vis.visible_ids()), vec!["row0"]);
}

#[test]
fn date_range_scenario() {
    let data = Dataset::new(
        vec![Column::new("Created", ColumnKind::Date)],
        vec![
            Row::new("first").with_cell("Created", "03/01/2021"),
            Row::new("second").with_cell("Created", "03/03/2021"),
        ],
    )
    .unwrap();
    let vis = FilterSet::new()
        .date_range("Created", NaiveDate::from_ymd_opt(2021, 3, 2), None)
        .visible_rows(&data);
    assert_eq!(ids(vis.visible_ids()), vec!["second"]);
}

#[test]
fn end_bound_covers_the_whole_day() {
    let vis = FilterSet::new()
        .date_range(schema::SIGNED, None, NaiveDate::from_ymd_opt(2021, 3, 5))
        .visible_rows(&claims());
    // 102 is pending and 103 is blank: both excluded while the range is active.
    assert_eq!(ids(vis.visible_ids()), vec!["101"]);
}

#[test]
fn basis_deviation_hides_boilerplate_and_whitespace_variants() {
    let panel = ClaimsFilterPanel {
        basis_deviation: true,
        ..Default::default()
    };
    let vis = FilterSet::from(panel.criteria()).visible_rows(&claims());
    assert_eq!(ids(vis.visible_ids()), vec!["102"]);
}

#[test]
fn injury_deviation_ignores_case_but_not_edits() {
    let panel = ClaimsFilterPanel {
        injury_deviation: true,
        ..Default::default()
    };
    let vis = FilterSet::from(panel.criteria()).visible_rows(&claims());
    assert_eq!(ids(vis.visible_ids()), vec!["103"]);
}

#[test]
fn dropdown_match_is_case_insensitive() {
    let panel = ClaimsFilterPanel {
        state: "PA".into(),
        ..Default::default()
    };
    let vis = FilterSet::from(panel.criteria()).visible_rows(&claims());
    assert_eq!(ids(vis.visible_ids()), vec!["102"]);
}

#[test]
fn panel_and_selector_combine() {
    let mut session = TableSession::new(claims());
    session.panel_mut().state = "oh".into();
    session.apply_filters();
    assert_eq!(ids(&session.visible_in_order()), vec!["101", "103"]);

    session.change_selector(Selector::SignatureStatus, "pending");
    assert_eq!(ids(&session.visible_in_order()), vec!["103"]);
}

// ============================================================================
// Selector synchronization
// ============================================================================

#[test]
fn pending_selector_scenario() {
    let data = claims();
    let mut pair = SyncedSelectors::default();
    let update = pair.on_change(Selector::SignatureStatus, "Pending");
    assert_eq!(update.paired, Selector::SignedDateStatus);
    assert_eq!(update.paired_value, "pending_signature_via_date_col");

    let criterion = pair.criterion(schema::SIGNATURE).unwrap();
    assert_eq!(
        criterion,
        FilterCriterion::status(schema::SIGNATURE, StatusFilter::Pending)
    );
    let vis = visible_rows(&data, &[criterion]);
    assert_eq!(ids(vis.visible_ids()), vec!["102", "103"]);
}

// ============================================================================
// Sorting
// ============================================================================

#[test]
fn sorting_does_not_change_visibility() {
    let data = claims();
    let vis = FilterSet::new()
        .exact(schema::STATE, "oh")
        .visible_rows(&data);
    let sorted = sort_visible(
        &data,
        vis.visible_ids(),
        &SortRequest::descending(schema::TOTAL_CLAIM_AMOUNT),
    );
    assert_eq!(ids(&sorted), vec!["101", "103"]);
    let mut a = ids(&sorted);
    let mut b = ids(vis.visible_ids());
    a.sort();
    b.sort();
    assert_eq!(a, b);
}

#[test]
fn created_dates_sort_chronologically() {
    let data = claims();
    let all: Vec<RowId> = data.ids().cloned().collect();
    let sorted = sort_visible(&data, &all, &SortRequest::ascending(schema::CREATED));
    assert_eq!(ids(&sorted), vec!["103", "101", "102"]);
}

#[test]
fn signed_dates_put_pending_last() {
    let data = claims();
    let all: Vec<RowId> = data.ids().cloned().collect();
    let sorted = sort_visible(&data, &all, &SortRequest::ascending(schema::SIGNED));
    // "" < "pending" when neither parses.
    assert_eq!(ids(&sorted), vec!["101", "103", "102"]);
}

#[test]
fn currency_nulls_sort_first() {
    let data = claims();
    let all: Vec<RowId> = data.ids().cloned().collect();
    let sorted = sort_visible(
        &data,
        &all,
        &SortRequest::ascending(schema::TOTAL_CLAIM_AMOUNT),
    );
    assert_eq!(ids(&sorted), vec!["102", "103", "101"]);
}

#[test]
fn session_header_clicks_toggle() {
    let mut session = TableSession::new(claims());
    let first = session.request_sort(schema::CLAIMANT_NAME);
    let second = session.request_sort(schema::CLAIMANT_NAME);
    let mut reversed = first.clone();
    reversed.reverse();
    assert_eq!(second, reversed);
}
