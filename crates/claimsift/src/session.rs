//! Host-facing table session.
//!
//! A [`TableSession`] holds everything one admin table needs between events:
//! the dataset, the filter controls, the paired status selectors, the sort
//! memory, the last visibility decision and the presentation order. Every
//! method runs to completion synchronously, so a caller never observes a
//! half-updated state.

use tracing::debug;

use crate::criterion::FilterCriterion;
use crate::filter::{FilterSet, Visibility};
use crate::ordering::{sort_visible, SortRequest, SortState};
use crate::panel::ClaimsFilterPanel;
use crate::schema;
use crate::selector::{Selector, SelectorUpdate, StatusFilter, SyncedSelectors};
use crate::table::{Dataset, RowId};

/// Filter, selector and sort state for one table.
#[derive(Debug, Clone)]
pub struct TableSession {
    dataset: Dataset,
    panel: ClaimsFilterPanel,
    extra: Vec<FilterCriterion>,
    selectors: SyncedSelectors,
    status_column: String,
    sort: SortState,
    visibility: Visibility,
    order: Vec<RowId>,
}

impl TableSession {
    /// Starts a session with every row visible in dataset order.
    pub fn new(dataset: Dataset) -> Self {
        let visibility = Visibility::all(&dataset);
        let order = dataset.ids().cloned().collect();
        TableSession {
            dataset,
            panel: ClaimsFilterPanel::default(),
            extra: Vec::new(),
            selectors: SyncedSelectors::default(),
            status_column: schema::SIGNATURE.to_string(),
            sort: SortState::default(),
            visibility,
            order,
        }
    }

    /// Uses `column` for the selectors' status criterion instead of "Signature".
    pub fn with_status_column(mut self, column: impl Into<String>) -> Self {
        self.status_column = column.into();
        self
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn panel(&self) -> &ClaimsFilterPanel {
        &self.panel
    }

    /// Mutable access to the filter controls. Call
    /// [`apply_filters`](Self::apply_filters) afterwards.
    pub fn panel_mut(&mut self) -> &mut ClaimsFilterPanel {
        &mut self.panel
    }

    /// Replaces the filter controls.
    pub fn set_panel(&mut self, panel: ClaimsFilterPanel) {
        self.panel = panel;
    }

    /// Criteria applied in addition to the panel's.
    pub fn set_extra_criteria(&mut self, criteria: Vec<FilterCriterion>) {
        self.extra = criteria;
    }

    pub fn selectors(&self) -> &SyncedSelectors {
        &self.selectors
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    pub fn visibility(&self) -> &Visibility {
        &self.visibility
    }

    /// Every row id in presentation order, hidden rows included.
    pub fn order(&self) -> &[RowId] {
        &self.order
    }

    /// The criteria the next filter pass will apply.
    pub fn filter_set(&self) -> FilterSet {
        let mut set: FilterSet = self.panel.criteria().into_iter().collect();
        set.extend(self.extra.iter().cloned());
        set.extend(self.selectors.criterion(&self.status_column));
        set
    }

    /// Recomputes visibility. Presentation order is left as is.
    pub fn apply_filters(&mut self) -> &Visibility {
        self.visibility = self.filter_set().visible_rows(&self.dataset);
        &self.visibility
    }

    /// Handles a change event from one of the paired selectors, rewrites the
    /// other one, then re-filters.
    pub fn change_selector(&mut self, selector: Selector, value: &str) -> SelectorUpdate {
        let update = self.selectors.on_change(selector, value);
        self.apply_filters();
        update
    }

    /// Typed variant of [`change_selector`](Self::change_selector).
    pub fn set_status(&mut self, selector: Selector, status: StatusFilter) -> SelectorUpdate {
        let update = self.selectors.set(selector, status);
        self.apply_filters();
        update
    }

    /// Handles a click on `column`'s header.
    ///
    /// The visible rows are sorted from their current presentation order and
    /// placed after the hidden rows. Returns the visible rows in their new
    /// order.
    pub fn request_sort(&mut self, column: &str) -> Vec<RowId> {
        let request = self.sort.request(column);
        self.sort_with(&request)
    }

    /// Sorts with an explicit request, bypassing the remembered directions.
    pub fn sort_with(&mut self, request: &SortRequest) -> Vec<RowId> {
        let visible = self.visible_in_order();
        if visible.is_empty() {
            return visible;
        }
        let sorted = sort_visible(&self.dataset, &visible, request);

        let mut order: Vec<RowId> = self
            .order
            .iter()
            .filter(|id| !self.visibility.is_visible(id))
            .cloned()
            .collect();
        order.extend(sorted.iter().cloned());
        self.order = order;

        debug!(
            column = %request.column,
            direction = %request.direction,
            "presentation order updated"
        );
        sorted
    }

    /// Visible row ids in presentation order.
    pub fn visible_in_order(&self) -> Vec<RowId> {
        self.order
            .iter()
            .filter(|id| self.visibility.is_visible(id))
            .cloned()
            .collect()
    }
}
