//! The flow sheet: both record sets plus everything derived from them
//!
//! All mutations go through methods here so the view rows, selection and
//! virtual window are re-derived together after every change.

use std::fmt;
use std::sync::Arc;

use crate::autolink::{auto_link, Confirmation};
use crate::grid::{
    build_view_rows, ColumnFilters, GridMetrics, RowBacking, ScrollState, ViewRow, VirtualWindow,
};
use crate::model::edit::{apply_field, read_field, EditError, EditSession, FlowEdit};
use crate::model::{Column, FlowRecord, TextRecord, TransitionType};

/// Currently highlighted cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub row: usize,
    pub column: Column,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            row: 0,
            column: Column::ToUid,
        }
    }
}

impl Selection {
    pub fn new(row: usize, column: Column) -> Self {
        Self { row, column }
    }
}

/// Structural operations that were refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// A destructive operation was requested without confirmation
    Unconfirmed,
    /// The row index is outside the view
    RowOutOfRange(usize),
}

impl fmt::Display for FlowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowError::Unconfirmed => write!(f, "operation needs explicit confirmation"),
            FlowError::RowOutOfRange(row) => write!(f, "row {} is outside the grid", row + 1),
        }
    }
}

impl std::error::Error for FlowError {}

/// Text records, flow records and the derived grid
#[derive(Debug, Clone, Default)]
pub struct FlowSheet {
    pub(crate) texts: Vec<Arc<TextRecord>>,
    pub(crate) flows: Vec<FlowRecord>,
    pub(crate) rows: Vec<ViewRow>,
    /// Joined rows before filtering
    total_rows: usize,
    filters: ColumnFilters,
    pub(crate) editing: Option<EditSession>,
    pub(crate) window: VirtualWindow,
    pub selection: Selection,
    pub scroll: ScrollState,
    pub metrics: GridMetrics,
    /// Bumped on every change to either record set
    revision: u64,
}

impl FlowSheet {
    pub fn new(metrics: GridMetrics) -> Self {
        Self {
            metrics,
            ..Self::default()
        }
    }

    /// Build a sheet from existing records
    pub fn with_records(
        texts: Vec<TextRecord>,
        flows: Vec<FlowRecord>,
        metrics: GridMetrics,
    ) -> Self {
        let mut sheet = Self::new(metrics);
        sheet.texts = texts.into_iter().map(Arc::new).collect();
        sheet.flows = flows;
        sheet.rebuild_view();
        sheet
    }

    // === Accessors ===

    pub fn texts(&self) -> &[Arc<TextRecord>] {
        &self.texts
    }

    pub fn flows(&self) -> &[FlowRecord] {
        &self.flows
    }

    pub fn rows(&self) -> &[ViewRow] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&ViewRow> {
        self.rows.get(index)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Row count with no filters applied
    pub fn total_row_count(&self) -> usize {
        self.total_rows
    }

    pub fn filters(&self) -> &ColumnFilters {
        &self.filters
    }

    /// Rows currently materialized for display
    pub fn visible_rows(&self) -> &[ViewRow] {
        &self.rows[self.window.range()]
    }

    pub fn window(&self) -> VirtualWindow {
        self.window
    }

    pub fn editing(&self) -> Option<&EditSession> {
        self.editing.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    // === Whole-set replacement ===

    /// Replace the text sequence; existing flow records become stale and are dropped
    pub fn replace_texts(&mut self, texts: Vec<TextRecord>) {
        self.cancel_edit();
        self.texts = texts.into_iter().map(Arc::new).collect();
        self.flows.clear();
        self.selection = Selection::default();
        self.scroll.scroll_top = 0.0;
        self.touch();
    }

    /// Replace the flow collection wholesale (snapshot load)
    pub fn replace_flows(&mut self, flows: Vec<FlowRecord>) {
        self.cancel_edit();
        self.flows = flows;
        self.touch();
    }

    fn touch(&mut self) {
        self.revision += 1;
        self.rebuild_view();
    }

    /// Re-derive rows and filter them, then re-clamp selection, scroll and window
    pub fn rebuild_view(&mut self) {
        let rows = build_view_rows(&self.texts, &self.flows);
        self.total_rows = rows.len();
        self.rows = self.filters.apply(rows);
        self.selection.row = self.selection.row.min(self.rows.len().saturating_sub(1));
        self.scroll.clamp(self.rows.len(), &self.metrics);
        self.recompute_window();
    }

    pub(crate) fn recompute_window(&mut self) {
        self.window = VirtualWindow::compute(self.rows.len(), &self.metrics, &self.scroll);
    }

    // === Filtering ===

    /// Set or (with blank text) remove the filter on one column
    ///
    /// Row indices shift, so an open edit session is cancelled when the
    /// filter set changes.
    pub fn set_filter(&mut self, column: Column, text: &str) -> bool {
        if !self.filters.set(column, text) {
            return false;
        }
        self.refilter();
        true
    }

    pub fn clear_filters(&mut self) -> bool {
        if !self.filters.clear() {
            return false;
        }
        self.refilter();
        true
    }

    fn refilter(&mut self) {
        self.cancel_edit();
        self.rebuild_view();
        tracing::debug!(
            shown = self.rows.len(),
            total = self.total_rows,
            "column filters changed"
        );
    }

    // === Scrolling ===

    pub fn set_scroll_top(&mut self, scroll_top: f64) {
        self.scroll.scroll_top = scroll_top;
        self.scroll.clamp(self.rows.len(), &self.metrics);
        self.recompute_window();
    }

    pub fn set_viewport_height(&mut self, viewport_height: f64) {
        self.scroll.viewport_height = viewport_height.max(0.0);
        self.scroll.clamp(self.rows.len(), &self.metrics);
        self.recompute_window();
    }

    // === Edit session ===

    /// Open a session on `(row, column)` with the caller's current value
    ///
    /// Returns false (and opens nothing) for read-only columns or rows
    /// outside the grid. An already open session is cancelled first.
    pub fn begin_edit(&mut self, row: usize, column: Column, current_value: &str) -> bool {
        if !column.is_editable() {
            tracing::trace!(row, %column, "ignoring edit on read-only column");
            return false;
        }
        let Some(view_row) = self.rows.get(row) else {
            return false;
        };

        let session = EditSession::new(
            row,
            column,
            view_row.backing,
            view_row.text.uid.clone(),
            current_value,
        );
        if let Some(previous) = self.editing.replace(session) {
            tracing::debug!(
                row = previous.row,
                column = %previous.column,
                "implicitly cancelled open edit"
            );
        }
        self.selection = Selection::new(row, column);
        true
    }

    /// Open a session seeded with the cell's displayed value
    pub fn begin_edit_at(&mut self, row: usize, column: Column) -> bool {
        let value = match self.rows.get(row) {
            Some(view_row) => view_row.cell(column).into_owned(),
            None => return false,
        };
        self.begin_edit(row, column, &value)
    }

    /// Replace the pending value; nothing visible changes
    pub fn update_draft(&mut self, value: impl Into<String>) {
        if let Some(session) = &mut self.editing {
            session.draft = value.into();
        }
    }

    /// Commit the open session into the flow collection
    ///
    /// Placeholder rows insert a new record; existing rows have exactly one
    /// field replaced in place. A draft equal to the stored field closes the
    /// session without a change. An invalid draft leaves the session open.
    pub fn commit(&mut self) -> Result<Option<FlowEdit>, EditError> {
        let session = self.editing.as_ref().ok_or(EditError::NoSession)?;

        let edit = match session.backing {
            RowBacking::Placeholder => {
                let mut flow = FlowRecord::from_source(session.from_uid.clone());
                apply_field(&mut flow, session.column, &session.draft)?;
                self.flows.push(flow);
                FlowEdit {
                    row: session.row,
                    column: session.column,
                    backing: RowBacking::Existing(self.flows.len() - 1),
                    old_value: session.original.clone(),
                    new_value: session.draft.clone(),
                    inserted: true,
                }
            }
            RowBacking::Existing(index) => {
                let Some(flow) = self.flows.get(index) else {
                    self.editing = None;
                    return Err(EditError::StaleRow);
                };
                let mut updated = flow.clone();
                apply_field(&mut updated, session.column, &session.draft)?;
                if updated == *flow {
                    self.editing = None;
                    return Ok(None);
                }
                let old_value = read_field(flow, session.column)
                    .map(|v| v.into_owned())
                    .unwrap_or_default();
                self.flows[index] = updated;
                FlowEdit {
                    row: session.row,
                    column: session.column,
                    backing: session.backing,
                    old_value,
                    new_value: session.draft.clone(),
                    inserted: false,
                }
            }
        };

        self.editing = None;
        tracing::debug!(
            row = edit.row,
            column = %edit.column,
            inserted = edit.inserted,
            "committed flow edit"
        );
        self.touch();
        Ok(Some(edit))
    }

    /// Discard the pending value and close the session
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    // === Structural edits ===

    /// Add a sibling flow record for the row's line, after its existing siblings
    ///
    /// Returns the view index of the new row, which becomes selected.
    pub fn add_branch(&mut self, row: usize) -> Result<usize, FlowError> {
        let uid = self
            .rows
            .get(row)
            .map(|r| r.text.uid.clone())
            .ok_or(FlowError::RowOutOfRange(row))?;
        self.cancel_edit();

        let siblings: Vec<usize> = self
            .flows
            .iter()
            .enumerate()
            .filter(|(_, f)| f.from_uid == uid)
            .map(|(i, _)| i)
            .collect();
        let insert_at = siblings.last().map(|i| i + 1).unwrap_or(self.flows.len());

        let flow = FlowRecord {
            transition_type: TransitionType::Select,
            disp_order: siblings.len() as i64,
            ..FlowRecord::from_source(uid.clone())
        };
        self.flows.insert(insert_at, flow);
        self.touch();

        let new_row = self
            .rows
            .iter()
            .position(|r| r.backing == RowBacking::Existing(insert_at))
            .unwrap_or(row);
        tracing::debug!(uid = %uid, flow_index = insert_at, "added branch");
        self.select(new_row, self.selection.column);
        Ok(new_row)
    }

    /// Delete the row's backing flow record; placeholders are left alone
    pub fn remove_flow(&mut self, row: usize) -> Result<Option<FlowRecord>, FlowError> {
        let backing = self
            .rows
            .get(row)
            .map(|r| r.backing)
            .ok_or(FlowError::RowOutOfRange(row))?;
        let Some(index) = backing.flow_index() else {
            return Ok(None);
        };

        self.cancel_edit();
        let removed = self.flows.remove(index);
        tracing::debug!(from_uid = %removed.from_uid, flow_index = index, "removed flow");
        self.touch();
        Ok(Some(removed))
    }

    /// Replace every flow record with a linear NEXT chain
    ///
    /// Destructive: refused unless `confirmation` is `Confirmed`.
    pub fn apply_auto_link(&mut self, confirmation: Confirmation) -> Result<usize, FlowError> {
        if confirmation != Confirmation::Confirmed {
            tracing::warn!("auto-link requested without confirmation");
            return Err(FlowError::Unconfirmed);
        }
        self.cancel_edit();
        let discarded = self.flows.len();
        self.flows = auto_link(&self.texts);
        tracing::info!(
            discarded,
            created = self.flows.len(),
            "auto-linked flow records"
        );
        self.touch();
        Ok(self.flows.len())
    }
}
