//! Selection movement and search over the grid
//!
//! Handles arrow movement, paging, first/last row, and wrap-around find.

use crate::model::{Column, FlowSheet, Selection};

impl FlowSheet {
    /// Move selection by delta (handles bounds)
    pub fn move_selection(&mut self, delta_row: i32, delta_col: i32) {
        if self.rows.is_empty() {
            return;
        }
        let max_row = self.rows.len() - 1;
        let max_col = Column::ALL.len() - 1;

        let new_row = (self.selection.row as i64 + delta_row as i64).clamp(0, max_row as i64);
        let new_col =
            (self.selection.column.index() as i64 + delta_col as i64).clamp(0, max_col as i64);

        self.selection = Selection::new(
            new_row as usize,
            Column::from_index(new_col as usize).unwrap_or(self.selection.column),
        );
        self.ensure_selection_visible();
    }

    /// Select a specific cell (clamped) and scroll it into view
    pub fn select(&mut self, row: usize, column: Column) {
        self.selection = Selection::new(row.min(self.rows.len().saturating_sub(1)), column);
        self.ensure_selection_visible();
    }

    /// Move to first row (Cmd+Home)
    pub fn move_to_first_row(&mut self) {
        self.select(0, self.selection.column);
    }

    /// Move to last row (Cmd+End)
    pub fn move_to_last_row(&mut self) {
        self.select(self.rows.len().saturating_sub(1), self.selection.column);
    }

    /// Page up by the number of fully visible rows
    pub fn page_up(&mut self) {
        let page = self.metrics.rows_per_page(self.scroll.viewport_height);
        self.select(self.selection.row.saturating_sub(page), self.selection.column);
    }

    /// Page down by the number of fully visible rows
    pub fn page_down(&mut self) {
        let page = self.metrics.rows_per_page(self.scroll.viewport_height);
        self.select(self.selection.row.saturating_add(page), self.selection.column);
    }

    /// Scroll so the selected row is inside the viewport
    pub fn ensure_selection_visible(&mut self) {
        self.scroll
            .ensure_row_visible(self.selection.row, self.rows.len(), &self.metrics);
        self.recompute_window();
    }

    /// Case-insensitive search across every cell, starting after the selection
    ///
    /// Wraps around; selects and returns the first matching row.
    pub fn find_next(&mut self, query: &str) -> Option<usize> {
        if query.is_empty() || self.rows.is_empty() {
            return None;
        }
        let needle = query.to_lowercase();
        let count = self.rows.len();
        let start = (self.selection.row + 1) % count;

        let found = (0..count).map(|i| (start + i) % count).find(|&row| {
            Column::ALL.iter().any(|&column| {
                self.rows[row]
                    .cell(column)
                    .to_lowercase()
                    .contains(&needle)
            })
        })?;

        self.select(found, self.selection.column);
        Some(found)
    }
}

#[cfg(test)]
mod tests {
    use crate::grid::GridMetrics;
    use crate::model::{Column, FlowRecord, FlowSheet, TextRecord};

    fn make_sheet(rows: usize) -> FlowSheet {
        let texts = (0..rows)
            .map(|i| TextRecord::new(format!("L{}", i), "Narrator", format!("line number {}", i)))
            .collect();
        let metrics = GridMetrics {
            row_height: 10.0,
            header_height: 10.0,
            overscan: 0,
        };
        let mut sheet = FlowSheet::with_records(texts, vec![], metrics);
        sheet.set_viewport_height(110.0);
        sheet
    }

    #[test]
    fn test_move_selection_down_and_right() {
        let mut sheet = make_sheet(5);
        sheet.move_selection(1, 1);
        assert_eq!(sheet.selection.row, 1);
        assert_eq!(sheet.selection.column, Column::TransitionType);
    }

    #[test]
    fn test_move_selection_clamped() {
        let mut sheet = make_sheet(5);
        sheet.move_selection(-10, -20);
        assert_eq!(sheet.selection.row, 0);
        assert_eq!(sheet.selection.column, Column::Uid);

        sheet.move_selection(100, 100);
        assert_eq!(sheet.selection.row, 4);
        assert_eq!(sheet.selection.column, Column::TargetPreview);
    }

    #[test]
    fn test_page_navigation_scrolls() {
        let mut sheet = make_sheet(100);
        sheet.page_down();
        assert_eq!(sheet.selection.row, 10);
        assert!(sheet.window().contains(10));

        sheet.move_to_last_row();
        assert_eq!(sheet.selection.row, 99);
        assert!(sheet.window().contains(99));

        sheet.page_up();
        assert_eq!(sheet.selection.row, 89);

        sheet.move_to_first_row();
        assert_eq!(sheet.selection.row, 0);
        assert_eq!(sheet.scroll.scroll_top, 0.0);
    }

    #[test]
    fn test_find_next_wraps() {
        let mut sheet = make_sheet(5);
        sheet.select(3, Column::ToUid);
        assert_eq!(sheet.find_next("LINE NUMBER 1"), Some(1));
        assert_eq!(sheet.selection.row, 1);
        assert_eq!(sheet.find_next("nothing like this"), None);
        assert_eq!(sheet.selection.row, 1);
    }

    #[test]
    fn test_find_next_matches_flow_fields() {
        let texts = vec![TextRecord::new("A", "", ""), TextRecord::new("B", "", "")];
        let flows = vec![FlowRecord {
            condition_script: "has_key".to_string(),
            ..FlowRecord::next("B", "A")
        }];
        let mut sheet = FlowSheet::with_records(texts, flows, GridMetrics::default());
        assert_eq!(sheet.find_next("HAS_KEY"), Some(1));
    }

    #[test]
    fn test_navigation_on_empty_sheet() {
        let mut sheet = FlowSheet::new(GridMetrics::default());
        sheet.move_selection(1, 0);
        sheet.page_down();
        assert_eq!(sheet.selection.row, 0);
        assert_eq!(sheet.find_next("x"), None);
    }
}
