//! Per-column row filters
//!
//! Each active filter is a case-insensitive substring; a row is kept only
//! when every filtered column contains its needle. Applied to the joined
//! rows after they are built, so branch and placeholder flags still
//! describe the full line.

use std::collections::BTreeMap;

use crate::grid::ViewRow;
use crate::model::Column;

/// Active column filters, keyed in display order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnFilters {
    /// Lowercased needles
    needles: BTreeMap<Column, String>,
}

impl ColumnFilters {
    /// Set the filter text for `column`; blank text removes the filter
    ///
    /// Returns true when the active filter set changed.
    pub fn set(&mut self, column: Column, text: &str) -> bool {
        if text.is_empty() {
            return self.needles.remove(&column).is_some();
        }
        let needle = text.to_lowercase();
        if self.needles.get(&column) == Some(&needle) {
            return false;
        }
        self.needles.insert(column, needle);
        true
    }

    pub fn clear(&mut self) -> bool {
        let had_any = !self.needles.is_empty();
        self.needles.clear();
        had_any
    }

    pub fn is_empty(&self) -> bool {
        self.needles.is_empty()
    }

    pub fn get(&self, column: Column) -> Option<&str> {
        self.needles.get(&column).map(String::as_str)
    }

    /// True if the row passes every active filter
    pub fn matches(&self, row: &ViewRow) -> bool {
        self.needles
            .iter()
            .all(|(column, needle)| row.cell(*column).to_lowercase().contains(needle.as_str()))
    }

    /// Keep the rows that pass, preserving order
    pub fn apply(&self, rows: Vec<ViewRow>) -> Vec<ViewRow> {
        if self.is_empty() {
            return rows;
        }
        rows.into_iter().filter(|row| self.matches(row)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::build_view_rows;
    use crate::model::{FlowRecord, TextRecord};
    use std::sync::Arc;

    fn rows() -> Vec<ViewRow> {
        let texts: Vec<Arc<TextRecord>> = vec![
            Arc::new(TextRecord::new("A1", "Alice", "Hello there")),
            Arc::new(TextRecord::new("A2", "Bob", "Hello again")),
            Arc::new(TextRecord::new("B1", "alice", "Bye")),
        ];
        build_view_rows(
            &texts,
            &[FlowRecord::next("A1", "A2"), FlowRecord::next("A1", "B1")],
        )
    }

    #[test]
    fn test_case_insensitive_substring() {
        let mut filters = ColumnFilters::default();
        filters.set(Column::Actor, "ALI");
        let uids: Vec<String> = filters
            .apply(rows())
            .iter()
            .map(|r| r.text.uid.clone())
            .collect();
        assert_eq!(uids, vec!["A1", "A1", "B1"]);
    }

    #[test]
    fn test_filters_combine_with_and() {
        let mut filters = ColumnFilters::default();
        filters.set(Column::Actor, "alice");
        filters.set(Column::Text, "hello");
        filters.set(Column::ToUid, "b1");
        let kept = filters.apply(rows());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].flow.to_uid, "B1");
        // Branch flags describe the whole line, not the filtered subset
        assert!(kept[0].is_branch);
        assert_eq!(kept[0].branch_index, 1);
    }

    #[test]
    fn test_blank_text_removes_filter() {
        let mut filters = ColumnFilters::default();
        assert!(filters.set(Column::Uid, "a"));
        assert!(!filters.set(Column::Uid, "A"));
        assert_eq!(filters.get(Column::Uid), Some("a"));
        assert!(filters.set(Column::Uid, ""));
        assert!(filters.is_empty());
        assert_eq!(filters.apply(rows()).len(), 4);
    }

    #[test]
    fn test_no_match_yields_empty() {
        let mut filters = ColumnFilters::default();
        filters.set(Column::Text, "nothing like this");
        assert!(filters.apply(rows()).is_empty());
        assert!(filters.clear());
        assert!(!filters.clear());
    }
}
