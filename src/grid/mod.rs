//! Joined grid over text and flow records
//!
//! The grid is a flat, denormalized projection: one row per flow record,
//! grouped under its source line, with a placeholder row for lines that have
//! no flow yet.
//!
//! ```text
//! FlowSheet
//! ├── texts: Vec<Arc<TextRecord>>   (read-only, replaced on import)
//! ├── flows: Vec<FlowRecord>        (edited in place)
//! └── rows:  Vec<ViewRow>           (re-derived after every mutation)
//!         ├── ColumnFilters narrow the rows
//!         └── VirtualWindow picks the slice to materialize
//! ```

mod filter;
pub mod navigation;
pub mod render;
mod window;

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

use crate::model::{read_field, Column, FlowRecord, TextRecord};
use crate::util::text::{preview, PREVIEW_LIMIT};

pub use filter::ColumnFilters;
pub use window::{GridMetrics, ScrollState, VirtualWindow};

/// What a view row is backed by in the flow collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowBacking {
    /// The line has no flow record yet; editing inserts one
    Placeholder,
    /// Index into the flow collection
    Existing(usize),
}

impl RowBacking {
    /// Legacy numeric identity: the flow index, or `-1` for a placeholder
    pub fn sentinel_id(self) -> i64 {
        match self {
            RowBacking::Placeholder => -1,
            RowBacking::Existing(index) => index as i64,
        }
    }

    pub fn is_placeholder(self) -> bool {
        matches!(self, RowBacking::Placeholder)
    }

    pub fn flow_index(self) -> Option<usize> {
        match self {
            RowBacking::Placeholder => None,
            RowBacking::Existing(index) => Some(index),
        }
    }
}

/// One derived row of the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRow {
    /// Index of the source line in the text sequence
    pub text_index: usize,
    pub text: Arc<TextRecord>,
    pub backing: RowBacking,
    /// Flow values; defaults (with `from_uid` filled in) for a placeholder
    pub flow: FlowRecord,
    /// True when the source line has more than one flow record
    pub is_branch: bool,
    /// Zero-based position among the line's flow records
    pub branch_index: usize,
    /// Preview of the `to_uid` target's text, empty when unresolved
    pub target_preview: String,
}

impl ViewRow {
    /// Display value of a cell
    pub fn cell(&self, column: Column) -> Cow<'_, str> {
        match column {
            Column::Uid => Cow::Borrowed(&self.text.uid),
            Column::Actor => Cow::Borrowed(&self.text.actor),
            Column::Text => Cow::Borrowed(&self.text.text),
            Column::TargetPreview => Cow::Borrowed(&self.target_preview),
            _ => read_field(&self.flow, column).unwrap_or_default(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.backing.is_placeholder()
    }
}

/// Derive the flat row sequence from the two record sets
///
/// Pure and deterministic: rows follow text order, then flow collection
/// order within a line. `disp_order` is not consulted.
pub fn build_view_rows(texts: &[Arc<TextRecord>], flows: &[FlowRecord]) -> Vec<ViewRow> {
    let mut by_source: HashMap<&str, Vec<usize>> = HashMap::new();
    for (index, flow) in flows.iter().enumerate() {
        by_source.entry(flow.from_uid.as_str()).or_default().push(index);
    }

    let by_uid: HashMap<&str, &TextRecord> = texts
        .iter()
        .map(|text| (text.uid.as_str(), text.as_ref()))
        .collect();
    let target_preview = |to_uid: &str| -> String {
        if to_uid.is_empty() {
            return String::new();
        }
        by_uid
            .get(to_uid)
            .map(|target| preview(&target.text, PREVIEW_LIMIT))
            .unwrap_or_default()
    };

    let mut rows = Vec::with_capacity(texts.len().max(flows.len()));
    for (text_index, text) in texts.iter().enumerate() {
        match by_source.get(text.uid.as_str()) {
            Some(indices) if !indices.is_empty() => {
                let is_branch = indices.len() > 1;
                for (branch_index, &flow_index) in indices.iter().enumerate() {
                    let flow = flows[flow_index].clone();
                    rows.push(ViewRow {
                        text_index,
                        text: Arc::clone(text),
                        backing: RowBacking::Existing(flow_index),
                        target_preview: target_preview(&flow.to_uid),
                        flow,
                        is_branch,
                        branch_index,
                    });
                }
            }
            _ => rows.push(ViewRow {
                text_index,
                text: Arc::clone(text),
                backing: RowBacking::Placeholder,
                flow: FlowRecord::from_source(text.uid.clone()),
                is_branch: false,
                branch_index: 0,
                target_preview: String::new(),
            }),
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TransitionType;

    fn texts(uids: &[&str]) -> Vec<Arc<TextRecord>> {
        uids.iter()
            .map(|uid| Arc::new(TextRecord::new(*uid, "Actor", format!("line {}", uid))))
            .collect()
    }

    #[test]
    fn test_placeholder_for_unlinked_line() {
        let rows = build_view_rows(&texts(&["A1"]), &[]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].backing, RowBacking::Placeholder);
        assert_eq!(rows[0].backing.sentinel_id(), -1);
        assert_eq!(rows[0].flow.from_uid, "A1");
        assert_eq!(rows[0].flow.transition_type, TransitionType::Next);
        assert!(!rows[0].is_branch);
    }

    #[test]
    fn test_branch_rows_keep_collection_order() {
        let flows = vec![
            FlowRecord {
                disp_order: 5,
                ..FlowRecord::next("A1", "A3")
            },
            FlowRecord::next("A2", "A3"),
            FlowRecord {
                disp_order: 1,
                ..FlowRecord::next("A1", "A2")
            },
        ];
        let rows = build_view_rows(&texts(&["A1", "A2", "A3"]), &flows);

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].backing, RowBacking::Existing(0));
        assert_eq!(rows[1].backing, RowBacking::Existing(2));
        assert!(rows[0].is_branch && rows[1].is_branch);
        assert_eq!((rows[0].branch_index, rows[1].branch_index), (0, 1));
        assert_eq!(rows[2].backing, RowBacking::Existing(1));
        assert!(!rows[2].is_branch);
        assert!(rows[3].is_placeholder());
    }

    #[test]
    fn test_orphan_flows_are_not_shown() {
        let flows = vec![FlowRecord::next("ZZ", "A1")];
        let rows = build_view_rows(&texts(&["A1"]), &flows);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_placeholder());
    }

    #[test]
    fn test_target_preview_resolves_to_uid() {
        let flows = vec![FlowRecord::next("A1", "A2"), FlowRecord::next("A2", "missing")];
        let rows = build_view_rows(&texts(&["A1", "A2"]), &flows);
        assert_eq!(rows[0].target_preview, "line A2");
        assert_eq!(rows[1].target_preview, "");
        assert_eq!(rows[0].cell(Column::TargetPreview), "line A2");
    }

    #[test]
    fn test_cell_values() {
        let flows = vec![FlowRecord {
            transition_type: TransitionType::Select,
            selection_label: "Go".to_string(),
            disp_order: 3,
            ..FlowRecord::next("A1", "A1")
        }];
        let rows = build_view_rows(&texts(&["A1"]), &flows);
        let row = &rows[0];
        assert_eq!(row.cell(Column::Uid), "A1");
        assert_eq!(row.cell(Column::Actor), "Actor");
        assert_eq!(row.cell(Column::TransitionType), "SELECT");
        assert_eq!(row.cell(Column::SelectionLabel), "Go");
        assert_eq!(row.cell(Column::DispOrder), "3");
    }
}
