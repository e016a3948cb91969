//! Plain-text rendering of the materialized grid window
//!
//! Renders:
//! - Row number gutter with branch / placeholder markers
//! - Column header
//! - Only the rows inside the current virtual window

use crate::grid::ViewRow;
use crate::model::{Column, FlowSheet};
use crate::util::text::{display_width, truncate_text};

const MIN_WIDTH: usize = 4;
const MAX_WIDTH: usize = 40;

/// Marker shown in the gutter for a row
pub fn row_marker(row: &ViewRow) -> String {
    if row.is_placeholder() {
        "·".to_string()
    } else if row.is_branch {
        format!("⑂{}", row.branch_index)
    } else {
        String::new()
    }
}

/// Calculate column widths from the rows that will actually be drawn
pub fn calculate_column_widths(columns: &[Column], rows: &[ViewRow]) -> Vec<usize> {
    columns
        .iter()
        .map(|&column| {
            rows.iter()
                .map(|row| display_width(&single_line(&row.cell(column))))
                .chain(std::iter::once(display_width(column.label())))
                .max()
                .unwrap_or(MIN_WIDTH)
                .clamp(MIN_WIDTH, MAX_WIDTH)
        })
        .collect()
}

fn single_line(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}

fn pad(value: &str, width: usize) -> String {
    let text = truncate_text(&single_line(value), width);
    let fill = width.saturating_sub(display_width(&text));
    format!("{}{}", text, " ".repeat(fill))
}

/// Render the current window of `sheet` as aligned text lines
///
/// The selected row is prefixed with `>`; the cell being edited shows its
/// draft in brackets.
pub fn render_window(sheet: &FlowSheet, columns: &[Column]) -> Vec<String> {
    let window = sheet.window();
    let rows = sheet.visible_rows();
    let widths = calculate_column_widths(columns, rows);
    let gutter = sheet.row_count().max(1).to_string().len() + 4;

    let mut lines = Vec::with_capacity(rows.len() + 2);

    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(column, width)| pad(column.label(), *width))
        .collect();
    lines.push(format!("{}│ {}", " ".repeat(gutter), header.join(" │ ")));
    lines.push(format!(
        "{}┼{}",
        "─".repeat(gutter),
        widths
            .iter()
            .map(|w| "─".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("┼")
    ));

    for (offset, row) in rows.iter().enumerate() {
        let index = window.start + offset;
        let cursor = if index == sheet.selection.row { '>' } else { ' ' };
        let label = format!("{}{} {}", cursor, index + 1, row_marker(row));

        let cells: Vec<String> = columns
            .iter()
            .zip(&widths)
            .map(|(&column, &width)| match sheet.editing() {
                Some(edit) if edit.row == index && edit.column == column => {
                    pad(&format!("[{}]", edit.draft), width)
                }
                _ => pad(&row.cell(column), width),
            })
            .collect();

        lines.push(format!("{}│ {}", pad(&label, gutter), cells.join(" │ ")));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridMetrics;
    use crate::model::{FlowRecord, TextRecord};

    fn sheet() -> FlowSheet {
        let texts = vec![
            TextRecord::new("A1", "Alice", "Hello, world"),
            TextRecord::new("A2", "Bob", "Hi"),
        ];
        let flows = vec![FlowRecord::next("A1", "A2"), FlowRecord::next("A1", "")];
        let mut sheet = FlowSheet::with_records(texts, flows, GridMetrics::default());
        sheet.set_viewport_height(500.0);
        sheet
    }

    #[test]
    fn test_render_has_header_and_window_rows() {
        let sheet = sheet();
        let lines = render_window(&sheet, &[Column::Uid, Column::ToUid]);
        assert_eq!(lines.len(), 2 + 3);
        assert!(lines[0].contains("UID"));
        assert!(lines[2].starts_with(">1 ⑂0"));
        assert!(lines[4].contains("·"));
    }

    #[test]
    fn test_render_shows_draft() {
        let mut sheet = sheet();
        sheet.begin_edit(2, Column::ToUid, "");
        sheet.update_draft("A1");
        let lines = render_window(&sheet, &[Column::ToUid]);
        assert!(lines[4].contains("[A1]"));
    }

    #[test]
    fn test_column_widths_clamped() {
        let sheet = sheet();
        let widths = calculate_column_widths(&[Column::Uid, Column::Text], sheet.rows());
        assert_eq!(widths, vec![MIN_WIDTH, "Hello, world".len()]);
    }
}
