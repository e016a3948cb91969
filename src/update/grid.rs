//! Selection and scrolling message handlers

use crate::commands::Cmd;
use crate::messages::GridMsg;
use crate::model::{AppModel, TransientMessage};

/// Handle grid navigation messages
pub fn update_grid(model: &mut AppModel, msg: GridMsg) -> Option<Cmd> {
    let sheet = &mut model.sheet;
    match msg {
        GridMsg::Scroll { scroll_top } => sheet.set_scroll_top(scroll_top),
        GridMsg::Resize { viewport_height } => sheet.set_viewport_height(viewport_height),
        GridMsg::Move(direction) => {
            let (rows, cols) = direction.delta();
            sheet.move_selection(rows, cols);
        }
        GridMsg::PageUp => sheet.page_up(),
        GridMsg::PageDown => sheet.page_down(),
        GridMsg::First => sheet.move_to_first_row(),
        GridMsg::Last => sheet.move_to_last_row(),
        GridMsg::Select { row, column } => sheet.select(row, column),
        GridMsg::FindNext(query) => {
            let status = match sheet.find_next(&query) {
                Some(row) => TransientMessage::info(format!("Found at row {}", row + 1)),
                None => TransientMessage::warning(format!("Not found: '{}'", query)),
            };
            model.set_status(status);
        }
        GridMsg::Filter { column, text } => {
            if sheet.set_filter(column, &text) {
                let status = filter_status(sheet.row_count(), sheet.total_row_count());
                model.set_status(status);
            }
        }
        GridMsg::ClearFilters => {
            if sheet.clear_filters() {
                model.set_status(TransientMessage::info("Filters cleared"));
            }
        }
    }
    Some(Cmd::Redraw)
}

fn filter_status(shown: usize, total: usize) -> TransientMessage {
    if shown == 0 && total > 0 {
        TransientMessage::warning(format!("No rows match the filters ({} hidden)", total))
    } else {
        TransientMessage::info(format!("Showing {} of {} rows", shown, total))
    }
}
