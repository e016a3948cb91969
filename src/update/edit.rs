//! Edit session message handlers

use crate::commands::Cmd;
use crate::messages::EditMsg;
use crate::model::{AppModel, EditError, FlowEdit, TransientMessage};

/// Handle edit session messages
pub fn update_edit(model: &mut AppModel, msg: EditMsg) -> Option<Cmd> {
    match msg {
        EditMsg::Begin { row, column } => model
            .sheet
            .begin_edit_at(row, column)
            .then_some(Cmd::Redraw),

        EditMsg::BeginWith { row, column, value } => model
            .sheet
            .begin_edit(row, column, &value)
            .then_some(Cmd::Redraw),

        EditMsg::UpdateDraft(value) => {
            if !model.sheet.is_editing() {
                return None;
            }
            model.sheet.update_draft(value);
            Some(Cmd::Redraw)
        }

        EditMsg::Commit => match model.sheet.commit() {
            Ok(Some(edit)) => {
                model.set_status(TransientMessage::info(describe_edit(&edit)));
                Some(Cmd::Redraw)
            }
            Ok(None) => Some(Cmd::Redraw),
            Err(EditError::NoSession) => None,
            Err(e) => {
                tracing::warn!(error = %e, "commit rejected");
                model.set_status(TransientMessage::error(e.to_string()));
                Some(Cmd::Redraw)
            }
        },

        EditMsg::Cancel => {
            if !model.sheet.is_editing() {
                return None;
            }
            model.sheet.cancel_edit();
            Some(Cmd::Redraw)
        }
    }
}

fn describe_edit(edit: &FlowEdit) -> String {
    if edit.inserted {
        format!(
            "Row {}: new flow, {} = '{}'",
            edit.row + 1,
            edit.column.label(),
            edit.new_value
        )
    } else {
        format!(
            "Row {}: {} '{}' → '{}'",
            edit.row + 1,
            edit.column.label(),
            edit.old_value,
            edit.new_value
        )
    }
}
