//! Structural flow edits and output

use crate::commands::Cmd;
use crate::export::{export_sql, FlowSnapshot};
use crate::messages::FlowMsg;
use crate::model::{AppModel, FlowError, TransientMessage};

/// Handle flow collection messages
pub fn update_flow(model: &mut AppModel, msg: FlowMsg) -> Option<Cmd> {
    match msg {
        FlowMsg::AddBranch { row } => {
            let uid = model.sheet.row(row).map(|r| r.text.uid.clone());
            match model.sheet.add_branch(row) {
                Ok(new_row) => {
                    let siblings = model
                        .sheet
                        .flows()
                        .iter()
                        .filter(|f| Some(&f.from_uid) == uid.as_ref())
                        .count();
                    // A line's first record is a plain flow, not yet a branch
                    let what = if siblings > 1 { "branch" } else { "flow" };
                    model.set_status(TransientMessage::info(format!(
                        "Added {} at row {}",
                        what,
                        new_row + 1
                    )));
                }
                Err(e) => report(model, e),
            }
            Some(Cmd::Redraw)
        }

        FlowMsg::Remove { row } => {
            match model.sheet.remove_flow(row) {
                Ok(Some(flow)) => {
                    model.set_status(TransientMessage::info(format!(
                        "Removed flow {} → {}",
                        flow.from_uid, flow.to_uid
                    )));
                }
                Ok(None) => {
                    model.set_status(TransientMessage::info("Row has no flow to remove"));
                }
                Err(e) => report(model, e),
            }
            Some(Cmd::Redraw)
        }

        FlowMsg::AutoLink(confirmation) => {
            match model.sheet.apply_auto_link(confirmation) {
                Ok(created) => {
                    model.set_status(TransientMessage::info(format!(
                        "Auto-linked {} transitions",
                        created
                    )));
                }
                Err(FlowError::Unconfirmed) => {
                    model.set_status(TransientMessage::warning(
                        "Auto-link replaces every flow; confirm to continue",
                    ));
                }
                Err(e) => report(model, e),
            }
            Some(Cmd::Redraw)
        }

        FlowMsg::Export { path } => {
            let Some(sql) = export_sql(model.sheet.flows(), &model.config.export) else {
                model.set_status(TransientMessage::warning("Nothing to export"));
                return Some(Cmd::Redraw);
            };
            tracing::debug!(
                flows = model.sheet.flows().len(),
                path = %path.display(),
                "exporting flows"
            );
            Some(Cmd::SaveFile { path, content: sql })
        }

        FlowMsg::SaveFlows { path } => {
            match FlowSnapshot::new(model.sheet.flows().to_vec()).to_json() {
                Ok(content) => {
                    model.flows_path = Some(path.clone());
                    Some(Cmd::SaveFile { path, content })
                }
                Err(e) => {
                    tracing::error!(error = %e, "flow snapshot serialization failed");
                    model.set_status(TransientMessage::error(e));
                    Some(Cmd::Redraw)
                }
            }
        }
    }
}

fn report(model: &mut AppModel, error: FlowError) {
    tracing::warn!(%error, "flow operation refused");
    model.set_status(TransientMessage::warning(error.to_string()));
}
