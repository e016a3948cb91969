//! Import message handlers

use std::path::Path;

use crate::commands::{Cmd, LoadPurpose};
use crate::export::FlowSnapshot;
use crate::import::import_texts;
use crate::messages::ImportMsg;
use crate::model::{AppModel, TransientMessage};

/// Handle import messages
pub fn update_import(model: &mut AppModel, msg: ImportMsg) -> Option<Cmd> {
    match msg {
        ImportMsg::Open(path) => Some(Cmd::LoadFile {
            path,
            purpose: LoadPurpose::Texts,
        }),
        ImportMsg::Parsed(content) => apply_texts(model, &content, None),
        ImportMsg::OpenFlows(path) => Some(Cmd::LoadFile {
            path,
            purpose: LoadPurpose::Flows,
        }),
    }
}

/// Replace the text records with parsed `content`
///
/// On failure the previous records, flows and edit session are untouched.
pub fn apply_texts(model: &mut AppModel, content: &str, source: Option<&Path>) -> Option<Cmd> {
    let extension = source
        .and_then(|p| p.extension())
        .and_then(|e| e.to_str());

    match import_texts(content, extension, &model.config.import) {
        Ok(records) => {
            let count = records.len();
            let discarded = model.sheet.flows().len();
            model.sheet.replace_texts(records);
            model.texts_path = source.map(Path::to_path_buf);
            model.flows_path = None;

            tracing::info!(count, discarded, "imported text records");
            let origin = source
                .map(|p| format!(" from {}", p.display()))
                .unwrap_or_default();
            model.set_status(TransientMessage::info(format!(
                "Imported {} lines{}",
                count, origin
            )));
        }
        Err(e) => {
            tracing::warn!(error = %e, "import rejected");
            model.set_status(TransientMessage::error(format!("Import failed: {}", e.message)));
        }
    }
    Some(Cmd::Redraw)
}

/// Replace the flow collection from a JSON snapshot
pub fn apply_flow_snapshot(model: &mut AppModel, content: &str, source: &Path) -> Option<Cmd> {
    match FlowSnapshot::from_json(content) {
        Ok(snapshot) => {
            let count = snapshot.flows.len();
            model.sheet.replace_flows(snapshot.flows);
            model.flows_path = Some(source.to_path_buf());
            tracing::info!(count, path = %source.display(), "loaded flow snapshot");
            model.set_status(TransientMessage::info(format!("Loaded {} flows", count)));
        }
        Err(e) => {
            tracing::warn!(error = %e, "flow snapshot rejected");
            model.set_status(TransientMessage::error(e));
        }
    }
    Some(Cmd::Redraw)
}
