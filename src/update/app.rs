//! Async completion handlers

use crate::commands::{Cmd, LoadPurpose};
use crate::messages::AppMsg;
use crate::model::{AppModel, TransientMessage};

use super::import::{apply_flow_snapshot, apply_texts};

/// Handle app messages
pub fn update_app(model: &mut AppModel, msg: AppMsg) -> Option<Cmd> {
    match msg {
        AppMsg::FileLoaded {
            path,
            purpose,
            result,
        } => match result {
            Ok(content) => match purpose {
                LoadPurpose::Texts => apply_texts(model, &content, Some(&path)),
                LoadPurpose::Flows => apply_flow_snapshot(model, &content, &path),
            },
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "failed to read file");
                model.set_status(TransientMessage::error(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )));
                Some(Cmd::Redraw)
            }
        },

        AppMsg::SaveCompleted(result) => {
            match result {
                Ok(path) => {
                    tracing::info!(path = %path.display(), "saved");
                    model.set_status(TransientMessage::info(format!("Saved: {}", path.display())));
                }
                Err(e) => {
                    tracing::error!(error = %e, "save failed");
                    model.set_status(TransientMessage::error(format!("Error: {}", e)));
                }
            }
            Some(Cmd::Redraw)
        }
    }
}
