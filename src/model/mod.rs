//! Model layer for the flow editor
//!
//! Contains the records, the flow sheet with its derived grid, the edit
//! session, and `AppModel`, the single container every `update` works on.

pub mod column;
pub mod edit;
pub mod records;
pub mod sheet;
pub mod status;

use std::path::PathBuf;

pub use column::Column;
pub use edit::{apply_field, read_field, EditError, EditSession, FlowEdit};
pub use records::{FlowRecord, TextRecord, TransitionType, UnknownTransition};
pub use sheet::{FlowError, FlowSheet, Selection};
pub use status::{StatusLevel, TransientMessage};

use crate::config::FlowConfig;

/// The complete application model
#[derive(Debug, Clone)]
pub struct AppModel {
    /// Records and derived grid
    pub sheet: FlowSheet,
    /// Settings loaded at startup
    pub config: FlowConfig,
    /// Feedback about the last operation
    pub status: Option<TransientMessage>,
    /// Source of the current text records, if loaded from disk
    pub texts_path: Option<PathBuf>,
    /// Where flow records were last loaded from or saved to
    pub flows_path: Option<PathBuf>,
}

impl AppModel {
    pub fn new(config: FlowConfig) -> Self {
        Self {
            sheet: FlowSheet::new(config.grid),
            config,
            status: None,
            texts_path: None,
            flows_path: None,
        }
    }

    pub fn set_status(&mut self, message: TransientMessage) {
        self.status = Some(message);
    }

    /// Current status text, ignoring expired messages
    pub fn status_text(&self) -> Option<&str> {
        self.status
            .as_ref()
            .filter(|m| !m.is_expired())
            .map(|m| m.text.as_str())
    }

    /// Last status text regardless of expiry
    pub fn last_status(&self) -> Option<&str> {
        self.status.as_ref().map(|m| m.text.as_str())
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new(FlowConfig::default())
    }
}
