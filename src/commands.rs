//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use std::path::PathBuf;

/// What a loaded file is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPurpose {
    /// Delimited text dataset
    Texts,
    /// JSON flow snapshot
    Flows,
}

/// Commands returned by update functions
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Request a redraw of the grid
    Redraw,
    /// Load file asynchronously
    LoadFile { path: PathBuf, purpose: LoadPurpose },
    /// Save file asynchronously
    SaveFile { path: PathBuf, content: String },
}

impl Cmd {
    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            // Completion messages trigger their own redraw
            Cmd::LoadFile { .. } => false,
            Cmd::SaveFile { .. } => false,
        }
    }
}
