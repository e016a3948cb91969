//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use std::path::PathBuf;

use crate::autolink::Confirmation;
use crate::commands::LoadPurpose;
use crate::model::Column;

/// Direction for selection movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Row and column delta for one step
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// Loading text and flow data
#[derive(Debug, Clone)]
pub enum ImportMsg {
    /// Read a delimited text dataset from disk
    Open(PathBuf),
    /// Apply delimited content that is already in memory
    Parsed(String),
    /// Read a JSON flow snapshot from disk
    OpenFlows(PathBuf),
}

/// Cell edit session
#[derive(Debug, Clone)]
pub enum EditMsg {
    /// Open a session seeded with the cell's displayed value
    Begin { row: usize, column: Column },
    /// Open a session with an explicit current value
    BeginWith {
        row: usize,
        column: Column,
        value: String,
    },
    UpdateDraft(String),
    Commit,
    Cancel,
}

/// Selection and scrolling
#[derive(Debug, Clone)]
pub enum GridMsg {
    Scroll { scroll_top: f64 },
    Resize { viewport_height: f64 },
    Move(Direction),
    PageUp,
    PageDown,
    First,
    Last,
    Select { row: usize, column: Column },
    FindNext(String),
    /// Case-insensitive substring filter on one column; blank text removes it
    Filter { column: Column, text: String },
    ClearFilters,
}

/// Structural changes to the flow collection, plus output
#[derive(Debug, Clone)]
pub enum FlowMsg {
    AddBranch { row: usize },
    Remove { row: usize },
    AutoLink(Confirmation),
    /// Write the batch insert statement
    Export { path: PathBuf },
    /// Write a JSON snapshot of the flow collection
    SaveFlows { path: PathBuf },
}

/// Completion of asynchronous work
#[derive(Debug, Clone)]
pub enum AppMsg {
    /// File load completed (async result)
    FileLoaded {
        path: PathBuf,
        purpose: LoadPurpose,
        result: Result<String, String>,
    },
    /// File save completed (async result)
    SaveCompleted(Result<PathBuf, String>),
}

/// Top-level message type
#[derive(Debug, Clone)]
pub enum Msg {
    Import(ImportMsg),
    Edit(EditMsg),
    Grid(GridMsg),
    Flow(FlowMsg),
    App(AppMsg),
}

impl From<ImportMsg> for Msg {
    fn from(msg: ImportMsg) -> Self {
        Msg::Import(msg)
    }
}

impl From<EditMsg> for Msg {
    fn from(msg: EditMsg) -> Self {
        Msg::Edit(msg)
    }
}

impl From<GridMsg> for Msg {
    fn from(msg: GridMsg) -> Self {
        Msg::Grid(msg)
    }
}

impl From<FlowMsg> for Msg {
    fn from(msg: FlowMsg) -> Self {
        Msg::Flow(msg)
    }
}

impl From<AppMsg> for Msg {
    fn from(msg: AppMsg) -> Self {
        Msg::App(msg)
    }
}
