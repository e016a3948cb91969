//! flowgrid - Elm-style scenario flow editor
//!
//! Joins imported dialogue lines with editable flow records in a single
//! virtualized grid, and exports the flow relation as SQL.

pub mod autolink;
pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod export;
pub mod grid;
pub mod import;
pub mod lint;
pub mod messages;
pub mod model;
pub mod runtime;
pub mod tracing;
pub mod update;
pub mod util;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::FlowConfig;
pub use messages::Msg;
pub use model::{AppModel, FlowSheet};
pub use runtime::Runtime;
