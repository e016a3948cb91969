//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod app;
mod edit;
mod flow;
mod grid;
mod import;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::AppModel;

#[cfg(debug_assertions)]
use crate::tracing::SheetSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use app::update_app;
pub use edit::update_edit;
pub use flow::update_flow;
pub use grid::update_grid;
pub use import::{apply_flow_snapshot, apply_texts, update_import};

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Import(m) => import::update_import(model, m),
        Msg::Edit(m) => edit::update_edit(model, m),
        Msg::Grid(m) => grid::update_grid(model, m),
        Msg::Flow(m) => flow::update_flow(model, m),
        Msg::App(m) => app::update_app(model, m),
    }
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after sheet state and logs diffs for debugging.
#[cfg(debug_assertions)]
fn update_traced(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    let msg_name = msg_type_name(&msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();

    let before = SheetSnapshot::from_sheet(&model.sheet);
    debug!(target: "message", msg = %msg_name, "processing");

    let result = update_inner(model, msg);

    let after = SheetSnapshot::from_sheet(&model.sheet);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "sheet", %diff, "state changed");
    }

    result
}

/// Get a display name for a message type
///
/// File contents are summarized by length so large loads don't flood the log.
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    use crate::messages::{AppMsg, ImportMsg};

    match msg {
        Msg::Import(ImportMsg::Parsed(text)) => format!("Import::Parsed({} bytes)", text.len()),
        Msg::Import(m) => format!("Import::{:?}", m),
        Msg::Edit(m) => format!("Edit::{:?}", m),
        Msg::Grid(m) => format!("Grid::{:?}", m),
        Msg::Flow(m) => format!("Flow::{:?}", m),
        Msg::App(AppMsg::FileLoaded {
            path,
            purpose,
            result,
        }) => format!(
            "App::FileLoaded({}, {:?}, {})",
            path.display(),
            purpose,
            if result.is_ok() { "ok" } else { "err" }
        ),
        Msg::App(m) => format!("App::{:?}", m),
    }
}
