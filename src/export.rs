//! Relation export
//!
//! Serializes the flow collection as one batch `INSERT` statement over
//! `(from_uid, to_uid, transition_type, selection_label, condition_script,
//! disp_order, on_enter_action)`, plus a JSON snapshot format for carrying
//! edits between sessions.
//!
//! String values are emitted verbatim by default: an embedded `'` produces
//! an invalid (or injectable) statement. Set `escape_quotes` to double them.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::model::FlowRecord;

/// Column order of the exported relation
pub const EXPORT_COLUMNS: [&str; 7] = [
    "from_uid",
    "to_uid",
    "transition_type",
    "selection_label",
    "condition_script",
    "disp_order",
    "on_enter_action",
];

/// Current snapshot format version
pub const SNAPSHOT_VERSION: u32 = 1;

/// Export settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Target table name
    pub table: String,
    /// Double embedded single quotes in string values
    pub escape_quotes: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            table: "scenario_flow".to_string(),
            escape_quotes: false,
        }
    }
}

fn quoted(value: &str, escape: bool) -> String {
    if escape {
        format!("'{}'", value.replace('\'', "''"))
    } else {
        format!("'{}'", value)
    }
}

/// Value tuple for one record, in `EXPORT_COLUMNS` order
pub fn value_tuple(flow: &FlowRecord, escape: bool) -> String {
    format!(
        "({}, {}, {}, {}, {}, {}, {})",
        quoted(&flow.from_uid, escape),
        quoted(&flow.to_uid, escape),
        quoted(flow.transition_type.as_str(), escape),
        quoted(&flow.selection_label, escape),
        quoted(&flow.condition_script, escape),
        flow.disp_order,
        quoted(&flow.on_enter_action, escape),
    )
}

/// Build the batch insert statement
///
/// Returns `None` for an empty collection rather than a degenerate statement.
pub fn export_sql(flows: &[FlowRecord], config: &ExportConfig) -> Option<String> {
    if flows.is_empty() {
        return None;
    }

    let mut sql = String::new();
    let _ = writeln!(
        sql,
        "INSERT INTO {} ({}) VALUES",
        config.table,
        EXPORT_COLUMNS.join(", ")
    );
    let tuples: Vec<String> = flows
        .iter()
        .map(|flow| value_tuple(flow, config.escape_quotes))
        .collect();
    sql.push_str(&tuples.join(",\n"));
    sql.push_str(";\n");

    Some(sql)
}

/// On-disk flow snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowSnapshot {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub flows: Vec<FlowRecord>,
}

fn default_version() -> u32 {
    SNAPSHOT_VERSION
}

impl FlowSnapshot {
    pub fn new(flows: Vec<FlowRecord>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            flows,
        }
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize flows: {}", e))
    }

    pub fn from_json(content: &str) -> Result<Self, String> {
        let snapshot: FlowSnapshot =
            serde_json::from_str(content).map_err(|e| format!("Invalid flow snapshot: {}", e))?;
        if snapshot.version > SNAPSHOT_VERSION {
            return Err(format!(
                "Flow snapshot version {} is newer than supported version {}",
                snapshot.version, SNAPSHOT_VERSION
            ));
        }
        Ok(snapshot)
    }
}
