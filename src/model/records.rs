//! Record types for the two joined sets
//!
//! `TextRecord`s are the immutable dialogue lines coming out of an import.
//! `FlowRecord`s are the editable transitions hanging off them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One immutable line of dialogue
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextRecord {
    /// Globally unique, stable identity
    pub uid: String,
    pub actor: String,
    pub text: String,
    /// Every other imported column, in header order
    pub extra: Vec<(String, String)>,
}

impl TextRecord {
    pub fn new(uid: impl Into<String>, actor: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            actor: actor.into(),
            text: text.into(),
            extra: Vec::new(),
        }
    }

    /// Look up a passthrough field by its header name
    pub fn extra_field(&self, name: &str) -> Option<&str> {
        self.extra
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// How a flow record leaves its source line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransitionType {
    /// Linear advance to `to_uid`
    #[default]
    Next,
    /// Player choice, labelled by `selection_label`
    Select,
    /// Conditional jump guarded by `condition_script`
    Jump,
    /// Terminates the script
    End,
}

impl TransitionType {
    pub const ALL: [TransitionType; 4] = [
        TransitionType::Next,
        TransitionType::Select,
        TransitionType::Jump,
        TransitionType::End,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TransitionType::Next => "NEXT",
            TransitionType::Select => "SELECT",
            TransitionType::Jump => "JUMP",
            TransitionType::End => "END",
        }
    }
}

impl fmt::Display for TransitionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognised transition name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTransition(pub String);

impl fmt::Display for UnknownTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown transition type '{}' (expected NEXT, SELECT, JUMP or END)",
            self.0
        )
    }
}

impl std::error::Error for UnknownTransition {}

impl FromStr for TransitionType {
    type Err = UnknownTransition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        TransitionType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownTransition(trimmed.to_string()))
    }
}

/// One outgoing transition from a text record
///
/// Every field defaults individually so a snapshot that omits a column
/// still loads with the documented defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowRecord {
    pub from_uid: String,
    /// Target identity, may be empty while the curator fills it in
    pub to_uid: String,
    pub transition_type: TransitionType,
    pub selection_label: String,
    pub condition_script: String,
    pub on_enter_action: String,
    /// Advisory ordering among siblings; never sorted on
    pub disp_order: i64,
}

impl FlowRecord {
    /// A record leaving `from_uid` with every other field at its default
    pub fn from_source(from_uid: impl Into<String>) -> Self {
        Self {
            from_uid: from_uid.into(),
            ..Self::default()
        }
    }

    /// A plain NEXT link between two lines
    pub fn next(from_uid: impl Into<String>, to_uid: impl Into<String>) -> Self {
        Self {
            from_uid: from_uid.into(),
            to_uid: to_uid.into(),
            ..Self::default()
        }
    }
}
