//! Edit session state for a single grid cell
//!
//! A session lives between `begin_edit` and `commit`/`cancel`. It holds the
//! pending draft and remembers whether the row was a placeholder, which
//! decides between inserting and updating a flow record on commit.

use std::borrow::Cow;
use std::fmt;

use crate::grid::RowBacking;
use crate::model::{Column, FlowRecord, TransitionType};

/// State for editing a single cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    /// View row being edited
    pub row: usize,
    pub column: Column,
    /// Backing identity captured when the session opened
    pub backing: RowBacking,
    /// Source line uid, used as `from_uid` when inserting
    pub from_uid: String,
    /// Uncommitted value
    pub draft: String,
    /// Value the session was opened with (may differ from the stored field)
    pub original: String,
}

impl EditSession {
    pub fn new(
        row: usize,
        column: Column,
        backing: RowBacking,
        from_uid: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let value = value.into();
        Self {
            row,
            column,
            backing,
            from_uid: from_uid.into(),
            draft: value.clone(),
            original: value,
        }
    }
}

/// A committed cell change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowEdit {
    pub row: usize,
    pub column: Column,
    /// Backing of the changed record after the commit
    pub backing: RowBacking,
    pub old_value: String,
    pub new_value: String,
    /// True when the commit materialized a placeholder into a new record
    pub inserted: bool,
}

/// Why a commit did not apply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// No session is open
    NoSession,
    /// The draft cannot be stored in the target field
    InvalidValue { column: Column, message: String },
    /// The backing record disappeared while the session was open
    StaleRow,
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditError::NoSession => write!(f, "no cell is being edited"),
            EditError::InvalidValue { column, message } => {
                write!(f, "invalid value for {}: {}", column.label(), message)
            }
            EditError::StaleRow => write!(f, "the edited row no longer exists"),
        }
    }
}

impl std::error::Error for EditError {}

/// Stored value of the flow field named by `column`
///
/// `None` for columns that are not flow fields.
pub fn read_field(flow: &FlowRecord, column: Column) -> Option<Cow<'_, str>> {
    let value = match column {
        Column::ToUid => Cow::Borrowed(flow.to_uid.as_str()),
        Column::TransitionType => Cow::Borrowed(flow.transition_type.as_str()),
        Column::SelectionLabel => Cow::Borrowed(flow.selection_label.as_str()),
        Column::ConditionScript => Cow::Borrowed(flow.condition_script.as_str()),
        Column::OnEnterAction => Cow::Borrowed(flow.on_enter_action.as_str()),
        Column::DispOrder => Cow::Owned(flow.disp_order.to_string()),
        Column::Uid | Column::Actor | Column::Text | Column::TargetPreview => return None,
    };
    Some(value)
}

/// Store `value` into the flow field named by `column`
///
/// Read-only columns are left untouched and reported as invalid.
pub fn apply_field(flow: &mut FlowRecord, column: Column, value: &str) -> Result<(), EditError> {
    match column {
        Column::ToUid => flow.to_uid = value.to_string(),
        Column::SelectionLabel => flow.selection_label = value.to_string(),
        Column::ConditionScript => flow.condition_script = value.to_string(),
        Column::OnEnterAction => flow.on_enter_action = value.to_string(),
        Column::TransitionType => {
            flow.transition_type =
                value
                    .parse::<TransitionType>()
                    .map_err(|e| EditError::InvalidValue {
                        column,
                        message: e.to_string(),
                    })?;
        }
        Column::DispOrder => {
            let trimmed = value.trim();
            flow.disp_order = if trimmed.is_empty() {
                0
            } else {
                trimmed.parse::<i64>().map_err(|_| EditError::InvalidValue {
                    column,
                    message: format!("'{}' is not an integer", trimmed),
                })?
            };
        }
        Column::Uid | Column::Actor | Column::Text | Column::TargetPreview => {
            return Err(EditError::InvalidValue {
                column,
                message: "column is read-only".to_string(),
            });
        }
    }
    Ok(())
}
