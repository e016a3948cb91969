//! Grid column definitions
//!
//! Text columns are read-only projections of the imported line. Flow
//! columns are editable. `TargetPreview` is derived from `to_uid`.

use std::fmt;
use std::str::FromStr;

/// A column of the joined grid; ordering follows display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    Uid,
    Actor,
    Text,
    ToUid,
    TransitionType,
    SelectionLabel,
    ConditionScript,
    OnEnterAction,
    DispOrder,
    TargetPreview,
}

impl Column {
    /// Display order of the grid
    pub const ALL: [Column; 10] = [
        Column::Uid,
        Column::Actor,
        Column::Text,
        Column::ToUid,
        Column::TransitionType,
        Column::SelectionLabel,
        Column::ConditionScript,
        Column::OnEnterAction,
        Column::DispOrder,
        Column::TargetPreview,
    ];

    /// Whether the curator may open an edit session on this column
    pub fn is_editable(self) -> bool {
        matches!(
            self,
            Column::ToUid
                | Column::TransitionType
                | Column::SelectionLabel
                | Column::ConditionScript
                | Column::OnEnterAction
                | Column::DispOrder
        )
    }

    /// Stable identifier, also the export column name for flow fields
    pub fn id(self) -> &'static str {
        match self {
            Column::Uid => "uid",
            Column::Actor => "actor",
            Column::Text => "text",
            Column::ToUid => "to_uid",
            Column::TransitionType => "transition_type",
            Column::SelectionLabel => "selection_label",
            Column::ConditionScript => "condition_script",
            Column::OnEnterAction => "on_enter_action",
            Column::DispOrder => "disp_order",
            Column::TargetPreview => "target_preview",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Column::Uid => "UID",
            Column::Actor => "Actor",
            Column::Text => "Text",
            Column::ToUid => "To",
            Column::TransitionType => "Type",
            Column::SelectionLabel => "Label",
            Column::ConditionScript => "Condition",
            Column::OnEnterAction => "On Enter",
            Column::DispOrder => "Order",
            Column::TargetPreview => "Target Text",
        }
    }

    /// Position in `Column::ALL`
    pub fn index(self) -> usize {
        Column::ALL
            .iter()
            .position(|c| *c == self)
            .unwrap_or_default()
    }

    pub fn from_index(index: usize) -> Option<Column> {
        Column::ALL.get(index).copied()
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Column {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Column::ALL
            .into_iter()
            .find(|c| c.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown column '{}'", wanted))
    }
}
