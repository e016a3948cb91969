//! Reference checks over the flow relation
//!
//! Read-only. Reports records that the grid cannot show (orphans) and
//! transitions that point nowhere.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::model::{FlowRecord, TextRecord, TransitionType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintKind {
    /// `from_uid` matches no text record; invisible in the grid, still exported
    OrphanFlow,
    /// `to_uid` is set but matches no text record
    DanglingTarget,
    /// `to_uid` is empty on a transition that needs a target
    MissingTarget,
    /// SELECT without a label to show the player
    UnlabelledSelect,
}

/// One finding, tied to a flow collection index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintIssue {
    pub flow_index: usize,
    pub kind: LintKind,
    pub from_uid: String,
    pub to_uid: String,
}

impl fmt::Display for LintIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            LintKind::OrphanFlow => format!("source '{}' is not an imported line", self.from_uid),
            LintKind::DanglingTarget => format!("target '{}' does not exist", self.to_uid),
            LintKind::MissingTarget => "no target set".to_string(),
            LintKind::UnlabelledSelect => "SELECT has no label".to_string(),
        };
        write!(f, "flow #{} ({}): {}", self.flow_index + 1, self.from_uid, what)
    }
}

/// Check every flow record, in collection order
pub fn check(texts: &[Arc<TextRecord>], flows: &[FlowRecord]) -> Vec<LintIssue> {
    let known: HashSet<&str> = texts.iter().map(|t| t.uid.as_str()).collect();
    let mut issues = Vec::new();

    for (flow_index, flow) in flows.iter().enumerate() {
        let mut report = |kind| {
            issues.push(LintIssue {
                flow_index,
                kind,
                from_uid: flow.from_uid.clone(),
                to_uid: flow.to_uid.clone(),
            })
        };

        if !known.contains(flow.from_uid.as_str()) {
            report(LintKind::OrphanFlow);
        }
        if flow.to_uid.is_empty() {
            if flow.transition_type != TransitionType::End {
                report(LintKind::MissingTarget);
            }
        } else if !known.contains(flow.to_uid.as_str()) {
            report(LintKind::DanglingTarget);
        }
        if flow.transition_type == TransitionType::Select && flow.selection_label.trim().is_empty()
        {
            report(LintKind::UnlabelledSelect);
        }
    }

    issues
}
