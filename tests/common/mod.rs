//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use flowgrid::config::FlowConfig;
use flowgrid::grid::GridMetrics;
use flowgrid::model::{AppModel, FlowRecord, FlowSheet, TextRecord};
use proptest::prelude::*;

/// Text records with the given uids, a speaker, and a line derived from the uid
pub fn texts(uids: &[&str]) -> Vec<TextRecord> {
    uids.iter()
        .map(|uid| TextRecord::new(*uid, "Narrator", format!("line {}", uid)))
        .collect()
}

/// A sheet over `uids` and `flows` with default metrics and a 600px viewport
pub fn test_sheet(uids: &[&str], flows: Vec<FlowRecord>) -> FlowSheet {
    let mut sheet = FlowSheet::with_records(texts(uids), flows, GridMetrics::default());
    sheet.set_viewport_height(600.0);
    sheet
}

/// An application model wrapping `test_sheet`
pub fn test_model(uids: &[&str], flows: Vec<FlowRecord>) -> AppModel {
    let mut model = AppModel::new(FlowConfig::default());
    model.sheet = test_sheet(uids, flows);
    model
}

/// Field values of a flow record, in a fixed order
pub fn flow_fields(flow: &FlowRecord) -> Vec<String> {
    vec![
        flow.from_uid.clone(),
        flow.to_uid.clone(),
        flow.transition_type.to_string(),
        flow.selection_label.clone(),
        flow.condition_script.clone(),
        flow.on_enter_action.clone(),
        flow.disp_order.to_string(),
    ]
}

/// Text uids `L0..Ln` plus flows whose sources and targets may or may not
/// resolve (a few extra uids make orphans and dangling targets)
pub fn arb_records(
    max_texts: usize,
    max_flows: usize,
) -> impl Strategy<Value = (Vec<String>, Vec<FlowRecord>)> {
    (0..=max_texts).prop_flat_map(move |text_count| {
        let uid = 0..text_count + 3;
        let flows = proptest::collection::vec((uid.clone(), uid), 0..=max_flows).prop_map(
            |pairs| {
                pairs
                    .into_iter()
                    .map(|(from, to)| FlowRecord::next(format!("L{}", from), format!("L{}", to)))
                    .collect::<Vec<_>>()
            },
        );
        let uids: Vec<String> = (0..text_count).map(|i| format!("L{}", i)).collect();
        (Just(uids), flows)
    })
}
