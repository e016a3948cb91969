//! Shared helpers for benchmarks

use std::sync::Arc;

use flowgrid::model::{FlowRecord, TextRecord, TransitionType};

/// `count` dialogue lines with realistic text lengths
pub fn make_texts(count: usize) -> Vec<Arc<TextRecord>> {
    (0..count)
        .map(|i| {
            Arc::new(TextRecord::new(
                format!("SC{:05}", i),
                if i % 3 == 0 { "Alice" } else { "Bob" },
                format!("<i>Line {}</i> The quick brown fox jumps over the lazy dog.", i),
            ))
        })
        .collect()
}

/// One flow per line, with every tenth line branching three ways
#[allow(dead_code)]
pub fn make_flows(texts: &[Arc<TextRecord>]) -> Vec<FlowRecord> {
    let mut flows = Vec::with_capacity(texts.len() * 6 / 5);
    for pair in texts.windows(2) {
        let (from, to) = (&pair[0].uid, &pair[1].uid);
        flows.push(FlowRecord::next(from.clone(), to.clone()));
        if pair[0].uid.ends_with('0') {
            for branch in 1..3 {
                flows.push(FlowRecord {
                    transition_type: TransitionType::Select,
                    selection_label: format!("Choice {}", branch),
                    disp_order: branch,
                    ..FlowRecord::next(from.clone(), to.clone())
                });
            }
        }
    }
    flows
}
