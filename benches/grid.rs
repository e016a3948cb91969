//! Benchmarks for view re-derivation and virtual window math
//!
//! Run with: cargo bench grid

mod support;

use flowgrid::grid::{build_view_rows, GridMetrics, ScrollState, VirtualWindow};
use flowgrid::import::{import_texts, ImportConfig};
use flowgrid::model::{Column, FlowSheet};
use support::{make_flows, make_texts};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

// ============================================================================
// View re-derivation
// ============================================================================

#[divan::bench(args = [1_000, 10_000, 100_000])]
fn build_rows(bencher: divan::Bencher, lines: usize) {
    let texts = make_texts(lines);
    let flows = make_flows(&texts);
    bencher.bench(|| divan::black_box(build_view_rows(&texts, &flows)));
}

#[divan::bench(args = [1_000, 10_000])]
fn commit_and_rederive(bencher: divan::Bencher, lines: usize) {
    let texts = make_texts(lines);
    let flows = make_flows(&texts);
    let records = texts.iter().map(|t| (**t).clone()).collect();
    let mut sheet = FlowSheet::with_records(records, flows, GridMetrics::default());
    sheet.set_viewport_height(900.0);

    let mut n = 0u64;
    bencher.bench_local(|| {
        n += 1;
        sheet.begin_edit(lines / 2, Column::SelectionLabel, "");
        sheet.update_draft(format!("edited {}", n));
        divan::black_box(sheet.commit().ok());
    });
}

// ============================================================================
// Virtual window
// ============================================================================

#[divan::bench(args = [1_000, 1_000_000])]
fn window_compute(total: usize) -> VirtualWindow {
    let metrics = GridMetrics::default();
    let scroll = ScrollState::new(divan::black_box(12_345.0), 900.0);
    VirtualWindow::compute(divan::black_box(total), &metrics, &scroll)
}

// ============================================================================
// Import
// ============================================================================

#[divan::bench(args = [1_000, 10_000])]
fn import_lenient(bencher: divan::Bencher, lines: usize) {
    let content = make_texts(lines).iter().fold(
        String::from("uid,actor,text\n"),
        |mut acc, t| {
            acc.push_str(&format!("{},{},\"{}\"\n", t.uid, t.actor, t.text));
            acc
        },
    );
    let config = ImportConfig::default();
    bencher.bench(|| divan::black_box(import_texts(&content, Some("csv"), &config)));
}
