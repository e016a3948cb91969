//! Virtual window tests - bounds, coverage, and tracking re-derivation

mod common;

use common::{test_model, test_sheet};
use flowgrid::grid::{GridMetrics, ScrollState, VirtualWindow};
use flowgrid::messages::{Direction, FlowMsg, GridMsg, ImportMsg, Msg};
use flowgrid::update::update;
use proptest::prelude::*;

/// True if row `i` overlaps `[scroll_top, scroll_top + viewport_height)`
fn intersects(i: usize, metrics: &GridMetrics, scroll: &ScrollState) -> bool {
    let top = metrics.header_height + i as f64 * metrics.row_height;
    let bottom = top + metrics.row_height;
    top < scroll.scroll_top + scroll.viewport_height && bottom > scroll.scroll_top
}

// ========================================================================
// Pure calculation
// ========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn test_window_bounds_and_coverage(
        row_height in 1usize..=40,
        header_height in 0usize..50,
        overscan in 0usize..8,
        total in 0usize..300,
        scroll_top in 0usize..12_000,
        viewport_height in 0usize..900,
    ) {
        let metrics = GridMetrics {
            row_height: row_height as f64,
            header_height: header_height as f64,
            overscan,
        };
        let scroll = ScrollState::new(scroll_top as f64, viewport_height as f64);

        let window = VirtualWindow::compute(total, &metrics, &scroll);
        prop_assert!(window.start <= window.end, "{:?}", window);
        prop_assert!(window.end <= total, "{:?} total {}", window, total);

        for i in 0..total {
            if intersects(i, &metrics, &scroll) {
                prop_assert!(
                    window.contains(i),
                    "row {} visible but outside {:?} ({:?}, {:?})",
                    i, window, metrics, scroll
                );
            }
        }
    }
}

#[test]
fn test_window_overscan_is_symmetric_when_unclamped() {
    let metrics = GridMetrics {
        row_height: 10.0,
        header_height: 0.0,
        overscan: 3,
    };
    let window = VirtualWindow::compute(1_000, &metrics, &ScrollState::new(500.0, 100.0));
    assert_eq!(window, VirtualWindow { start: 47, end: 63 });
}

#[test]
fn test_window_empty_grid() {
    let window = VirtualWindow::compute(0, &GridMetrics::default(), &ScrollState::new(0.0, 500.0));
    assert!(window.is_empty());
}

#[test]
fn test_window_size_independent_of_total() {
    let metrics = GridMetrics::default();
    let scroll = ScrollState::new(2_000.0, 560.0);
    let small = VirtualWindow::compute(10_000, &metrics, &scroll);
    let large = VirtualWindow::compute(1_000_000, &metrics, &scroll);
    assert_eq!(small, large);
}

// ========================================================================
// Through the sheet
// ========================================================================

#[test]
fn test_scroll_message_clamps_offset() {
    let mut model = test_model(&["A", "B", "C"], vec![]);
    update(&mut model, Msg::Grid(GridMsg::Scroll { scroll_top: -40.0 }));
    assert_eq!(model.sheet.scroll.scroll_top, 0.0);

    update(&mut model, Msg::Grid(GridMsg::Scroll { scroll_top: 1e9 }));
    // Content (32 + 3*28) fits in 600px, so nothing to scroll
    assert_eq!(model.sheet.scroll.scroll_top, 0.0);
}

#[test]
fn test_window_shrinks_after_reimport() {
    let uids: Vec<String> = (0..500).map(|i| format!("L{}", i)).collect();
    let refs: Vec<&str> = uids.iter().map(|s| s.as_str()).collect();
    let mut model = test_model(&refs, vec![]);
    update(&mut model, Msg::Grid(GridMsg::Last));
    assert!(model.sheet.window().contains(499));

    update(
        &mut model,
        Msg::Import(ImportMsg::Parsed("uid,text\nX,hi\nY,yo\n".to_string())),
    );
    let window = model.sheet.window();
    assert!(window.end <= model.sheet.row_count());
    assert_eq!(model.sheet.row_count(), 2);
    assert_eq!(model.sheet.selection.row, 0);
}

#[test]
fn test_window_grows_with_branches() {
    let mut sheet = test_sheet(&["A"], vec![]);
    assert_eq!(sheet.window().end, 1);
    for _ in 0..4 {
        sheet.add_branch(0).unwrap();
    }
    assert_eq!(sheet.row_count(), 4);
    assert_eq!(sheet.window().end, 4);
}

#[test]
fn test_selection_stays_visible_while_moving() {
    let uids: Vec<String> = (0..200).map(|i| format!("L{}", i)).collect();
    let refs: Vec<&str> = uids.iter().map(|s| s.as_str()).collect();
    let mut model = test_model(&refs, vec![]);
    update(&mut model, Msg::Grid(GridMsg::Resize { viewport_height: 200.0 }));

    for step in 0..150 {
        let msg = if step % 10 == 9 {
            GridMsg::PageDown
        } else {
            GridMsg::Move(Direction::Down)
        };
        update(&mut model, Msg::Grid(msg));
        let window = model.sheet.window();
        assert!(
            window.contains(model.sheet.selection.row),
            "step {step}: {:?} misses {}",
            window,
            model.sheet.selection.row
        );
    }
}

#[test]
fn test_remove_last_row_clamps_selection() {
    let mut model = test_model(
        &["A"],
        vec![
            flowgrid::model::FlowRecord::next("A", "x"),
            flowgrid::model::FlowRecord::next("A", "y"),
        ],
    );
    update(&mut model, Msg::Grid(GridMsg::Last));
    assert_eq!(model.sheet.selection.row, 1);
    update(&mut model, Msg::Flow(FlowMsg::Remove { row: 1 }));
    assert_eq!(model.sheet.selection.row, 0);
    assert_eq!(model.sheet.window().end, 1);
}
