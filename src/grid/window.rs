//! Virtual window calculations
//!
//! Rows are laid out below a fixed-height column header:
//! row `i` spans `[header + i * row_height, header + (i + 1) * row_height)`
//! in content pixels. The window is the contiguous index range that
//! intersects the viewport, widened by an overscan margin. O(1) in the
//! number of rows.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Fixed geometry of the grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridMetrics {
    /// Height of every row in pixels
    pub row_height: f64,
    /// Height of the column header in pixels
    pub header_height: f64,
    /// Extra rows materialized above and below the visible span
    pub overscan: usize,
}

impl Default for GridMetrics {
    fn default() -> Self {
        Self {
            row_height: 28.0,
            header_height: 32.0,
            overscan: 5,
        }
    }
}

impl GridMetrics {
    /// Total content height for `total_rows` rows, header included
    pub fn content_height(&self, total_rows: usize) -> f64 {
        self.header_height + total_rows as f64 * self.row_height
    }

    /// Number of rows that fit entirely below the header (at least 1)
    pub fn rows_per_page(&self, viewport_height: f64) -> usize {
        if self.row_height <= 0.0 {
            return 1;
        }
        let usable = (viewport_height - self.header_height).max(0.0);
        ((usable / self.row_height).floor() as usize).max(1)
    }
}

/// Scroll position reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    /// Pixels scrolled from the top of the content
    pub scroll_top: f64,
    /// Height of the visible area in pixels
    pub viewport_height: f64,
}

impl ScrollState {
    pub fn new(scroll_top: f64, viewport_height: f64) -> Self {
        Self {
            scroll_top,
            viewport_height,
        }
    }

    /// Largest meaningful scroll offset for the given row count
    pub fn max_scroll(&self, total_rows: usize, metrics: &GridMetrics) -> f64 {
        (metrics.content_height(total_rows) - self.viewport_height).max(0.0)
    }

    /// Clamp the offset into `[0, max_scroll]`
    pub fn clamp(&mut self, total_rows: usize, metrics: &GridMetrics) {
        let max = self.max_scroll(total_rows, metrics);
        if !self.scroll_top.is_finite() || self.scroll_top < 0.0 {
            self.scroll_top = 0.0;
        } else if self.scroll_top > max {
            self.scroll_top = max;
        }
    }

    /// Scroll the minimum amount so `row` is fully inside the viewport
    pub fn ensure_row_visible(&mut self, row: usize, total_rows: usize, metrics: &GridMetrics) {
        let row_top = metrics.header_height + row as f64 * metrics.row_height;
        let row_bottom = row_top + metrics.row_height;

        if row == 0 {
            self.scroll_top = 0.0;
        } else if row_top < self.scroll_top {
            self.scroll_top = row_top;
        } else if row_bottom > self.scroll_top + self.viewport_height {
            self.scroll_top = row_bottom - self.viewport_height;
        }

        self.clamp(total_rows, metrics);
    }
}

/// Half-open range of row indices to materialize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VirtualWindow {
    pub start: usize,
    pub end: usize,
}

impl VirtualWindow {
    /// Compute the window for the current scroll state
    ///
    /// Always satisfies `0 <= start <= end <= total_rows`.
    pub fn compute(total_rows: usize, metrics: &GridMetrics, scroll: &ScrollState) -> Self {
        if total_rows == 0 || !(metrics.row_height > 0.0) {
            return Self::default();
        }

        // Viewport expressed relative to the first row's top edge
        let top = scroll.scroll_top - metrics.header_height;
        let bottom = top + scroll.viewport_height.max(0.0);

        let first = if top > 0.0 {
            (top / metrics.row_height).floor() as usize
        } else {
            0
        };
        let last_exclusive = if bottom > 0.0 {
            (bottom / metrics.row_height).ceil() as usize
        } else {
            0
        };
        let last_exclusive = last_exclusive.max(first);

        let end = last_exclusive
            .saturating_add(metrics.overscan)
            .min(total_rows);
        let start = first.saturating_sub(metrics.overscan).min(end);

        Self { start, end }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, row: usize) -> bool {
        row >= self.start && row < self.end
    }
}
