use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Container height used when the declared height is not a pixel value.
pub const FALLBACK_CONTAINER_HEIGHT: f32 = 600.0;

/// Height of each data row.
pub const DEFAULT_ROW_HEIGHT: f32 = 48.0;

/// Declared height of the scrollable body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContainerHeight {
    Pixels(f32),
    /// Opaque size string such as `"100%"` or `"50vh"`. Not resolved against
    /// layout; windowing uses the fallback height instead.
    Css(String),
}

impl ContainerHeight {
    pub fn resolve(&self, fallback: f32) -> f32 {
        match self {
            ContainerHeight::Pixels(px) if px.is_finite() && *px >= 0.0 => *px,
            ContainerHeight::Pixels(_) | ContainerHeight::Css(_) => fallback,
        }
    }
}

impl Default for ContainerHeight {
    fn default() -> Self {
        ContainerHeight::Pixels(FALLBACK_CONTAINER_HEIGHT)
    }
}

impl From<f32> for ContainerHeight {
    fn from(px: f32) -> Self {
        ContainerHeight::Pixels(px)
    }
}

impl From<&str> for ContainerHeight {
    fn from(css: &str) -> Self {
        ContainerHeight::Css(css.to_string())
    }
}

/// Contiguous slice of rows to materialize, plus the transform that places
/// it inside a spacer of `total_height`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportWindow {
    pub start_index: usize,
    pub end_index: usize,
    pub offset_y: f32,
    pub total_height: f32,
}

impl ViewportWindow {
    pub fn range(&self) -> Range<usize> {
        self.start_index..self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index - self.start_index
    }

    pub fn is_empty(&self) -> bool {
        self.start_index == self.end_index
    }
}

/// Everything the windowing computation depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportInput {
    pub total_rows: usize,
    pub row_height: f32,
    pub container_height: f32,
    pub scroll_top: f32,
}

/// Rows covering the viewport, over-rendering one extra row so a partially
/// visible row at the bottom edge is never missing.
pub fn compute_window(input: ViewportInput) -> ViewportWindow {
    let ViewportInput {
        total_rows,
        row_height,
        container_height,
        scroll_top,
    } = input;

    if !row_height.is_finite() || row_height <= 0.0 {
        log::warn!("[VIEWPORT] Non-positive row height {}, rendering nothing", row_height);
        return ViewportWindow::default();
    }

    let total_height = total_rows as f32 * row_height;
    let container_height = container_height.max(0.0);
    let scroll_top = if scroll_top.is_finite() {
        scroll_top.max(0.0)
    } else {
        0.0
    };

    let visible_count = ((container_height / row_height).ceil() as usize).saturating_add(1);
    let start_index = ((scroll_top / row_height).floor() as usize).min(total_rows);
    let end_index = start_index.saturating_add(visible_count).min(total_rows);

    ViewportWindow {
        start_index,
        end_index,
        offset_y: start_index as f32 * row_height,
        total_height,
    }
}

/// The full row set, used when virtualization is off.
pub fn full_window(total_rows: usize, row_height: f32) -> ViewportWindow {
    let row_height = if row_height.is_finite() {
        row_height.max(0.0)
    } else {
        0.0
    };

    ViewportWindow {
        start_index: 0,
        end_index: total_rows,
        offset_y: 0.0,
        total_height: total_rows as f32 * row_height,
    }
}

/// Holds the body's vertical scroll position and derives the window from it.
#[derive(Debug, Clone)]
pub struct Viewport {
    virtualized: bool,
    row_height: f32,
    container_height: ContainerHeight,
    fallback_height: f32,
    scroll_top: f32,
}

impl Viewport {
    pub fn new(virtualized: bool, row_height: f32, container_height: ContainerHeight) -> Self {
        Self {
            virtualized,
            row_height,
            container_height,
            fallback_height: FALLBACK_CONTAINER_HEIGHT,
            scroll_top: 0.0,
        }
    }

    pub fn with_fallback_height(mut self, fallback: f32) -> Self {
        self.fallback_height = fallback;
        self
    }

    pub fn is_virtualized(&self) -> bool {
        self.virtualized
    }

    pub fn row_height(&self) -> f32 {
        self.row_height
    }

    pub fn container_height(&self) -> &ContainerHeight {
        &self.container_height
    }

    /// Returns true if the declared height actually changed.
    pub fn set_container_height(&mut self, height: ContainerHeight) -> bool {
        if self.container_height == height {
            return false;
        }
        self.container_height = height;
        true
    }

    pub fn resolved_container_height(&self) -> f32 {
        self.container_height.resolve(self.fallback_height)
    }

    pub fn scroll_top(&self) -> f32 {
        self.scroll_top
    }

    pub fn set_scroll_top(&mut self, scroll_top: f32) {
        self.scroll_top = scroll_top;
    }

    pub fn window(&self, total_rows: usize) -> ViewportWindow {
        if !self.virtualized {
            return full_window(total_rows, self.row_height);
        }

        compute_window(ViewportInput {
            total_rows,
            row_height: self.row_height,
            container_height: self.resolved_container_height(),
            scroll_top: self.scroll_top,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(total_rows: usize, container_height: f32, scroll_top: f32) -> ViewportWindow {
        compute_window(ViewportInput {
            total_rows,
            row_height: 48.0,
            container_height,
            scroll_top,
        })
    }

    #[test]
    fn first_window_of_large_table() {
        let w = window(1000, 400.0, 0.0);

        assert_eq!(w.start_index, 0);
        assert_eq!(w.end_index, 10);
        assert_eq!(w.offset_y, 0.0);
        assert_eq!(w.total_height, 48_000.0);
    }

    #[test]
    fn partial_scroll_floors_start_index() {
        let w = window(1000, 400.0, 100.0);

        assert_eq!(w.start_index, 2);
        assert_eq!(w.end_index, 12);
        assert_eq!(w.offset_y, 96.0);
    }

    #[test]
    fn end_index_clamps_to_row_count() {
        let w = window(5, 400.0, 0.0);
        assert_eq!(w.range(), 0..5);
    }

    #[test]
    fn invariants_hold_for_many_offsets() {
        let rows = 137;
        for step in 0..400 {
            let scroll_top = step as f32 * 23.5 - 50.0;
            let w = window(rows, 300.0, scroll_top);

            assert!(w.start_index <= w.end_index, "offset {}", scroll_top);
            assert!(w.end_index <= rows, "offset {}", scroll_top);
            assert_eq!(w.offset_y, w.start_index as f32 * 48.0);
            assert_eq!(w.total_height, rows as f32 * 48.0);
        }
    }

    #[test]
    fn scroll_past_end_yields_empty_window_at_row_count() {
        let w = window(10, 400.0, 10_000.0);

        assert_eq!(w.start_index, 10);
        assert_eq!(w.end_index, 10);
        assert!(w.is_empty());
    }

    #[test]
    fn huge_container_height_covers_all_rows() {
        let w = window(10, 1e21, 0.0);

        assert_eq!(w.range(), 0..10);
        assert_eq!(w.total_height, 480.0);
    }

    #[test]
    fn zero_row_height_renders_nothing() {
        let w = compute_window(ViewportInput {
            total_rows: 10,
            row_height: 0.0,
            container_height: 400.0,
            scroll_top: 0.0,
        });

        assert!(w.is_empty());
    }

    #[test]
    fn css_height_uses_fallback() {
        let viewport = Viewport::new(true, 48.0, ContainerHeight::from("100%"));

        assert_eq!(viewport.resolved_container_height(), FALLBACK_CONTAINER_HEIGHT);
        // ceil(600 / 48) + 1
        assert_eq!(viewport.window(1000).len(), 14);
    }

    #[test]
    fn non_virtualized_window_covers_everything() {
        let mut viewport = Viewport::new(false, 48.0, ContainerHeight::Pixels(400.0));
        viewport.set_scroll_top(4_800.0);

        let w = viewport.window(1000);

        assert_eq!(w.range(), 0..1000);
        assert_eq!(w.offset_y, 0.0);
        assert_eq!(w.total_height, 48_000.0);
    }

    #[test]
    fn container_height_deserializes_from_number_or_string() {
        let px: ContainerHeight = serde_json::from_str("400").unwrap();
        let css: ContainerHeight = serde_json::from_str("\"100%\"").unwrap();

        assert_eq!(px, ContainerHeight::Pixels(400.0));
        assert_eq!(css, ContainerHeight::Css("100%".into()));
    }
}
