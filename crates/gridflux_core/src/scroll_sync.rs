use crate::Viewport;

/// Host capability: report the thickness of a scrollable region's native
/// vertical scroll indicator (offset width minus client width).
pub trait ScrollbarMetrics {
    fn scrollbar_thickness(&self) -> f32;
}

/// Scroll position reported by the body on every scroll event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BodyScroll {
    pub scroll_left: f32,
    pub scroll_top: f32,
}

impl BodyScroll {
    pub fn new(scroll_left: f32, scroll_top: f32) -> Self {
        Self {
            scroll_left,
            scroll_top,
        }
    }
}

/// Why the scrollbar thickness has to be measured again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureReason {
    Mount,
    RowCountChanged,
    HeightChanged,
    ViewportResized,
}

/// Keeps the detached header aligned with the scrolling body.
///
/// The header mirrors the body's horizontal offset, and carries right
/// padding equal to the body's scrollbar thickness so columns line up while
/// a vertical scrollbar is showing.
#[derive(Debug, Clone)]
pub struct ScrollSynchronizer {
    header_scroll_left: f32,
    header_padding_right: f32,
    pending_measure: Option<MeasureReason>,
}

impl Default for ScrollSynchronizer {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollSynchronizer {
    /// Starts with a pending mount measurement.
    pub fn new() -> Self {
        Self {
            header_scroll_left: 0.0,
            header_padding_right: 0.0,
            pending_measure: Some(MeasureReason::Mount),
        }
    }

    pub fn header_scroll_left(&self) -> f32 {
        self.header_scroll_left
    }

    pub fn header_padding_right(&self) -> f32 {
        self.header_padding_right
    }

    /// Mirror the horizontal offset onto the header and, when virtualized,
    /// feed the vertical offset to the viewport. Returns true if the row
    /// window may have moved.
    pub fn on_body_scroll(&mut self, scroll: BodyScroll, viewport: &mut Viewport) -> bool {
        self.header_scroll_left = scroll.scroll_left.max(0.0);

        if !viewport.is_virtualized() {
            return false;
        }

        let moved = viewport.scroll_top() != scroll.scroll_top;
        viewport.set_scroll_top(scroll.scroll_top);

        log::trace!(
            "[SCROLL] Body scrolled to ({}, {})",
            scroll.scroll_left,
            scroll.scroll_top
        );

        moved
    }

    pub fn request_measure(&mut self, reason: MeasureReason) {
        if self.pending_measure.is_none() {
            self.pending_measure = Some(reason);
        }
    }

    pub fn pending_measure(&self) -> Option<MeasureReason> {
        self.pending_measure
    }

    /// Measure now, regardless of whether a measurement is pending.
    pub fn measure<M: ScrollbarMetrics + ?Sized>(&mut self, metrics: &M) -> f32 {
        let thickness = metrics.scrollbar_thickness().max(0.0);
        let reason = self.pending_measure.take();

        if thickness != self.header_padding_right {
            log::debug!(
                "[SCROLL] Header padding {} -> {} ({:?})",
                self.header_padding_right,
                thickness,
                reason
            );
        }

        self.header_padding_right = thickness;
        thickness
    }

    /// Measure only if something that can change scrollbar presence happened
    /// since the last measurement. Returns true if a measurement ran.
    pub fn measure_if_needed<M: ScrollbarMetrics + ?Sized>(&mut self, metrics: &M) -> bool {
        if self.pending_measure.is_none() {
            return false;
        }

        self.measure(metrics);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ContainerHeight;

    struct FixedScrollbar(f32);

    impl ScrollbarMetrics for FixedScrollbar {
        fn scrollbar_thickness(&self) -> f32 {
            self.0
        }
    }

    #[test]
    fn horizontal_offset_is_mirrored_even_without_virtualization() {
        let mut sync = ScrollSynchronizer::new();
        let mut viewport = Viewport::new(false, 48.0, ContainerHeight::Pixels(400.0));

        let moved = sync.on_body_scroll(BodyScroll::new(120.0, 300.0), &mut viewport);

        assert!(!moved);
        assert_eq!(sync.header_scroll_left(), 120.0);
        assert_eq!(viewport.scroll_top(), 0.0);
    }

    #[test]
    fn vertical_offset_feeds_virtualized_viewport() {
        let mut sync = ScrollSynchronizer::new();
        let mut viewport = Viewport::new(true, 48.0, ContainerHeight::Pixels(400.0));

        assert!(sync.on_body_scroll(BodyScroll::new(0.0, 480.0), &mut viewport));
        assert!(!sync.on_body_scroll(BodyScroll::new(10.0, 480.0), &mut viewport));
        assert_eq!(viewport.window(1000).start_index, 10);
    }

    #[test]
    fn mount_measurement_is_pending_until_run() {
        let mut sync = ScrollSynchronizer::new();
        assert_eq!(sync.pending_measure(), Some(MeasureReason::Mount));

        assert!(sync.measure_if_needed(&FixedScrollbar(15.0)));
        assert_eq!(sync.header_padding_right(), 15.0);
        assert!(!sync.measure_if_needed(&FixedScrollbar(0.0)));
        assert_eq!(sync.header_padding_right(), 15.0);
    }

    #[test]
    fn requested_measure_picks_up_scrollbar_removal() {
        let mut sync = ScrollSynchronizer::new();
        sync.measure(&FixedScrollbar(15.0));

        sync.request_measure(MeasureReason::RowCountChanged);
        sync.measure_if_needed(&FixedScrollbar(0.0));

        assert_eq!(sync.header_padding_right(), 0.0);
    }
}
