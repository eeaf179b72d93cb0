use crate::{CaptureId, DragKind, PointerCapture, ScrollbarMetrics};

/// Everything the grid needs from the environment it is embedded in.
pub trait GridHost: ScrollbarMetrics + PointerCapture {}

impl<T: ScrollbarMetrics + PointerCapture> GridHost for T {}

/// Host with no native scrollbar and bookkeeping-only listeners.
#[derive(Debug, Default)]
pub struct NoopHost {
    next_capture: u64,
}

impl NoopHost {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScrollbarMetrics for NoopHost {
    fn scrollbar_thickness(&self) -> f32 {
        0.0
    }
}

impl PointerCapture for NoopHost {
    fn attach(&mut self, _kind: DragKind) -> CaptureId {
        self.next_capture += 1;
        CaptureId(self.next_capture)
    }

    fn detach(&mut self, _id: CaptureId) {}
}
