use gridflux_core::{CaptureId, DragKind, PointerCapture, ScrollbarMetrics};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, Default)]
pub struct FakeHostStats {
    pub scrollbar_thickness: f32,
    pub measure_calls: usize,
    pub attach_calls: usize,
    pub detach_calls: usize,
    pub attached: Vec<(CaptureId, DragKind)>,
}

/// Host double that reports a configurable scrollbar thickness and tracks
/// document listener attach/detach calls. Clones share state, so a test can
/// keep one handle after boxing another into a grid.
#[derive(Debug, Clone, Default)]
pub struct FakeHost {
    state: Arc<Mutex<FakeHostStats>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scrollbar(self, thickness: f32) -> Self {
        self.set_scrollbar(thickness);
        self
    }

    pub fn set_scrollbar(&self, thickness: f32) {
        mutex_lock(&self.state).scrollbar_thickness = thickness;
    }

    pub fn stats(&self) -> FakeHostStats {
        mutex_lock(&self.state).clone()
    }

    /// Listener sets currently attached.
    pub fn active_captures(&self) -> usize {
        mutex_lock(&self.state).attached.len()
    }
}

impl ScrollbarMetrics for FakeHost {
    fn scrollbar_thickness(&self) -> f32 {
        let mut state = mutex_lock(&self.state);
        state.measure_calls += 1;
        state.scrollbar_thickness
    }
}

impl PointerCapture for FakeHost {
    fn attach(&mut self, kind: DragKind) -> CaptureId {
        let mut state = mutex_lock(&self.state);
        state.attach_calls += 1;

        let id = CaptureId(state.attach_calls as u64);
        state.attached.push((id, kind));
        id
    }

    fn detach(&mut self, id: CaptureId) {
        let mut state = mutex_lock(&self.state);
        state.detach_calls += 1;
        state.attached.retain(|(attached, _)| *attached != id);
    }
}

fn mutex_lock<T>(lock: &Mutex<T>) -> MutexGuard<'_, T> {
    match lock.lock() {
        Ok(guard) => guard,
        Err(poison_error) => poison_error.into_inner(),
    }
}
