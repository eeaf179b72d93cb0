/// Which drag gesture owns the document-level pointer listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragKind {
    Resize,
    Reorder,
}

/// Handle for one attached set of document-level listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CaptureId(pub u64);

/// Host capability: attach pointer move/up listeners at document scope so a
/// drag keeps tracking (and ends) even when the pointer leaves the element.
pub trait PointerCapture {
    fn attach(&mut self, kind: DragKind) -> CaptureId;
    fn detach(&mut self, id: CaptureId);
}

/// The at-most-one capture held by a grid.
///
/// Acquiring while another capture is held releases the old one first, so
/// repeated or interrupted drags never leak listeners.
#[derive(Debug, Default)]
pub struct CaptureSlot {
    active: Option<(CaptureId, DragKind)>,
}

impl CaptureSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire<H>(&mut self, host: &mut H, kind: DragKind) -> CaptureId
    where
        H: PointerCapture + ?Sized,
    {
        self.release(host);

        let id = host.attach(kind);
        log::debug!("[CAPTURE] Attached {:?} listeners ({:?})", kind, id);
        self.active = Some((id, kind));
        id
    }

    /// Returns true if a capture was held.
    pub fn release<H>(&mut self, host: &mut H) -> bool
    where
        H: PointerCapture + ?Sized,
    {
        let Some((id, kind)) = self.active.take() else {
            return false;
        };

        host.detach(id);
        log::debug!("[CAPTURE] Detached {:?} listeners ({:?})", kind, id);
        true
    }

    pub fn active_kind(&self) -> Option<DragKind> {
        self.active.map(|(_, kind)| kind)
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }
}
