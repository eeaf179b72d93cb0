use crate::SortDescriptor;

/// Notifications emitted by the grid.
///
/// Listeners run synchronously inside the step that produced the event and
/// must not block.
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
    /// Sort descriptor changed (None means unsorted). In host-owned mode this
    /// is a proposal; the grid keeps its descriptor until `set_sort`.
    SortChanged(Option<SortDescriptor>),

    /// Fired on every pointer move of a resize drag, not only on release.
    ColumnResized { column_id: String, width: f32 },

    /// Full column id order after a reorder commit.
    ColumnsReordered(Vec<String>),
}

pub type Listener = Box<dyn FnMut(&GridEvent)>;

/// Fan-out of grid events to subscribed listeners, in subscription order.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<Listener>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&GridEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn emit(&mut self, event: GridEvent) {
        log::trace!("[EVENT] {:?}", event);
        for listener in &mut self.listeners {
            listener(&event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn listeners_run_in_subscription_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();

        let first = Rc::clone(&log);
        bus.subscribe(move |_| first.borrow_mut().push("first"));
        let second = Rc::clone(&log);
        bus.subscribe(move |_| second.borrow_mut().push("second"));

        bus.emit(GridEvent::SortChanged(None));

        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }
}
