use gridflux_core::{DataGrid, GridEvent, SortDescriptor};
use std::cell::RefCell;
use std::rc::Rc;

/// Collects every event a grid emits, in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingListener {
    events: Rc<RefCell<Vec<GridEvent>>>,
}

impl RecordingListener {
    pub fn attach<R>(grid: &mut DataGrid<R>) -> Self {
        let recorder = Self::default();
        let sink = Rc::clone(&recorder.events);
        grid.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        recorder
    }

    pub fn events(&self) -> Vec<GridEvent> {
        self.events.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn last(&self) -> Option<GridEvent> {
        self.events.borrow().last().cloned()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    pub fn resized_widths(&self, column_id: &str) -> Vec<f32> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                GridEvent::ColumnResized { column_id: id, width } if id == column_id => {
                    Some(*width)
                }
                _ => None,
            })
            .collect()
    }

    pub fn reorders(&self) -> Vec<Vec<String>> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                GridEvent::ColumnsReordered(order) => Some(order.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn sort_changes(&self) -> Vec<Option<SortDescriptor>> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                GridEvent::SortChanged(sort) => Some(sort.clone()),
                _ => None,
            })
            .collect()
    }
}
