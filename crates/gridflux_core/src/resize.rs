use crate::ColumnRegistry;

/// Minimum width for a column. Drags never go below this, whatever the
/// column declares.
pub const MIN_COLUMN_WIDTH: f32 = 50.0;

/// Per-gesture snapshot taken at pointer-down.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeDrag {
    pub column_id: String,
    pub start_x: f32,
    pub start_width: f32,
    min_width: Option<f32>,
    max_width: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResizeState {
    #[default]
    Idle,
    Dragging(ResizeDrag),
}

/// Drag state machine turning pointer movement into a width for one column.
#[derive(Debug, Clone)]
pub struct ResizeController {
    state: ResizeState,
    floor: f32,
    honor_column_bounds: bool,
}

impl Default for ResizeController {
    fn default() -> Self {
        Self::new(MIN_COLUMN_WIDTH, true)
    }
}

impl ResizeController {
    pub fn new(floor: f32, honor_column_bounds: bool) -> Self {
        Self {
            state: ResizeState::Idle,
            floor: floor.max(MIN_COLUMN_WIDTH),
            honor_column_bounds,
        }
    }

    pub fn state(&self) -> &ResizeState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, ResizeState::Dragging(_))
    }

    pub fn active_column(&self) -> Option<&str> {
        match &self.state {
            ResizeState::Dragging(drag) => Some(drag.column_id.as_str()),
            ResizeState::Idle => None,
        }
    }

    /// Pointer-down on a resize handle. Stays Idle (returns false) unless the
    /// table and the column both allow resizing.
    pub fn begin<R>(
        &mut self,
        registry: &ColumnRegistry<R>,
        column_id: &str,
        pointer_x: f32,
        table_resizable: bool,
    ) -> bool {
        if !table_resizable {
            log::trace!("[RESIZE] Table resizing disabled, ignoring {}", column_id);
            return false;
        }

        let Some(column) = registry.column(column_id) else {
            log::warn!("[RESIZE] Unknown column {}", column_id);
            return false;
        };

        if !column.resizable {
            log::trace!("[RESIZE] Column {} is not resizable", column_id);
            return false;
        }

        let start_width = registry.effective_width(column_id);
        log::debug!(
            "[RESIZE] Start {} at x={} width={}",
            column_id,
            pointer_x,
            start_width
        );

        self.state = ResizeState::Dragging(ResizeDrag {
            column_id: column_id.to_string(),
            start_x: pointer_x,
            start_width,
            min_width: column.min_width,
            max_width: column.max_width,
        });
        true
    }

    /// Pointer move anywhere in the document. Writes the new width into the
    /// registry and returns it, or None when Idle.
    pub fn pointer_move<R>(
        &mut self,
        registry: &mut ColumnRegistry<R>,
        pointer_x: f32,
    ) -> Option<(String, f32)> {
        let ResizeState::Dragging(drag) = &self.state else {
            return None;
        };

        if !pointer_x.is_finite() {
            return None;
        }

        let width = self.width_for(drag, pointer_x - drag.start_x);
        registry.set_width_override(&drag.column_id, width);

        log::trace!("[RESIZE] {} -> {}", drag.column_id, width);
        Some((drag.column_id.clone(), width))
    }

    /// Pointer-up anywhere in the document. Returns the released column.
    pub fn end(&mut self) -> Option<String> {
        match std::mem::take(&mut self.state) {
            ResizeState::Dragging(drag) => {
                log::debug!("[RESIZE] End {}", drag.column_id);
                Some(drag.column_id)
            }
            ResizeState::Idle => None,
        }
    }

    fn width_for(&self, drag: &ResizeDrag, delta: f32) -> f32 {
        let mut width = drag.start_width + delta;

        if self.honor_column_bounds {
            if let Some(max) = drag.max_width {
                width = width.min(max);
            }
            if let Some(min) = drag.min_width {
                width = width.max(min);
            }
        }

        width.max(self.floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Column;

    type Row = serde_json::Value;

    fn registry() -> ColumnRegistry<Row> {
        ColumnRegistry::new(vec![
            Column::new("age", "Age").width(100.0),
            Column::new("name", "Name").min_width(120.0).max_width(300.0),
            Column::new("id", "ID").resizable(false),
        ])
        .unwrap()
    }

    #[test]
    fn drag_right_then_far_left_clamps_to_floor() {
        let mut registry = registry();
        let mut resize = ResizeController::default();

        assert!(resize.begin(&registry, "age", 500.0, true));
        assert_eq!(
            resize.pointer_move(&mut registry, 550.0),
            Some(("age".to_string(), 150.0))
        );
        resize.end();
        assert_eq!(registry.effective_width("age"), 150.0);

        assert!(resize.begin(&registry, "age", 550.0, true));
        resize.pointer_move(&mut registry, 350.0);
        assert_eq!(registry.effective_width("age"), MIN_COLUMN_WIDTH);
    }

    #[test]
    fn width_never_drops_below_floor() {
        let mut registry = registry();
        let mut resize = ResizeController::default();
        resize.begin(&registry, "age", 0.0, true);

        for x in (-5000..=0).step_by(250) {
            let (_, width) = resize.pointer_move(&mut registry, x as f32).unwrap();
            assert!(width >= MIN_COLUMN_WIDTH);
        }
    }

    #[test]
    fn column_bounds_are_honored_when_enabled() {
        let mut registry = registry();
        let mut resize = ResizeController::new(MIN_COLUMN_WIDTH, true);
        resize.begin(&registry, "name", 0.0, true);

        assert_eq!(resize.pointer_move(&mut registry, -100.0).unwrap().1, 120.0);
        assert_eq!(resize.pointer_move(&mut registry, 1000.0).unwrap().1, 300.0);
    }

    #[test]
    fn floor_only_when_column_bounds_ignored() {
        let mut registry = registry();
        let mut resize = ResizeController::new(MIN_COLUMN_WIDTH, false);
        resize.begin(&registry, "name", 0.0, true);

        assert_eq!(resize.pointer_move(&mut registry, -90.0).unwrap().1, 60.0);
        assert_eq!(resize.pointer_move(&mut registry, 1000.0).unwrap().1, 1150.0);
    }

    #[test]
    fn disabled_flags_keep_controller_idle() {
        let mut registry = registry();
        let mut resize = ResizeController::default();

        assert!(!resize.begin(&registry, "age", 0.0, false));
        assert!(!resize.begin(&registry, "id", 0.0, true));
        assert!(!resize.begin(&registry, "zzz", 0.0, true));

        assert_eq!(resize.state(), &ResizeState::Idle);
        assert_eq!(resize.pointer_move(&mut registry, 40.0), None);
        assert_eq!(registry.width_override("age"), None);
    }

    #[test]
    fn start_width_uses_existing_override() {
        let mut registry = registry();
        registry.set_width_override("age", 210.0);
        let mut resize = ResizeController::default();

        resize.begin(&registry, "age", 10.0, true);
        assert_eq!(resize.pointer_move(&mut registry, 20.0).unwrap().1, 220.0);
    }

    #[test]
    fn end_returns_to_idle() {
        let registry = registry();
        let mut resize = ResizeController::default();

        resize.begin(&registry, "age", 0.0, true);
        assert_eq!(resize.end(), Some("age".to_string()));
        assert_eq!(resize.end(), None);
        assert!(!resize.is_dragging());
    }
}
