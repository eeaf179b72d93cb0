use std::sync::Arc;

use crate::{
    BodyScroll, CaptureSlot, Column, ColumnRegistry, ContainerHeight, DragKind, EventBus,
    GridConfig, GridError, GridEvent, GridFrame, GridHost, GridRow, HeaderAffordances,
    MeasureReason, NoopHost, PartitionCache, ReorderController, RenderInput, ResizeController,
    ScrollSynchronizer, SortDescriptor, SortOwnership, Viewport, ViewportWindow, compose,
    next_sort_state, partition_by_order, sort_rows,
};

/// Stable identity for a row: `(row, index in the sorted view) -> id`.
pub type RowIdFn<R> = Arc<dyn Fn(&R, usize) -> String + Send + Sync>;

/// Headless grid engine.
///
/// Every input (pointer, scroll, data change) is a synchronous step over
/// `&mut self`; listeners run inside the step that produced their event.
/// `compose` turns the current state into a `GridFrame` for the host to paint.
pub struct DataGrid<R> {
    config: GridConfig,
    registry: ColumnRegistry<R>,
    partition: PartitionCache,

    rows: Vec<R>,
    sort: Option<SortDescriptor>,

    /// Sorted view; None when rows, columns or sort changed since the last
    /// compute.
    sorted: Option<Vec<usize>>,

    viewport: Viewport,
    resize: ResizeController,
    reorder: ReorderController,
    scroll: ScrollSynchronizer,
    capture: CaptureSlot,
    host: Box<dyn GridHost>,
    events: EventBus,
    row_id: RowIdFn<R>,
}

impl<R> DataGrid<R> {
    pub fn new(columns: Vec<Column<R>>, config: GridConfig) -> Result<Self, GridError> {
        config.validate()?;

        let registry = ColumnRegistry::with_default_width(columns, config.default_column_width)?;
        let viewport = Viewport::new(
            config.virtualized,
            config.row_height,
            config.container_height.clone(),
        )
        .with_fallback_height(config.fallback_container_height);

        log::debug!(
            "Created grid with {} columns (virtualized: {})",
            registry.len(),
            config.virtualized
        );

        Ok(Self {
            resize: ResizeController::new(config.min_resize_width, config.honor_column_bounds),
            reorder: ReorderController::new(config.reorder_mode),
            config,
            registry,
            partition: PartitionCache::new(),
            rows: Vec::new(),
            sort: None,
            sorted: None,
            viewport,
            scroll: ScrollSynchronizer::new(),
            capture: CaptureSlot::new(),
            host: Box::new(NoopHost::new()),
            events: EventBus::new(),
            row_id: Arc::new(|_, index| index.to_string()),
        })
    }

    pub fn with_host(mut self, host: Box<dyn GridHost>) -> Self {
        self.host = host;
        self.scroll.request_measure(MeasureReason::Mount);
        self
    }

    pub fn with_rows(mut self, rows: Vec<R>) -> Self {
        self.rows = rows;
        self.sorted = None;
        self
    }

    pub fn with_sort(mut self, sort: Option<SortDescriptor>) -> Self {
        self.sort = sort;
        self.sorted = None;
        self
    }

    pub fn with_row_id<F>(mut self, row_id: F) -> Self
    where
        F: Fn(&R, usize) -> String + Send + Sync + 'static,
    {
        self.row_id = Arc::new(row_id);
        self
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&GridEvent) + 'static) {
        self.events.subscribe(listener);
    }

    // --- State ---

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn registry(&self) -> &ColumnRegistry<R> {
        &self.registry
    }

    pub fn column_order(&self) -> Vec<String> {
        self.registry.ids()
    }

    pub fn effective_width(&self, column_id: &str) -> f32 {
        self.registry.effective_width(column_id)
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn sort(&self) -> Option<&SortDescriptor> {
        self.sort.as_ref()
    }

    pub fn window(&self) -> ViewportWindow {
        self.viewport.window(self.rows.len())
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn header_scroll_left(&self) -> f32 {
        self.scroll.header_scroll_left()
    }

    pub fn header_padding_right(&self) -> f32 {
        self.scroll.header_padding_right()
    }

    pub fn is_resizing(&self) -> bool {
        self.resize.is_dragging()
    }

    pub fn is_reordering(&self) -> bool {
        self.reorder.is_dragging()
    }

    pub fn active_capture(&self) -> Option<DragKind> {
        self.capture.active_kind()
    }

    pub fn listener_count(&self) -> usize {
        self.events.listener_count()
    }

    // --- Data inputs ---

    pub fn set_rows(&mut self, rows: Vec<R>) {
        if rows.len() != self.rows.len() {
            self.scroll.request_measure(MeasureReason::RowCountChanged);
        }

        self.rows = rows;
        self.sorted = None;
    }

    /// Remount with new column definitions. Width overrides are reset and any
    /// in-flight drag is abandoned.
    pub fn set_columns(&mut self, columns: Vec<Column<R>>) -> Result<(), GridError> {
        self.registry.replace_columns(columns)?;
        self.cancel_drags();
        self.sorted = None;
        Ok(())
    }

    /// Controlled sort from the host. Does not emit `SortChanged`.
    pub fn set_sort(&mut self, sort: Option<SortDescriptor>) {
        if self.sort == sort {
            return;
        }

        log::debug!("[SORT] Host set sort to {:?}", sort);
        self.sort = sort;
        self.sorted = None;
    }

    /// Returns false if a pixel height is not a positive finite number; the
    /// previous height is kept.
    pub fn set_container_height(&mut self, height: impl Into<ContainerHeight>) -> bool {
        let height = height.into();
        if let ContainerHeight::Pixels(px) = height {
            if !px.is_finite() || px <= 0.0 {
                log::warn!("[VIEWPORT] Ignoring container height {}", px);
                return false;
            }
        }

        if self.viewport.set_container_height(height) {
            self.scroll.request_measure(MeasureReason::HeightChanged);
        }
        true
    }

    pub fn set_column_visible(&mut self, column_id: &str, visible: bool) -> bool {
        self.registry.set_visible(column_id, visible)
    }

    // --- Sorting ---

    /// Header click. Returns true if a `SortChanged` was emitted.
    pub fn header_click(&mut self, column_id: &str) -> bool {
        if !self.config.sortable {
            return false;
        }

        match self.registry.column(column_id) {
            Some(column) if column.sortable => {}
            Some(_) => return false,
            None => {
                log::warn!("[SORT] Click on unknown column {}", column_id);
                return false;
            }
        }

        let next = next_sort_state(self.sort.as_ref(), column_id);

        match self.config.sort_ownership {
            SortOwnership::Engine => {
                log::debug!("[SORT] {:?} -> {:?}", self.sort, next);
                self.sort = next.clone();
                self.sorted = None;
            }
            SortOwnership::Host => {
                log::debug!("[SORT] Proposing {:?}", next);
            }
        }

        self.events.emit(GridEvent::SortChanged(next));
        true
    }

    // --- Resize ---

    pub fn resize_pointer_down(&mut self, column_id: &str, pointer_x: f32) -> bool {
        if !self
            .resize
            .begin(&self.registry, column_id, pointer_x, self.config.resizable)
        {
            return false;
        }

        self.reorder.drag_end();
        self.capture.acquire(self.host.as_mut(), DragKind::Resize);
        true
    }

    /// Document-level pointer move. Returns true if a width changed.
    pub fn pointer_move(&mut self, pointer_x: f32) -> bool {
        let Some((column_id, width)) = self.resize.pointer_move(&mut self.registry, pointer_x)
        else {
            return false;
        };

        self.events.emit(GridEvent::ColumnResized { column_id, width });
        true
    }

    /// Document-level pointer up. Ends a resize drag wherever the pointer is.
    pub fn pointer_up(&mut self) -> bool {
        let ended = self.resize.end().is_some();

        if self.capture.active_kind() == Some(DragKind::Resize) {
            self.capture.release(self.host.as_mut());
        }

        ended
    }

    // --- Reorder ---

    pub fn drag_start(&mut self, column_id: &str) -> bool {
        if !self
            .reorder
            .drag_start(&self.registry, column_id, self.config.reorderable)
        {
            return false;
        }

        self.resize.end();
        self.capture.acquire(self.host.as_mut(), DragKind::Reorder);
        true
    }

    /// Drag-over a header. Returns true if a new order was committed.
    pub fn drag_over(&mut self, target_column_id: &str) -> bool {
        let Some(order) = self.reorder.drag_over(&mut self.registry, target_column_id) else {
            return false;
        };

        self.events.emit(GridEvent::ColumnsReordered(order));
        true
    }

    /// Drop on a header. Returns true if a new order was committed.
    pub fn drop_on_header(&mut self) -> bool {
        let Some(order) = self.reorder.drop(&mut self.registry) else {
            return false;
        };

        self.events.emit(GridEvent::ColumnsReordered(order));
        true
    }

    pub fn drag_end(&mut self) -> bool {
        let ended = self.reorder.drag_end();

        if self.capture.active_kind() == Some(DragKind::Reorder) {
            self.capture.release(self.host.as_mut());
        }

        ended
    }

    // --- Scrolling ---

    /// Body scroll event. Returns true if the row window may have moved.
    pub fn body_scroll(&mut self, scroll: BodyScroll) -> bool {
        self.scroll.on_body_scroll(scroll, &mut self.viewport)
    }

    pub fn viewport_resized(&mut self) {
        self.scroll.request_measure(MeasureReason::ViewportResized);
    }

    /// Measure the body scrollbar now and update the header padding.
    pub fn measure_scrollbar(&mut self) -> f32 {
        self.scroll.measure(self.host.as_ref())
    }

    // --- Lifecycle ---

    /// Abandon any drag and detach pointer listeners. Also runs on drop.
    pub fn teardown(&mut self) {
        self.cancel_drags();
    }

    fn cancel_drags(&mut self) {
        self.resize.end();
        self.reorder.drag_end();
        self.capture.release(self.host.as_mut());
    }
}

impl<R: GridRow> DataGrid<R> {
    /// Sorted view over the current rows, as source indices.
    pub fn sorted_indices(&mut self) -> &[usize] {
        self.sorted
            .get_or_insert_with(|| {
                sort_rows(&self.rows, self.registry.columns(), self.sort.as_ref())
            })
            .as_slice()
    }

    /// Build the frame for the current state. Runs any pending scrollbar
    /// measurement first so the header padding is current.
    pub fn compose(&mut self) -> GridFrame {
        self.scroll.measure_if_needed(self.host.as_ref());

        if self.sorted.is_none() {
            self.sorted = Some(sort_rows(
                &self.rows,
                self.registry.columns(),
                self.sort.as_ref(),
            ));
        }

        let preview_partition;
        let partition = match self.reorder.preview() {
            Some(order) => {
                preview_partition = partition_by_order(&self.registry, order);
                &preview_partition
            }
            None => self.partition.get(&self.registry),
        };

        let window = self.viewport.window(self.rows.len());
        log::trace!(
            "[VIEWPORT] Rows {}..{} of {}",
            window.start_index,
            window.end_index,
            self.rows.len()
        );

        compose(&RenderInput {
            registry: &self.registry,
            partition,
            rows: &self.rows,
            order: self.sorted.as_deref().unwrap_or_default(),
            window,
            sort: self.sort.as_ref(),
            affordances: HeaderAffordances {
                resizable: self.config.resizable,
                sortable: self.config.sortable,
                reorderable: self.config.reorderable,
                resizing: self.resize.active_column(),
                dragging: self.reorder.dragged_column(),
            },
            header_scroll_left: self.scroll.header_scroll_left(),
            header_padding_right: self.scroll.header_padding_right(),
            row_id: &*self.row_id,
        })
    }
}

impl<R> Drop for DataGrid<R> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<R> std::fmt::Debug for DataGrid<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataGrid")
            .field("columns", &self.registry.len())
            .field("rows", &self.rows.len())
            .field("sort", &self.sort)
            .field("resize", self.resize.state())
            .field("reorder", self.reorder.state())
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}
