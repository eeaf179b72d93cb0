mod capture;
mod column;
mod config;
mod error;
mod events;
mod grid;
mod host;
mod partition;
mod registry;
mod render;
mod reorder;
mod resize;
mod scroll_sync;
mod sort;
mod value;
mod viewport;

pub use capture::{CaptureId, CaptureSlot, DragKind, PointerCapture};
pub use column::{Accessor, AccessorFn, Alignment, Column, ColumnSpec, GridRow, Pinned};
pub use config::GridConfig;
pub use error::GridError;
pub use events::{EventBus, GridEvent, Listener};
pub use grid::{DataGrid, RowIdFn};
pub use host::{GridHost, NoopHost};
pub use partition::{
    ColumnPartition, PartitionCache, PartitionKind, partition_by_order, partition_columns,
};
pub use registry::{ColumnRegistry, DEFAULT_COLUMN_WIDTH};
pub use render::{
    BodyCell, BodyRow, GridFrame, HeaderAffordances, HeaderCell, PartitionWidths, Partitioned,
    RenderInput, compose,
};
pub use reorder::{ReorderController, ReorderMode, ReorderState, splice_order};
pub use resize::{MIN_COLUMN_WIDTH, ResizeController, ResizeDrag, ResizeState};
pub use scroll_sync::{BodyScroll, MeasureReason, ScrollSynchronizer, ScrollbarMetrics};
pub use sort::{
    SORT_INDICATOR_ASC, SORT_INDICATOR_DESC, SortDescriptor, SortDirection, SortOwnership,
    next_sort_state, sort_rows,
};
pub use value::CellValue;
pub use viewport::{
    ContainerHeight, DEFAULT_ROW_HEIGHT, FALLBACK_CONTAINER_HEIGHT, Viewport, ViewportInput,
    ViewportWindow, compute_window, full_window,
};
