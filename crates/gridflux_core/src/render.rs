use crate::{
    Alignment, CellValue, ColumnPartition, ColumnRegistry, GridRow, PartitionKind,
    SortDescriptor, ViewportWindow,
};

/// Left, center and right groups of some per-column item.
#[derive(Debug, Clone, PartialEq)]
pub struct Partitioned<T> {
    pub left: Vec<T>,
    pub center: Vec<T>,
    pub right: Vec<T>,
}

impl<T> Default for Partitioned<T> {
    fn default() -> Self {
        Self {
            left: Vec::new(),
            center: Vec::new(),
            right: Vec::new(),
        }
    }
}

impl<T> Partitioned<T> {
    pub fn get(&self, kind: PartitionKind) -> &[T] {
        match kind {
            PartitionKind::Left => &self.left,
            PartitionKind::Center => &self.center,
            PartitionKind::Right => &self.right,
        }
    }

    fn get_mut(&mut self, kind: PartitionKind) -> &mut Vec<T> {
        match kind {
            PartitionKind::Left => &mut self.left,
            PartitionKind::Center => &mut self.center,
            PartitionKind::Right => &mut self.right,
        }
    }

    /// All items in left, center, right order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.left.iter().chain(&self.center).chain(&self.right)
    }

    pub fn len(&self) -> usize {
        self.left.len() + self.center.len() + self.right.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    pub column_id: String,
    pub label: String,
    pub width: f32,
    pub min_width: Option<f32>,
    pub max_width: Option<f32>,
    pub align: Alignment,

    /// Arrow for the sorted column, None otherwise.
    pub sort_indicator: Option<&'static str>,

    pub resizable: bool,
    pub sortable: bool,
    pub reorderable: bool,
    pub resizing: bool,
    pub dragging: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BodyCell {
    pub column_id: String,
    pub value: CellValue,
    pub text: String,
    pub width: f32,
    pub align: Alignment,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BodyRow {
    pub id: String,

    /// Position in the sorted view.
    pub index: usize,

    /// Position in the row list the host supplied.
    pub source_index: usize,

    pub cells: Partitioned<BodyCell>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PartitionWidths {
    pub left: f32,
    pub center: f32,
    pub right: f32,
}

impl PartitionWidths {
    pub fn total(&self) -> f32 {
        self.left + self.center + self.right
    }
}

/// Everything a host needs to paint one frame of the grid.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridFrame {
    pub header: Partitioned<HeaderCell>,
    pub rows: Vec<BodyRow>,

    /// Translate applied to the materialized rows inside the body spacer.
    pub offset_y: f32,
    pub total_height: f32,

    pub header_scroll_left: f32,
    pub header_padding_right: f32,

    pub widths: PartitionWidths,
}

impl GridFrame {
    pub fn column_ids(&self) -> Vec<&str> {
        self.header.iter().map(|h| h.column_id.as_str()).collect()
    }
}

/// Table-wide interaction toggles and in-flight drags, as seen by the header.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderAffordances<'a> {
    pub resizable: bool,
    pub sortable: bool,
    pub reorderable: bool,
    pub resizing: Option<&'a str>,
    pub dragging: Option<&'a str>,
}

pub struct RenderInput<'a, R> {
    pub registry: &'a ColumnRegistry<R>,
    pub partition: &'a ColumnPartition,
    pub rows: &'a [R],

    /// Sorted view, as source indices.
    pub order: &'a [usize],
    pub window: ViewportWindow,
    pub sort: Option<&'a SortDescriptor>,
    pub affordances: HeaderAffordances<'a>,
    pub header_scroll_left: f32,
    pub header_padding_right: f32,
    pub row_id: &'a dyn Fn(&R, usize) -> String,
}

pub fn compose<R: GridRow>(input: &RenderInput<'_, R>) -> GridFrame {
    let registry = input.registry;
    let affordances = input.affordances;

    let mut header = Partitioned::default();
    let mut widths = PartitionWidths::default();

    for (kind, id) in input.partition.iter() {
        let Some(column) = registry.column(id) else {
            continue;
        };

        let width = registry.effective_width(id);
        match kind {
            PartitionKind::Left => widths.left += width,
            PartitionKind::Center => widths.center += width,
            PartitionKind::Right => widths.right += width,
        }

        let sort_indicator = input
            .sort
            .filter(|s| s.column_id == column.id)
            .map(|s| s.direction.indicator());

        header.get_mut(kind).push(HeaderCell {
            column_id: column.id.clone(),
            label: column.header.clone(),
            width,
            min_width: column.min_width,
            max_width: column.max_width,
            align: column.align,
            sort_indicator,
            resizable: affordances.resizable && column.resizable,
            sortable: affordances.sortable && column.sortable,
            reorderable: affordances.reorderable,
            resizing: affordances.resizing == Some(id),
            dragging: affordances.dragging == Some(id),
        });
    }

    let end = input.window.end_index.min(input.order.len());
    let start = input.window.start_index.min(end);

    let mut rows = Vec::with_capacity(end - start);
    for index in start..end {
        let source_index = input.order[index];
        let Some(row) = input.rows.get(source_index) else {
            continue;
        };

        let mut cells = Partitioned::default();
        for (kind, id) in input.partition.iter() {
            let Some(column) = registry.column(id) else {
                continue;
            };

            let value = column.accessor.resolve(row);
            cells.get_mut(kind).push(BodyCell {
                column_id: column.id.clone(),
                text: value.as_display_string(),
                value,
                width: registry.effective_width(id),
                align: column.align,
            });
        }

        rows.push(BodyRow {
            id: (input.row_id)(row, index),
            index,
            source_index,
            cells,
        });
    }

    GridFrame {
        header,
        rows,
        offset_y: input.window.offset_y,
        total_height: input.window.total_height,
        header_scroll_left: input.header_scroll_left,
        header_padding_right: input.header_padding_right,
        widths,
    }
}
