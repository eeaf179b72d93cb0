use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::CellValue;

/// Horizontal alignment for column content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Where a column is anchored relative to the horizontally scrolling region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pinned {
    Left,
    Right,
    #[default]
    None,
}

/// Rows are opaque to the engine; columns read them through this trait.
///
/// Only key-based accessors call `field`. Row types that are read exclusively
/// through function accessors can rely on the default.
pub trait GridRow {
    fn field(&self, _key: &str) -> CellValue {
        CellValue::Null
    }
}

impl GridRow for serde_json::Map<String, serde_json::Value> {
    fn field(&self, key: &str) -> CellValue {
        self.get(key).map(CellValue::from).unwrap_or_default()
    }
}

impl GridRow for serde_json::Value {
    fn field(&self, key: &str) -> CellValue {
        self.get(key).map(CellValue::from).unwrap_or_default()
    }
}

impl GridRow for HashMap<String, CellValue> {
    fn field(&self, key: &str) -> CellValue {
        self.get(key).cloned().unwrap_or_default()
    }
}

pub type AccessorFn<R> = Arc<dyn Fn(&R) -> CellValue + Send + Sync>;

/// How a column pulls its value out of a row.
pub enum Accessor<R> {
    Key(String),
    Function(AccessorFn<R>),
}

impl<R: GridRow> Accessor<R> {
    pub fn resolve(&self, row: &R) -> CellValue {
        match self {
            Accessor::Key(key) => row.field(key),
            Accessor::Function(f) => f(row),
        }
    }
}

impl<R> Clone for Accessor<R> {
    fn clone(&self) -> Self {
        match self {
            Accessor::Key(key) => Accessor::Key(key.clone()),
            Accessor::Function(f) => Accessor::Function(Arc::clone(f)),
        }
    }
}

impl<R> std::fmt::Debug for Accessor<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Accessor::Key(key) => f.debug_tuple("Key").field(key).finish(),
            Accessor::Function(_) => f.write_str("Function(..)"),
        }
    }
}

/// Column definition.
///
/// Widths are in pixels. `width` is the declared default; the registry keeps
/// user overrides separately.
pub struct Column<R> {
    pub id: String,
    pub header: String,
    pub accessor: Accessor<R>,
    pub width: Option<f32>,
    pub min_width: Option<f32>,
    pub max_width: Option<f32>,
    pub resizable: bool,
    pub sortable: bool,
    pub pinned: Pinned,
    pub visible: bool,
    pub align: Alignment,
}

impl<R> Column<R> {
    /// Column read by field key. The id doubles as the key.
    pub fn new(id: impl Into<String>, header: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            accessor: Accessor::Key(id.clone()),
            id,
            header: header.into(),
            width: None,
            min_width: None,
            max_width: None,
            resizable: true,
            sortable: true,
            pinned: Pinned::None,
            visible: true,
            align: Alignment::Left,
        }
    }

    pub fn with_accessor<F>(id: impl Into<String>, header: impl Into<String>, f: F) -> Self
    where
        F: Fn(&R) -> CellValue + Send + Sync + 'static,
    {
        let mut column = Self::new(id, header);
        column.accessor = Accessor::Function(Arc::new(f));
        column
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.accessor = Accessor::Key(key.into());
        self
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn min_width(mut self, width: f32) -> Self {
        self.min_width = Some(width);
        self
    }

    pub fn max_width(mut self, width: f32) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn pinned(mut self, pinned: Pinned) -> Self {
        self.pinned = pinned;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }
}

// Manual impls keep `R` free of Clone/Debug bounds.
impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            accessor: self.accessor.clone(),
            width: self.width,
            min_width: self.min_width,
            max_width: self.max_width,
            resizable: self.resizable,
            sortable: self.sortable,
            pinned: self.pinned,
            visible: self.visible,
            align: self.align,
        }
    }
}

impl<R> std::fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("accessor", &self.accessor)
            .field("width", &self.width)
            .field("pinned", &self.pinned)
            .field("visible", &self.visible)
            .finish_non_exhaustive()
    }
}

/// Serializable column description, for tables whose columns come from a
/// config file. Always reads rows by key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub id: String,

    #[serde(default)]
    pub header: Option<String>,

    /// Field key; defaults to the column id.
    #[serde(default)]
    pub key: Option<String>,

    #[serde(default)]
    pub width: Option<f32>,

    #[serde(default)]
    pub min_width: Option<f32>,

    #[serde(default)]
    pub max_width: Option<f32>,

    #[serde(default = "default_true")]
    pub resizable: bool,

    #[serde(default = "default_true")]
    pub sortable: bool,

    #[serde(default)]
    pub pinned: Pinned,

    #[serde(default = "default_true")]
    pub visible: bool,

    #[serde(default)]
    pub align: Alignment,
}

fn default_true() -> bool {
    true
}

impl<R> From<ColumnSpec> for Column<R> {
    fn from(spec: ColumnSpec) -> Self {
        let header = spec.header.unwrap_or_else(|| spec.id.clone());
        let key = spec.key.unwrap_or_else(|| spec.id.clone());

        Self {
            id: spec.id,
            header,
            accessor: Accessor::Key(key),
            width: spec.width,
            min_width: spec.min_width,
            max_width: spec.max_width,
            resizable: spec.resizable,
            sortable: spec.sortable,
            pinned: spec.pinned,
            visible: spec.visible,
            align: spec.align,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn key_accessor_reads_json_rows() {
        let column: Column<serde_json::Value> = Column::new("name", "Name");
        let row = json!({"name": "Alice", "age": 30});

        assert_eq!(column.accessor.resolve(&row), CellValue::Text("Alice".into()));
    }

    #[test]
    fn missing_field_resolves_to_null() {
        let column: Column<serde_json::Value> = Column::new("email", "Email");
        let row = json!({"name": "Alice"});

        assert_eq!(column.accessor.resolve(&row), CellValue::Null);
    }

    #[test]
    fn function_accessor_ignores_field_lookup() {
        let column: Column<serde_json::Value> =
            Column::with_accessor("double_age", "Age x2", |row: &serde_json::Value| {
                row.get("age")
                    .and_then(|v| v.as_i64())
                    .map(|age| CellValue::Int(age * 2))
                    .unwrap_or_default()
            });
        let row = json!({"age": 21});

        assert_eq!(column.accessor.resolve(&row), CellValue::Int(42));
    }

    #[test]
    fn column_spec_defaults_match_builder_defaults() {
        let spec: ColumnSpec = serde_json::from_value(json!({"id": "age"})).unwrap();
        let column: Column<serde_json::Value> = spec.into();

        assert_eq!(column.header, "age");
        assert!(column.resizable);
        assert!(column.sortable);
        assert!(column.visible);
        assert_eq!(column.pinned, Pinned::None);
        assert!(matches!(column.accessor, Accessor::Key(ref k) if k == "age"));
    }

    #[test]
    fn column_spec_reads_pinned_and_align() {
        let spec: ColumnSpec = serde_json::from_value(json!({
            "id": "id",
            "pinned": "left",
            "align": "right",
            "width": 80.0
        }))
        .unwrap();

        assert_eq!(spec.pinned, Pinned::Left);
        assert_eq!(spec.align, Alignment::Right);
        assert_eq!(spec.width, Some(80.0));
    }
}
