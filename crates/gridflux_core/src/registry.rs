use std::collections::{HashMap, HashSet};

use crate::{Column, GridError};

/// Width used when a column declares none and the user never resized it.
pub const DEFAULT_COLUMN_WIDTH: f32 = 150.0;

/// Single source of truth for column order, visibility and user widths.
///
/// Width overrides are keyed by column id, so they survive reorders,
/// visibility toggles and row re-sorts. Only `replace_columns` (a remount
/// with new definitions) clears them.
pub struct ColumnRegistry<R> {
    columns: Vec<Column<R>>,
    width_overrides: HashMap<String, f32>,
    default_width: f32,

    /// Bumped on every order or visibility change.
    revision: u64,
}

impl<R> ColumnRegistry<R> {
    pub fn new(columns: Vec<Column<R>>) -> Result<Self, GridError> {
        Self::with_default_width(columns, DEFAULT_COLUMN_WIDTH)
    }

    pub fn with_default_width(
        columns: Vec<Column<R>>,
        default_width: f32,
    ) -> Result<Self, GridError> {
        check_unique_ids(&columns)?;

        Ok(Self {
            columns,
            width_overrides: HashMap::new(),
            default_width,
            revision: 0,
        })
    }

    /// Remount with new definitions. Width overrides are discarded.
    pub fn replace_columns(&mut self, columns: Vec<Column<R>>) -> Result<(), GridError> {
        check_unique_ids(&columns)?;

        self.columns = columns;
        self.width_overrides.clear();
        self.revision += 1;
        Ok(())
    }

    // --- Lookup ---

    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column(&self, id: &str) -> Option<&Column<R>> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id == id)
    }

    pub fn ids(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.id.clone()).collect()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    // --- Widths ---

    pub fn default_width(&self) -> f32 {
        self.default_width
    }

    pub fn width_override(&self, id: &str) -> Option<f32> {
        self.width_overrides.get(id).copied()
    }

    /// Record a user width. Returns false for unknown ids.
    pub fn set_width_override(&mut self, id: &str, width: f32) -> bool {
        if self.column(id).is_none() {
            log::warn!("[RESIZE] Ignoring width override for unknown column {}", id);
            return false;
        }

        self.width_overrides.insert(id.to_string(), width);
        true
    }

    /// Override, else declared width, else the registry default.
    pub fn effective_width(&self, id: &str) -> f32 {
        if let Some(width) = self.width_override(id) {
            return width;
        }

        self.column(id)
            .and_then(|c| c.width)
            .unwrap_or(self.default_width)
    }

    // --- Order & visibility ---

    /// Reorder columns to match `ids`, which must be a permutation of the
    /// current ids. On error the registry is left untouched.
    pub fn apply_order(&mut self, ids: &[String]) -> Result<(), GridError> {
        if ids.len() != self.columns.len() {
            return Err(GridError::invalid_order(format!(
                "expected {} ids, got {}",
                self.columns.len(),
                ids.len()
            )));
        }

        let mut seen = HashSet::with_capacity(ids.len());
        for id in ids {
            if !seen.insert(id.as_str()) {
                return Err(GridError::invalid_order(format!("duplicate id {}", id)));
            }
            if self.column(id).is_none() {
                return Err(GridError::UnknownColumn(id.clone()));
            }
        }

        let mut remaining: Vec<Option<Column<R>>> = self.columns.drain(..).map(Some).collect();
        let mut reordered = Vec::with_capacity(ids.len());

        for id in ids {
            let slot = remaining
                .iter_mut()
                .find(|slot| slot.as_ref().is_some_and(|c| &c.id == id));

            if let Some(column) = slot.and_then(Option::take) {
                reordered.push(column);
            }
        }

        self.columns = reordered;
        self.revision += 1;
        Ok(())
    }

    /// Returns false for unknown ids or when nothing changed.
    pub fn set_visible(&mut self, id: &str, visible: bool) -> bool {
        let Some(column) = self.columns.iter_mut().find(|c| c.id == id) else {
            return false;
        };

        if column.visible == visible {
            return false;
        }

        column.visible = visible;
        self.revision += 1;
        true
    }
}

fn check_unique_ids<R>(columns: &[Column<R>]) -> Result<(), GridError> {
    let mut seen = HashSet::with_capacity(columns.len());

    for column in columns {
        if !seen.insert(column.id.as_str()) {
            return Err(GridError::DuplicateColumn(column.id.clone()));
        }
    }

    Ok(())
}
