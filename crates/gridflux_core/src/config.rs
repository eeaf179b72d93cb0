use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::{
    ContainerHeight, DEFAULT_COLUMN_WIDTH, DEFAULT_ROW_HEIGHT, FALLBACK_CONTAINER_HEIGHT,
    GridError, MIN_COLUMN_WIDTH, ReorderMode, SortOwnership,
};

/// Table-wide options for a `DataGrid`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub virtualized: bool,
    pub row_height: f32,
    pub container_height: ContainerHeight,

    /// Used when `container_height` is a CSS size the engine cannot measure.
    pub fallback_container_height: f32,

    pub resizable: bool,
    pub sortable: bool,
    pub reorderable: bool,

    pub default_column_width: f32,
    pub min_resize_width: f32,

    /// Clamp resize drags to each column's `min_width`/`max_width`.
    pub honor_column_bounds: bool,

    pub reorder_mode: ReorderMode,
    pub sort_ownership: SortOwnership,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            virtualized: true,
            row_height: DEFAULT_ROW_HEIGHT,
            container_height: ContainerHeight::default(),
            fallback_container_height: FALLBACK_CONTAINER_HEIGHT,
            resizable: true,
            sortable: true,
            reorderable: true,
            default_column_width: DEFAULT_COLUMN_WIDTH,
            min_resize_width: MIN_COLUMN_WIDTH,
            honor_column_bounds: true,
            reorder_mode: ReorderMode::default(),
            sort_ownership: SortOwnership::default(),
        }
    }
}

impl GridConfig {
    pub fn from_json(json: &str) -> Result<Self, GridError> {
        let config: GridConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a config file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GridError> {
        let path = path.as_ref();

        if !path.exists() {
            log::debug!("No grid config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn validate(&self) -> Result<(), GridError> {
        check_positive("row_height", self.row_height)?;
        check_positive("fallback_container_height", self.fallback_container_height)?;
        check_positive("default_column_width", self.default_column_width)?;

        if !self.min_resize_width.is_finite() || self.min_resize_width < MIN_COLUMN_WIDTH {
            return Err(GridError::invalid_config(format!(
                "min_resize_width must be at least {}, got {}",
                MIN_COLUMN_WIDTH, self.min_resize_width
            )));
        }

        if let ContainerHeight::Pixels(height) = self.container_height {
            check_positive("container_height", height)?;
        }

        Ok(())
    }
}

fn check_positive(field: &str, value: f32) -> Result<(), GridError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GridError::invalid_config(format!(
            "{} must be positive, got {}",
            field, value
        )))
    }
}
