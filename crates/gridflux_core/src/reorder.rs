use serde::{Deserialize, Serialize};

use crate::ColumnRegistry;

/// When a drag-over turns into a committed column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReorderMode {
    /// Every drag-over of a new target commits and notifies immediately.
    #[default]
    LiveCommit,
    /// Drag-over only moves a preview; drop commits once.
    CommitOnDrop,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ReorderState {
    #[default]
    Idle,
    Dragging {
        column_id: String,
        last_target: Option<String>,
        preview: Option<Vec<String>>,
    },
}

/// Move `dragged` to the index `target` occupies in `order`.
///
/// Returns None when either id is missing or both are the same column.
pub fn splice_order(order: &[String], dragged: &str, target: &str) -> Option<Vec<String>> {
    if dragged == target {
        return None;
    }

    let from = order.iter().position(|id| id == dragged)?;
    let to = order.iter().position(|id| id == target)?;

    let mut next = order.to_vec();
    let moved = next.remove(from);
    next.insert(to, moved);
    Some(next)
}

/// Drag state machine for header reordering.
#[derive(Debug, Clone, Default)]
pub struct ReorderController {
    mode: ReorderMode,
    state: ReorderState,
}

impl ReorderController {
    pub fn new(mode: ReorderMode) -> Self {
        Self {
            mode,
            state: ReorderState::Idle,
        }
    }

    pub fn mode(&self) -> ReorderMode {
        self.mode
    }

    pub fn state(&self) -> &ReorderState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, ReorderState::Dragging { .. })
    }

    pub fn dragged_column(&self) -> Option<&str> {
        match &self.state {
            ReorderState::Dragging { column_id, .. } => Some(column_id.as_str()),
            ReorderState::Idle => None,
        }
    }

    /// Uncommitted order shown while dragging in `CommitOnDrop` mode.
    pub fn preview(&self) -> Option<&[String]> {
        match &self.state {
            ReorderState::Dragging {
                preview: Some(order),
                ..
            } => Some(order.as_slice()),
            _ => None,
        }
    }

    pub fn drag_start<R>(
        &mut self,
        registry: &ColumnRegistry<R>,
        column_id: &str,
        table_reorderable: bool,
    ) -> bool {
        if !table_reorderable {
            log::trace!("[REORDER] Reordering disabled, ignoring {}", column_id);
            return false;
        }

        if registry.column(column_id).is_none() {
            log::warn!("[REORDER] Unknown column {}", column_id);
            return false;
        }

        log::debug!("[REORDER] Drag start {} ({:?})", column_id, self.mode);
        self.state = ReorderState::Dragging {
            column_id: column_id.to_string(),
            last_target: None,
            preview: None,
        };
        true
    }

    /// Drag-over on `target`'s header. In `LiveCommit` mode returns the newly
    /// committed order; in `CommitOnDrop` mode only the preview moves and
    /// this returns None.
    ///
    /// Repeated drag-over events for the target just committed are ignored
    /// until the pointer leaves it, otherwise the two columns would swap back
    /// and forth on every tick. Hovering the dragged column's own header
    /// counts as leaving.
    pub fn drag_over<R>(
        &mut self,
        registry: &mut ColumnRegistry<R>,
        target: &str,
    ) -> Option<Vec<String>> {
        let mode = self.mode;
        let ReorderState::Dragging {
            column_id,
            last_target,
            preview,
        } = &mut self.state
        else {
            return None;
        };

        if column_id == target {
            *last_target = None;
            return None;
        }

        if last_target.as_deref() == Some(target) {
            return None;
        }

        let current = match preview {
            Some(order) => order.clone(),
            None => registry.ids(),
        };

        let Some(next) = splice_order(&current, column_id, target) else {
            log::warn!("[REORDER] Cannot move {} over {}", column_id, target);
            return None;
        };

        *last_target = Some(target.to_string());

        match mode {
            ReorderMode::LiveCommit => {
                if let Err(e) = registry.apply_order(&next) {
                    log::warn!("[REORDER] Commit failed: {}", e);
                    return None;
                }
                log::debug!("[REORDER] {} over {} -> {:?}", column_id, target, next);
                Some(next)
            }
            ReorderMode::CommitOnDrop => {
                log::trace!("[REORDER] Preview {:?}", next);
                *preview = Some(next);
                None
            }
        }
    }

    /// Drop on a header. Commits the preview in `CommitOnDrop` mode and
    /// returns the new order; in `LiveCommit` mode the order is already
    /// committed and this returns None.
    pub fn drop<R>(&mut self, registry: &mut ColumnRegistry<R>) -> Option<Vec<String>> {
        let ReorderState::Dragging { preview, .. } = &mut self.state else {
            return None;
        };

        let order = preview.take()?;
        match registry.apply_order(&order) {
            Ok(()) => {
                log::debug!("[REORDER] Dropped -> {:?}", order);
                Some(order)
            }
            Err(e) => {
                log::warn!("[REORDER] Drop commit failed: {}", e);
                None
            }
        }
    }

    /// Drag-end, with or without a drop. Any uncommitted preview is
    /// discarded. Returns true if a drag was active.
    pub fn drag_end(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            ReorderState::Dragging {
                column_id, preview, ..
            } => {
                if preview.is_some() {
                    log::debug!("[REORDER] Discarded preview for {}", column_id);
                } else {
                    log::debug!("[REORDER] Drag end {}", column_id);
                }
                true
            }
            ReorderState::Idle => false,
        }
    }
}
