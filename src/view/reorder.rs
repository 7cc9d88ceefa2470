//! Insertion-point geometry for drag-and-drop.
//!
//! Works on plain vertical bounds so any front end (terminal rows, pixels)
//! can feed it whatever it last rendered.

use crate::model::TaskId;

/// Vertical extent of one rendered sibling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemBounds {
    pub task_id: TaskId,
    pub top: f64,
    pub height: f64,
}

impl ItemBounds {
    pub fn new(task_id: TaskId, top: f64, height: f64) -> Self {
        ItemBounds {
            task_id,
            top,
            height,
        }
    }

    fn midpoint(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// The sibling the dragged task should be inserted in front of, or `None`
/// for the end of the list.
///
/// Picks the sibling whose midpoint is below the pointer and closest to it
/// (the largest negative `pointer_y - midpoint`). `siblings` must not
/// include the dragged item itself.
pub fn insert_before(siblings: &[ItemBounds], pointer_y: f64) -> Option<TaskId> {
    siblings
        .iter()
        .map(|item| (pointer_y - item.midpoint(), item.task_id))
        .filter(|(offset, _)| *offset < 0.0)
        .fold(None, |closest: Option<(f64, TaskId)>, (offset, id)| match closest {
            Some((best, _)) if best >= offset => closest,
            _ => Some((offset, id)),
        })
        .map(|(_, id)| id)
}
