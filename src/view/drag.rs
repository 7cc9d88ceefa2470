use crate::model::{Status, TaskId};
use crate::view::projector::DropTarget;
use crate::view::reorder::{ItemBounds, insert_before};

/// Where a single drag currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        task_id: TaskId,
        origin: DropTarget,
    },
}

/// Outcome of a drop on a valid list: what the store should apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropResolution {
    pub task_id: TaskId,
    pub target: DropTarget,
    /// Status implied by the target list
    pub status: Status,
    /// Sibling to insert in front of; `None` appends
    pub before: Option<TaskId>,
}

/// Per-drag state machine: idle → dragging → resolved → idle.
///
/// Dropping outside any list, or cancelling, goes straight back to idle
/// without producing a resolution.
#[derive(Debug, Clone, Default)]
pub struct DragSession {
    state: DragState,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn dragged(&self) -> Option<TaskId> {
        match self.state {
            DragState::Dragging { task_id, .. } => Some(task_id),
            DragState::Idle => None,
        }
    }

    pub fn start(&mut self, task_id: TaskId, origin: DropTarget) {
        self.state = DragState::Dragging { task_id, origin };
    }

    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    /// Finish the drag. `target` is the list under the pointer (if any) and
    /// `siblings` the rendered bounds of that list's cards.
    pub fn drop(
        &mut self,
        target: Option<DropTarget>,
        siblings: &[ItemBounds],
        pointer_y: f64,
    ) -> Option<DropResolution> {
        let DragState::Dragging { task_id, .. } = std::mem::take(&mut self.state) else {
            return None;
        };
        let target = target?;
        let others: Vec<ItemBounds> = siblings
            .iter()
            .filter(|b| b.task_id != task_id)
            .copied()
            .collect();
        Some(DropResolution {
            task_id,
            target,
            status: target.status(),
            before: insert_before(&others, pointer_y),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::projector::Quadrant;

    #[test]
    fn drop_without_drag_is_ignored() {
        let mut session = DragSession::new();
        assert_eq!(session.drop(Some(DropTarget::Column(Status::Done)), &[], 0.0), None);
    }

    #[test]
    fn drop_on_quadrant_resolves_status_and_position() {
        let mut session = DragSession::new();
        session.start(7, DropTarget::Column(Status::Backlog));
        assert!(session.is_dragging());
        let siblings = [
            ItemBounds::new(7, 0.0, 2.0),
            ItemBounds::new(8, 2.0, 2.0),
            ItemBounds::new(9, 4.0, 2.0),
        ];
        let res = session
            .drop(
                Some(DropTarget::Quadrant(Quadrant::UrgentImportant)),
                &siblings,
                3.5,
            )
            .unwrap();
        assert_eq!(res.task_id, 7);
        assert_eq!(res.status, Status::Todo);
        assert_eq!(res.before, Some(9));
        assert_eq!(session.state(), DragState::Idle);
    }

    #[test]
    fn dragged_item_is_not_its_own_anchor() {
        let mut session = DragSession::new();
        session.start(1, DropTarget::Column(Status::Todo));
        let siblings = [ItemBounds::new(1, 10.0, 2.0)];
        let res = session
            .drop(Some(DropTarget::Column(Status::Todo)), &siblings, 0.0)
            .unwrap();
        assert_eq!(res.before, None);
    }

    #[test]
    fn drop_outside_targets_cancels() {
        let mut session = DragSession::new();
        session.start(3, DropTarget::Column(Status::Todo));
        assert_eq!(session.drop(None, &[], 0.0), None);
        assert_eq!(session.state(), DragState::Idle);
    }

    #[test]
    fn cancel_returns_to_idle() {
        let mut session = DragSession::new();
        session.start(3, DropTarget::Column(Status::Todo));
        session.cancel();
        assert_eq!(session.dragged(), None);
    }
}
