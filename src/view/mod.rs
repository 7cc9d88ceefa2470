//! Pure projections of the board state: kanban/matrix grouping and
//! drag-and-drop resolution.

pub mod drag;
pub mod projector;
pub mod reorder;

pub use drag::{DragSession, DragState, DropResolution};
pub use projector::{DropTarget, Group, Projection, Quadrant, project, project_board};
pub use reorder::{ItemBounds, insert_before};
