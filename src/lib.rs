//! orbit: a kanban and priority-matrix task board.
//!
//! The library core is the [`ops::Store`] (boards, tasks, undo history),
//! the [`view`] projections (kanban columns, matrix quadrants, drag-and-drop
//! resolution) and the [`io::storage`] backends. The `orbit` binary wraps it
//! in a CLI and a terminal UI.

pub mod cli;
pub mod io;
pub mod logging;
pub mod model;
pub mod ops;
pub mod tui;
pub mod util;
pub mod view;
