use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::{Status, TaskId, View};
use crate::tui::app::{App, Mode, NamePurpose};
use crate::view::DropTarget;

use super::*;

/// Direction of a focus or card move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Dir {
    Left,
    Right,
    Up,
    Down,
}

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    app.status_message = None;

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('z') => undo(app),
            KeyCode::Char('c') | KeyCode::Char('q') => app.should_quit = true,
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') | KeyCode::Char('/') => app.mode = Mode::Help,
        KeyCode::Char('`') | KeyCode::Char('~') => {
            if app.store.cycle_board() {
                app.focus = None;
            }
        }
        KeyCode::Char('m') => {
            app.store.toggle_view();
            if let Some(id) = app.focus {
                app.focus_task(id);
            }
        }
        KeyCode::Char('t') => {
            app.store.toggle_theme();
        }
        KeyCode::Char('s') => {
            app.settings_cursor = 0;
            app.mode = Mode::Settings;
        }
        KeyCode::Char('o') => app.export(),
        KeyCode::Char('i') => open_name_form(app, NamePurpose::ImportPath, ""),
        KeyCode::Char('b') => open_name_form(app, NamePurpose::NewBoard, ""),
        KeyCode::Char('n') => open_create_form(app, Status::Todo),
        KeyCode::Char('a') => {
            let status = app.focused_target().status();
            open_create_form(app, status);
        }
        KeyCode::Enter => open_edit_form(app),
        KeyCode::Char(' ') => check_next_subtask(app),
        KeyCode::Delete | KeyCode::Backspace => delete_focused(app),
        KeyCode::Tab => cycle_focus(app, true),
        KeyCode::BackTab => cycle_focus(app, false),
        KeyCode::Left | KeyCode::Char('h') => move_focus(app, Dir::Left),
        KeyCode::Right | KeyCode::Char('l') => move_focus(app, Dir::Right),
        KeyCode::Up | KeyCode::Char('k') => move_focus(app, Dir::Up),
        KeyCode::Down | KeyCode::Char('j') => move_focus(app, Dir::Down),
        KeyCode::Char('H') => move_card_across(app, Dir::Left),
        KeyCode::Char('L') => move_card_across(app, Dir::Right),
        KeyCode::Char('K') => move_card_within(app, Dir::Up),
        KeyCode::Char('J') => move_card_within(app, Dir::Down),
        KeyCode::Esc => {
            app.drag.cancel();
            app.focus = None;
        }
        _ => {}
    }
}

fn undo(app: &mut App) {
    if app.store.undo() {
        app.set_status("Undone");
    } else {
        app.set_status("Nothing to undo");
    }
}

/// The list next to `list` in `dir`. Kanban columns form one row; the
/// matrix is a 2x2 grid.
pub(super) fn neighbor_list(view: View, list: usize, dir: Dir) -> Option<usize> {
    match (view, dir) {
        (View::Kanban, Dir::Left) => list.checked_sub(1),
        (View::Kanban, Dir::Right) => Some(list + 1).filter(|&n| n < 4),
        (View::Kanban, Dir::Up | Dir::Down) => None,
        (View::Matrix, Dir::Left) => (list % 2 == 1).then(|| list - 1),
        (View::Matrix, Dir::Right) => (list % 2 == 0).then_some(list + 1),
        (View::Matrix, Dir::Up) => list.checked_sub(2),
        (View::Matrix, Dir::Down) => Some(list + 2).filter(|&n| n < 4),
    }
}

/// Task ids of each list, in display order
fn list_ids(app: &App) -> Vec<Vec<TaskId>> {
    app.projection()
        .groups
        .iter()
        .map(|g| g.tasks.iter().map(|t| t.id).collect())
        .collect()
}

/// Focused (list, row), falling back to the focused list with no row
fn cursor(app: &App, lists: &[Vec<TaskId>]) -> (usize, Option<usize>) {
    let list = app.focus_list.min(3);
    match app.focus {
        Some(id) => lists
            .iter()
            .enumerate()
            .find_map(|(li, ids)| ids.iter().position(|&t| t == id).map(|row| (li, Some(row))))
            .unwrap_or((list, None)),
        None => (list, None),
    }
}

fn focus_list_row(app: &mut App, lists: &[Vec<TaskId>], list: usize, row: usize) {
    app.focus_list = list;
    let ids = &lists[list];
    app.focus = ids.get(row.min(ids.len().saturating_sub(1))).copied();
}

pub(super) fn move_focus(app: &mut App, dir: Dir) {
    let lists = list_ids(app);
    let view = app.store.state().view;
    let (list, row) = cursor(app, &lists);
    let len = lists[list].len();

    match (dir, row) {
        (Dir::Up, Some(r)) if r > 0 => focus_list_row(app, &lists, list, r - 1),
        (Dir::Down, Some(r)) if r + 1 < len => focus_list_row(app, &lists, list, r + 1),
        (Dir::Down, None) if len > 0 => focus_list_row(app, &lists, list, 0),
        (Dir::Up, None) if len > 0 => focus_list_row(app, &lists, list, len - 1),
        _ => {
            if let Some(next) = neighbor_list(view, list, dir) {
                let target_row = match dir {
                    Dir::Up => usize::MAX,
                    Dir::Down => 0,
                    Dir::Left | Dir::Right => row.unwrap_or(0),
                };
                focus_list_row(app, &lists, next, target_row);
            }
        }
    }
}

/// Tab order: every card of the board in display order, wrapping
fn cycle_focus(app: &mut App, forward: bool) {
    let ids: Vec<TaskId> = app.projection().cards().map(|t| t.id).collect();
    if ids.is_empty() {
        return;
    }
    let next = match app.focus.and_then(|id| ids.iter().position(|&t| t == id)) {
        Some(i) if forward => (i + 1) % ids.len(),
        Some(i) => (i + ids.len() - 1) % ids.len(),
        None if forward => 0,
        None => ids.len() - 1,
    };
    app.focus_task(ids[next]);
}

/// Move the focused card to the end of the previous/next list
fn move_card_across(app: &mut App, dir: Dir) {
    let Some(id) = app.focus else {
        return;
    };
    let lists = list_ids(app);
    let (list, _) = cursor(app, &lists);
    let next = match dir {
        Dir::Left => list.checked_sub(1),
        _ => Some(list + 1).filter(|&n| n < 4),
    };
    let Some(next) = next else {
        return;
    };
    let target = DropTarget::all(app.store.state().view)[next];
    if app.store.move_task_before(id, target.status(), None) {
        app.focus_task(id);
    }
}

/// Swap the focused card with its neighbor in the same list
fn move_card_within(app: &mut App, dir: Dir) {
    let Some(id) = app.focus else {
        return;
    };
    let lists = list_ids(app);
    let (list, Some(row)) = cursor(app, &lists) else {
        return;
    };
    let ids = &lists[list];
    let status = DropTarget::all(app.store.state().view)[list].status();
    let before = match dir {
        Dir::Up if row > 0 => Some(ids[row - 1]),
        // Past the next sibling: before the one after it, or the end
        Dir::Down if row + 1 < ids.len() => ids.get(row + 2).copied(),
        _ => return,
    };
    if app.store.move_task_before(id, status, before) {
        app.focus_task(id);
    }
}

fn delete_focused(app: &mut App) {
    let Some(id) = app.focus else {
        return;
    };
    let lists = list_ids(app);
    let (list, row) = cursor(app, &lists);
    if app.store.delete_task(id) {
        let lists = list_ids(app);
        focus_list_row(app, &lists, list, row.unwrap_or(0));
        app.set_status("Deleted task (Ctrl+Z to undo)");
    }
}

/// Check off the first open subtask of the focused card
fn check_next_subtask(app: &mut App) {
    let Some(task) = app.focus.and_then(|id| app.store.active_board().task(id)) else {
        return;
    };
    let (id, total) = (task.id, task.subtasks.len());
    match task.subtasks.iter().position(|s| !s.completed) {
        Some(index) => {
            app.store.toggle_subtask(id, index);
        }
        None if total > 0 => app.set_status("All subtasks done"),
        None => {}
    }
}
