use crossterm::event::{KeyCode, KeyEvent};

use crate::ops::StoreError;
use crate::tui::app::{App, ConfirmAction, Mode};

/// Ask before a destructive action. Deleting the last board is refused
/// up front instead of prompting.
pub(super) fn open_confirm(app: &mut App, action: ConfirmAction) {
    if matches!(action, ConfirmAction::DeleteBoard(_)) && app.store.state().boards.len() <= 1 {
        app.set_status(StoreError::LastBoard.to_string());
        return;
    }
    app.confirm = Some(action);
    app.mode = Mode::Confirm;
}

pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            let action = app.confirm.take();
            app.mode = Mode::Navigate;
            if let Some(action) = action {
                apply(app, action);
            }
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.confirm = None;
            app.mode = Mode::Navigate;
        }
        _ => {}
    }
}

fn apply(app: &mut App, action: ConfirmAction) {
    match action {
        ConfirmAction::DeleteBoard(id) => match app.store.delete_board(id) {
            Ok(_) => {
                app.focus = None;
                app.set_status("Deleted board (Ctrl+Z to undo)");
            }
            Err(e) => app.set_status(e.to_string()),
        },
        ConfirmAction::ClearBoard => {
            app.store.clear_board();
            app.focus = None;
            app.set_status("Cleared board (Ctrl+Z to undo)");
        }
        ConfirmAction::ResetAll => match app.store.reset_all() {
            Ok(()) => {
                app.focus = None;
                app.set_status("All data reset");
            }
            Err(e) => app.set_status(format!("reset failed: {}", e)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Status;
    use crate::tui::input::common::test_keys::*;
    use crate::tui::render::test_helpers::app_with_tasks;

    #[test]
    fn last_board_is_refused_without_prompt() {
        let mut app = app_with_tasks(&[]);
        let id = app.store.state().active_board_id;
        open_confirm(&mut app, ConfirmAction::DeleteBoard(id));
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(
            app.status_message.as_deref(),
            Some("You must have at least one board.")
        );
    }

    #[test]
    fn yes_deletes_board() {
        let mut app = app_with_tasks(&[]);
        let work = app.store.create_board("Work").unwrap();
        open_confirm(&mut app, ConfirmAction::DeleteBoard(work));
        assert_eq!(app.mode, Mode::Confirm);
        ch(&mut app, 'y');
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.store.state().boards.len(), 1);
    }

    #[test]
    fn no_keeps_everything() {
        let mut app = app_with_tasks(&[("a", Status::Todo)]);
        open_confirm(&mut app, ConfirmAction::ClearBoard);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.confirm, None);
        assert_eq!(app.store.active_board().tasks.len(), 1);
    }

    #[test]
    fn clear_board_is_undoable() {
        let mut app = app_with_tasks(&[("a", Status::Todo), ("b", Status::Done)]);
        open_confirm(&mut app, ConfirmAction::ClearBoard);
        press(&mut app, KeyCode::Enter);
        assert!(app.store.active_board().tasks.is_empty());
        assert!(app.store.undo());
        assert_eq!(app.store.active_board().tasks.len(), 2);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut app = app_with_tasks(&[("a", Status::Todo)]);
        app.store.create_board("Work");
        open_confirm(&mut app, ConfirmAction::ResetAll);
        ch(&mut app, 'y');
        assert_eq!(app.store.state().boards.len(), 1);
        assert!(app.store.active_board().tasks.is_empty());
        assert_eq!(app.status_message.as_deref(), Some("All data reset"));
    }
}
