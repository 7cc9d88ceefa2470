mod common;
mod confirm;
mod forms;
mod mouse;
mod navigate;
mod settings;

use crossterm::event::{KeyCode, KeyEvent, MouseEvent};

use super::app::{App, Mode};

// Submodules reach each other's handlers through `use super::*;`
#[allow(unused_imports)]
use common::*;
#[allow(unused_imports)]
use confirm::*;
#[allow(unused_imports)]
use forms::*;
#[allow(unused_imports)]
use mouse::*;
#[allow(unused_imports)]
use navigate::*;
#[allow(unused_imports)]
use settings::*;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    let key = normalize_key(key);
    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::TaskForm => handle_task_form(app, key),
        Mode::NameForm => handle_name_form(app, key),
        Mode::Confirm => handle_confirm(app, key),
        Mode::Settings => handle_settings(app, key),
        Mode::Help => handle_help(app, key),
    }
}

fn handle_help(app: &mut App, key: KeyEvent) {
    if matches!(
        key.code,
        KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('/') | KeyCode::Char('q')
    ) {
        app.mode = Mode::Navigate;
    }
}

/// Handle a mouse event against the last rendered layout
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    handle_pointer(app, mouse);
}

/// Handle a bracketed paste event. Only text prompts take it; newlines
/// become spaces since every field is a single line.
pub fn handle_paste(app: &mut App, text: &str) {
    match app.mode {
        Mode::TaskForm => {
            if let Some(form) = app.task_form.as_mut() {
                form.current_input_mut().insert_str(text);
            }
        }
        Mode::NameForm => {
            if let Some(form) = app.name_form.as_mut() {
                form.input.insert_str(text);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::common::test_keys::*;
    use super::*;
    use crate::tui::render::test_helpers::{app_with_tasks, render_app};

    #[test]
    fn help_opens_and_closes() {
        let mut app = app_with_tasks(&[]);
        ch(&mut app, '?');
        assert_eq!(app.mode, Mode::Help);
        assert!(render_app(&mut app).contains("Key Bindings"));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Navigate);
    }

    #[test]
    fn paste_is_ignored_while_navigating() {
        let mut app = app_with_tasks(&[]);
        handle_paste(&mut app, "n");
        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.store.active_board().tasks.is_empty());
    }

    #[test]
    fn full_screen_renders_board_and_status() {
        let mut app = app_with_tasks(&[("Buy milk", crate::model::Status::Todo)]);
        let out = render_app(&mut app);
        assert!(out.contains("My Board"));
        assert!(out.contains("To Do (1)"));
        assert!(out.contains("Buy milk"));
        assert!(out.contains("q quit"));
    }
}
