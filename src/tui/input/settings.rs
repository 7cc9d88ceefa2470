use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, ConfirmAction, Mode, NamePurpose, SettingsItem};

use super::*;

pub(super) fn handle_settings(app: &mut App, key: KeyEvent) {
    let last = SettingsItem::ALL.len() - 1;
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.settings_cursor = app.settings_cursor.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.settings_cursor = (app.settings_cursor + 1).min(last);
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            let item = SettingsItem::ALL[app.settings_cursor.min(last)];
            activate(app, item);
        }
        KeyCode::Esc | KeyCode::Char('s') | KeyCode::Char('q') => app.mode = Mode::Navigate,
        _ => {}
    }
}

/// Run a settings row. Toggles stay in the panel; anything that opens a
/// prompt or acts on the board leaves it.
fn activate(app: &mut App, item: SettingsItem) {
    let state = app.store.state();
    let (show_tabs, show_buttons) = (state.prefs.show_tabs_dock, state.prefs.show_ui_buttons);
    let active = state.active_board_id;
    let active_name = state.active_board().name.clone();

    match item {
        SettingsItem::TabsDock => app.store.set_show_tabs_dock(!show_tabs),
        SettingsItem::UiButtons => app.store.set_show_ui_buttons(!show_buttons),
        SettingsItem::Theme => {
            app.store.toggle_theme();
        }
        SettingsItem::View => {
            app.store.toggle_view();
        }
        SettingsItem::RenameBoard => {
            open_name_form(app, NamePurpose::RenameBoard(active), &active_name)
        }
        SettingsItem::ClearBoard => open_confirm(app, ConfirmAction::ClearBoard),
        SettingsItem::DeleteBoard => open_confirm(app, ConfirmAction::DeleteBoard(active)),
        SettingsItem::Export => {
            app.export();
            app.mode = Mode::Navigate;
        }
        SettingsItem::Import => open_name_form(app, NamePurpose::ImportPath, ""),
        SettingsItem::ResetAll => open_confirm(app, ConfirmAction::ResetAll),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ThemeMode, View};
    use crate::tui::input::common::test_keys::*;
    use crate::tui::render::test_helpers::app_with_tasks;

    fn select(app: &mut App, item: SettingsItem) {
        ch(app, 's');
        let index = SettingsItem::ALL.iter().position(|i| *i == item).unwrap();
        for _ in 0..index {
            press(app, KeyCode::Down);
        }
        press(app, KeyCode::Enter);
    }

    #[test]
    fn toggles_stay_in_panel() {
        let mut app = app_with_tasks(&[]);
        select(&mut app, SettingsItem::TabsDock);
        assert!(!app.store.state().prefs.show_tabs_dock);
        assert_eq!(app.mode, Mode::Settings);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert!(!app.store.state().prefs.show_ui_buttons);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Navigate);
    }

    #[test]
    fn theme_and_view_rows() {
        let mut app = app_with_tasks(&[]);
        select(&mut app, SettingsItem::Theme);
        assert_eq!(app.store.state().theme, ThemeMode::Light);
        press(&mut app, KeyCode::Esc);
        select(&mut app, SettingsItem::View);
        assert_eq!(app.store.state().view, View::Matrix);
    }

    #[test]
    fn rename_prefills_current_name() {
        let mut app = app_with_tasks(&[]);
        select(&mut app, SettingsItem::RenameBoard);
        assert_eq!(app.mode, Mode::NameForm);
        let form = app.name_form.as_ref().unwrap();
        assert_eq!(form.input.text, "My Board");
        press_mod(
            &mut app,
            KeyCode::Char('u'),
            crossterm::event::KeyModifiers::CONTROL,
        );
        type_str(&mut app, "Home");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.store.active_board().name, "Home");
    }

    #[test]
    fn delete_board_asks_first() {
        let mut app = app_with_tasks(&[]);
        app.store.create_board("Work");
        select(&mut app, SettingsItem::DeleteBoard);
        assert_eq!(app.mode, Mode::Confirm);
        ch(&mut app, 'y');
        assert_eq!(app.store.state().boards.len(), 1);
        assert_eq!(app.store.active_board().name, "My Board");
    }

    #[test]
    fn cursor_stays_in_range() {
        let mut app = app_with_tasks(&[]);
        ch(&mut app, 's');
        for _ in 0..20 {
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.settings_cursor, SettingsItem::ALL.len() - 1);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.settings_cursor, SettingsItem::ALL.len() - 2);
    }
}
