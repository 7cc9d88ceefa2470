use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::tui::app::{App, Mode};

/// Pointer input against the geometry of the last render: click a tab to
/// switch boards, press on a card to focus it and start a drag, release
/// over a list to drop.
pub(super) fn handle_pointer(app: &mut App, mouse: MouseEvent) {
    if app.mode != Mode::Navigate {
        return;
    }
    let (col, row) = (mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            app.status_message = None;
            if let Some(board) = app.layout.tab_at(col, row) {
                if app.store.switch_board(board) {
                    app.focus = None;
                }
                return;
            }
            if let Some((target, id)) = app.layout.card_at(col, row) {
                app.focus_task(id);
                app.drag.start(id, target);
                app.drag_moved = false;
                return;
            }
            if let Some(index) = app.layout.lists.iter().position(|l| {
                l.area.contains(ratatui::layout::Position::new(col, row))
            }) {
                app.focus_list = index;
                app.focus = None;
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if app.drag.is_dragging() {
                app.drag_moved = true;
            }
        }
        MouseEventKind::Up(MouseButton::Left) => finish_drag(app, col, row),
        _ => {}
    }
}

fn finish_drag(app: &mut App, col: u16, row: u16) {
    if !app.drag.is_dragging() {
        return;
    }
    if !app.drag_moved {
        // A press and release in place is a click
        app.drag.cancel();
        return;
    }
    app.drag_moved = false;

    let list = app.layout.list_at(col, row);
    let target = list.map(|l| l.target);
    let siblings = list.map(|l| l.bounds()).unwrap_or_default();
    // Top edge of the cell: dropping on a card's first row lands before it
    let pointer_y = row as f64;
    let Some(resolution) = app.drag.drop(target, &siblings, pointer_y) else {
        return;
    };
    if app.store.apply_drop(&resolution) {
        app.focus_task(resolution.task_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Status, View};
    use crate::tui::input::handle_mouse;
    use crate::tui::render::test_helpers::*;
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;

    fn mouse(app: &mut App, kind: MouseEventKind, col: u16, row: u16) {
        handle_mouse(
            app,
            MouseEvent {
                kind,
                column: col,
                row,
                modifiers: KeyModifiers::NONE,
            },
        );
        app.sync();
    }

    fn drag(app: &mut App, from: (u16, u16), to: (u16, u16)) {
        mouse(app, MouseEventKind::Down(MouseButton::Left), from.0, from.1);
        mouse(app, MouseEventKind::Drag(MouseButton::Left), to.0, to.1);
        mouse(app, MouseEventKind::Up(MouseButton::Left), to.0, to.1);
    }

    fn card_pos(app: &App, id: i64) -> (u16, u16) {
        app.layout
            .lists
            .iter()
            .flat_map(|l| l.cards.iter())
            .find(|c| c.task_id == id)
            .map(|c| (c.area.x + 2, c.area.y))
            .unwrap()
    }

    fn list_texts(app: &App, status: Status) -> Vec<String> {
        app.store
            .active_board()
            .tasks
            .iter()
            .filter(|t| t.status == status)
            .map(|t| t.text.clone())
            .collect()
    }

    #[test]
    fn drag_to_empty_column_changes_status() {
        let mut app = app_with_tasks(&[("a", Status::Todo), ("b", Status::Todo)]);
        render_app(&mut app);
        let from = card_pos(&app, 100);
        let done = app.layout.lists[3].area;
        drag(&mut app, from, (done.x + 3, done.y + 3));

        assert_eq!(list_texts(&app, Status::Done), vec!["a"]);
        assert_eq!(list_texts(&app, Status::Todo), vec!["b"]);
        assert_eq!(app.focus, Some(100));
        assert!(!app.drag.is_dragging());
    }

    #[test]
    fn drop_on_upper_half_inserts_before() {
        let mut app = app_with_tasks(&[
            ("a", Status::Todo),
            ("b", Status::Todo),
            ("c", Status::Todo),
        ]);
        render_app(&mut app);
        let from = card_pos(&app, 102);
        let onto = card_pos(&app, 100);
        drag(&mut app, from, onto);
        assert_eq!(list_texts(&app, Status::Todo), vec!["c", "a", "b"]);
    }

    #[test]
    fn drop_into_matrix_quadrant() {
        let mut app = app_with_tasks(&[("a", Status::Backlog)]);
        app.store.set_view(View::Matrix);
        app.sync();
        render_app(&mut app);
        let from = card_pos(&app, 100);
        let target = app.layout.lists[0].target;
        let area = app.layout.lists[0].area;
        drag(&mut app, from, (area.x + 3, area.y + 2));
        assert_eq!(
            app.store.active_board().task(100).unwrap().status,
            target.status()
        );
    }

    #[test]
    fn click_without_motion_only_focuses() {
        let mut app = app_with_tasks(&[("a", Status::Todo), ("b", Status::Todo)]);
        render_app(&mut app);
        let history = app.store.history_len();
        let at = card_pos(&app, 101);
        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), at.0, at.1);
        mouse(&mut app, MouseEventKind::Up(MouseButton::Left), at.0, at.1);
        assert_eq!(app.focus, Some(101));
        assert!(!app.drag.is_dragging());
        assert_eq!(app.store.history_len(), history);
    }

    #[test]
    fn drop_outside_lists_cancels() {
        let mut app = app_with_tasks(&[("a", Status::Todo)]);
        render_app(&mut app);
        let history = app.store.history_len();
        let from = card_pos(&app, 100);
        // Status row
        drag(&mut app, from, (5, TERM_H - 1));
        assert_eq!(list_texts(&app, Status::Todo), vec!["a"]);
        assert_eq!(app.store.history_len(), history);
        assert!(!app.drag.is_dragging());
    }

    #[test]
    fn click_tab_switches_board() {
        let mut app = app_with_tasks(&[]);
        let first = app.store.state().active_board_id;
        app.store.create_board("Work");
        app.sync();
        render_app(&mut app);
        let (_, tab) = app.layout.tabs[0];
        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), tab.x + 1, tab.y);
        assert_eq!(app.store.state().active_board_id, first);
    }
}
