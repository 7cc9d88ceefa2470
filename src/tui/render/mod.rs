pub mod board_view;
pub mod help_overlay;
pub mod popups;
pub mod status_row;
pub mod tab_bar;

#[cfg(test)]
pub(crate) mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Block;

use crate::util::unicode;

use super::app::{App, Mode};

/// Draw one frame: tab dock, board, status row, then any overlay
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: tab dock (2 rows, optional) | board | status row (1 row)
    let dock_height = if app.store.state().prefs.show_tabs_dock {
        2
    } else {
        0
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(dock_height),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    app.layout.tabs.clear();
    if dock_height > 0 {
        tab_bar::render_tab_bar(frame, app, chunks[0]);
    }
    board_view::render_board(frame, app, chunks[1]);
    status_row::render_status_row(frame, app, chunks[2]);

    // Overlays on top of everything
    match app.mode {
        Mode::Navigate => {}
        Mode::Help => help_overlay::render_help_overlay(frame, app, area),
        Mode::TaskForm => popups::render_task_form(frame, app, area),
        Mode::NameForm => popups::render_name_form(frame, app, area),
        Mode::Confirm => popups::render_confirm(frame, app, area),
        Mode::Settings => popups::render_settings(frame, app, area),
    }
}

/// Create a centered rectangle of the given percentage of the parent
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// A rectangle of fixed size centered in `area`, clamped to fit
pub(super) fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}
