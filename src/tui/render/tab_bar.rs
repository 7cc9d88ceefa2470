use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::View;
use crate::tui::app::App;
use crate::util::unicode;

use super::spans_width;

/// Render the board dock: one tab per board, separator line below
pub fn render_tab_bar(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // tabs
            Constraint::Length(1), // separator
        ])
        .split(area);

    let sep_cols = render_tabs(frame, app, chunks[0]);
    render_separator(frame, app, chunks[1], &sep_cols);
}

/// Render tabs, record their hit areas, and return the column of each
/// separator character.
fn render_tabs(frame: &mut Frame, app: &mut App, area: Rect) -> Vec<usize> {
    let theme = &app.theme;
    let bg_style = Style::default().bg(theme.background);
    let sep = Span::styled("\u{2502}", Style::default().fg(theme.dim).bg(theme.background));

    let mut spans: Vec<Span> = vec![
        Span::styled(" ", bg_style),
        Span::styled("\u{25C6}", Style::default().fg(theme.highlight).bg(theme.background)),
        Span::styled(" ", bg_style),
    ];
    let mut sep_cols = Vec::new();
    let mut tabs = Vec::new();

    let state = app.store.state();
    let max_name = (area.width as usize / state.boards.len().max(1)).clamp(4, 24);
    for board in &state.boards {
        let is_current = board.id == state.active_board_id;
        let label = format!(" {} ", unicode::truncate_to_width(&board.name, max_name));
        let start = spans_width(&spans);
        let width = unicode::display_width(&label);
        if start + width > area.width as usize {
            break;
        }
        tabs.push((
            board.id,
            Rect::new(area.x + start as u16, area.y, width as u16, 1),
        ));
        spans.push(Span::styled(label, tab_style(app, is_current)));
        sep_cols.push(spans_width(&spans));
        spans.push(sep.clone());
    }

    // View name, right-aligned
    let view_label = match state.view {
        View::Kanban => " kanban ",
        View::Matrix => " matrix ",
    };
    let used = spans_width(&spans);
    let label_width = unicode::display_width(view_label);
    if used + label_width < area.width as usize {
        spans.push(Span::styled(
            " ".repeat(area.width as usize - used - label_width),
            bg_style,
        ));
        spans.push(Span::styled(view_label, Style::default().fg(theme.dim).bg(theme.background)));
    }

    let tabs_widget = Paragraph::new(Line::from(spans)).style(bg_style);
    frame.render_widget(tabs_widget, area);
    app.layout.tabs = tabs;
    sep_cols
}

fn render_separator(frame: &mut Frame, app: &App, area: Rect, sep_cols: &[usize]) {
    let line: String = (0..area.width as usize)
        .map(|col| {
            if sep_cols.contains(&col) {
                '\u{2534}'
            } else {
                '\u{2500}'
            }
        })
        .collect();
    let sep_widget =
        Paragraph::new(line).style(Style::default().fg(app.theme.dim).bg(app.theme.background));
    frame.render_widget(sep_widget, area);
}

/// Style for a tab: highlighted if current, normal otherwise
fn tab_style(app: &App, is_current: bool) -> Style {
    if is_current {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.selection_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text).bg(app.theme.background)
    }
}
