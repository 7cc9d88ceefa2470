use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode;

use super::spans_width;

const KEY_HINTS: &[(&str, &str)] = &[
    ("n", "add"),
    ("m", "view"),
    ("t", "theme"),
    ("s", "settings"),
    ("?", "help"),
    ("q", "quit"),
];

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans: Vec<Span> = vec![Span::styled(" ", Style::default().bg(bg))];
    if let Some(ref msg) = app.status_message {
        spans.push(Span::styled(
            unicode::truncate_to_width(msg, width.saturating_sub(2)),
            Style::default().fg(app.theme.yellow).bg(bg),
        ));
    } else if app.drag.is_dragging() {
        spans.push(Span::styled(
            "drop on a list to move",
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
    } else if app.store.state().prefs.show_ui_buttons {
        for (key, label) in KEY_HINTS {
            spans.push(Span::styled(*key, Style::default().fg(app.theme.highlight).bg(bg)));
            spans.push(Span::styled(
                format!(" {}  ", label),
                Style::default().fg(app.theme.dim).bg(bg),
            ));
        }
    }

    // Board name and view, right-aligned
    let state = app.store.state();
    let right = format!(" {} \u{00B7} {} ", state.active_board().name, state.view.as_str());
    let used = spans_width(&spans);
    let right_width = unicode::display_width(&right);
    if used + right_width <= width {
        spans.push(Span::styled(
            " ".repeat(width - used - right_width),
            Style::default().bg(bg),
        ));
        spans.push(Span::styled(right, Style::default().fg(app.theme.dim).bg(bg)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
