use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

use super::centered_rect;

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let overlay_area = centered_rect(60, 80, area);
    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(" Key Bindings", header_style)));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Cards", header_style)));
    add_binding(&mut lines, " \u{2190}\u{2191}\u{2193}\u{2192}/hjkl", "Move focus", key_style, desc_style);
    add_binding(&mut lines, " Tab/S-Tab", "Next/previous card", key_style, desc_style);
    add_binding(&mut lines, " H/L", "Move card to prev/next list", key_style, desc_style);
    add_binding(&mut lines, " J/K", "Move card down/up", key_style, desc_style);
    add_binding(&mut lines, " n", "New task (To Do)", key_style, desc_style);
    add_binding(&mut lines, " a", "New task in focused list", key_style, desc_style);
    add_binding(&mut lines, " Enter", "Edit task", key_style, desc_style);
    add_binding(&mut lines, " Space", "Check next subtask", key_style, desc_style);
    add_binding(&mut lines, " Del/Bksp", "Delete task", key_style, desc_style);
    add_binding(&mut lines, " Ctrl+Z", "Undo", key_style, desc_style);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Boards & View", header_style)));
    add_binding(&mut lines, " `", "Next board", key_style, desc_style);
    add_binding(&mut lines, " b", "New board", key_style, desc_style);
    add_binding(&mut lines, " m", "Kanban / matrix", key_style, desc_style);
    add_binding(&mut lines, " t", "Light / dark theme", key_style, desc_style);
    add_binding(&mut lines, " o / i", "Export / import backup", key_style, desc_style);
    add_binding(&mut lines, " s", "Settings", key_style, desc_style);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Mouse", header_style)));
    add_binding(&mut lines, " drag card", "Move to list and position", key_style, desc_style);
    add_binding(&mut lines, " click tab", "Switch board", key_style, desc_style);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Global", header_style)));
    add_binding(&mut lines, " ?", "Toggle this help", key_style, desc_style);
    add_binding(&mut lines, " q", "Quit", key_style, desc_style);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    let padded_key = format!("{:<width$}", key, width = 16);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}
