use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, ConfirmAction, SettingsItem};
use crate::tui::line_input::LineInput;
use crate::util::unicode;

use super::centered_fixed;

const POPUP_WIDTH: u16 = 60;

/// Draw a bordered popup sized to its lines and return its inner area
fn draw_popup(frame: &mut Frame, app: &App, area: Rect, title: &str, lines: Vec<Line>) -> Rect {
    let bg = app.theme.background;
    let height = lines.len() as u16 + 2;
    let popup = centered_fixed(POPUP_WIDTH, height, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(bg));
    let inner = block.inner(popup);
    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, popup);
    inner
}

fn hint_line<'a>(app: &App, hints: &[(&'a str, &'a str)]) -> Line<'a> {
    let bg = app.theme.background;
    let mut spans = vec![Span::styled(" ", Style::default().bg(bg))];
    for (key, label) in hints {
        spans.push(Span::styled(*key, Style::default().fg(app.theme.highlight).bg(bg)));
        spans.push(Span::styled(
            format!(" {}  ", label),
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }
    Line::from(spans)
}

/// Visible text of an input that starts `indent` cells into the popup
fn input_text(input: &LineInput, indent: usize) -> String {
    let room = (POPUP_WIDTH as usize).saturating_sub(indent + 3);
    unicode::truncate_to_width(&input.text, room)
}

/// Place the terminal cursor inside an input row
fn place_cursor(frame: &mut Frame, inner: Rect, row: usize, indent: usize, input: &LineInput) {
    if row >= inner.height as usize {
        return;
    }
    let max_col = (inner.width as usize).saturating_sub(1);
    let col = (indent + input.cursor_col()).min(max_col);
    frame.set_cursor_position(Position::new(inner.x + col as u16, inner.y + row as u16));
}

/// Add/edit task form: task text, then one row per subtask
pub fn render_task_form(frame: &mut Frame, app: &App, area: Rect) {
    let Some(form) = &app.task_form else {
        return;
    };
    let bg = app.theme.background;
    let label_style = Style::default().fg(app.theme.dim).bg(bg);
    let text_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let marker = |field: usize| if form.field == field { "\u{25B8} " } else { "  " };
    let marker_style = Style::default().fg(app.theme.highlight).bg(bg);

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(" Task", label_style)),
        Line::from(vec![
            Span::styled(format!(" {}", marker(0)), marker_style),
            Span::styled(input_text(&form.text, 3), text_style),
        ]),
        Line::from(""),
        Line::from(Span::styled(" Subtasks", label_style)),
    ];
    let first_subtask_row = lines.len();
    if form.subtasks.is_empty() {
        lines.push(Line::from(Span::styled("   (Tab adds one)", label_style)));
    }
    for (i, sub) in form.subtasks.iter().enumerate() {
        let check = if sub.completed { "[x] " } else { "[ ] " };
        let style = if sub.completed {
            Style::default().fg(app.theme.green).bg(bg)
        } else {
            text_style
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {}", marker(i + 1)), marker_style),
            Span::styled(check, style),
            Span::styled(input_text(&sub.input, 7), style),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(hint_line(
        app,
        &[("Enter", "save"), ("Tab", "next"), ("^X", "check"), ("Esc", "cancel")],
    ));

    let title = match form.task_id {
        Some(_) => "Edit task".to_string(),
        None => format!("New task \u{00B7} {}", form.status.label()),
    };
    let inner = draw_popup(frame, app, area, &title, lines);

    match form.field {
        0 => place_cursor(frame, inner, 1, 3, &form.text),
        n => place_cursor(frame, inner, first_subtask_row + n - 1, 7, &form.subtasks[n - 1].input),
    }
}

/// Single-line prompt for board names and import paths
pub fn render_name_form(frame: &mut Frame, app: &App, area: Rect) {
    let Some(form) = &app.name_form else {
        return;
    };
    let bg = app.theme.background;
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", input_text(&form.input, 2)),
            Style::default().fg(app.theme.text_bright).bg(bg),
        )),
        Line::from(""),
        hint_line(app, &[("Enter", "ok"), ("Esc", "cancel")]),
    ];
    let inner = draw_popup(frame, app, area, form.purpose.title(), lines);
    place_cursor(frame, inner, 1, 2, &form.input);
}

fn confirm_prompt(app: &App, action: ConfirmAction) -> String {
    let state = app.store.state();
    match action {
        ConfirmAction::DeleteBoard(id) => {
            let name = state.board(id).map_or("this board", |b| b.name.as_str());
            format!("Delete board \"{}\" and all its tasks?", name)
        }
        ConfirmAction::ClearBoard => {
            format!("Remove every task from \"{}\"?", state.active_board().name)
        }
        ConfirmAction::ResetAll => "Erase all boards and settings? This cannot be undone.".into(),
    }
}

/// y/n prompt before a destructive action
pub fn render_confirm(frame: &mut Frame, app: &App, area: Rect) {
    let Some(action) = app.confirm else {
        return;
    };
    let bg = app.theme.background;
    let prompt = unicode::truncate_to_width(
        &confirm_prompt(app, action),
        POPUP_WIDTH as usize - 4,
    );
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!(" {}", prompt),
            Style::default().fg(app.theme.text_bright).bg(bg),
        )),
        Line::from(""),
        hint_line(app, &[("y", "confirm"), ("n", "cancel")]),
    ];
    draw_popup(frame, app, area, "Confirm", lines);
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

fn settings_row(app: &App, item: SettingsItem) -> (&'static str, String) {
    let state = app.store.state();
    match item {
        SettingsItem::TabsDock => ("Board tabs", on_off(state.prefs.show_tabs_dock).into()),
        SettingsItem::UiButtons => ("Key hints", on_off(state.prefs.show_ui_buttons).into()),
        SettingsItem::Theme => ("Theme", state.theme.as_str().into()),
        SettingsItem::View => ("View", state.view.as_str().into()),
        SettingsItem::RenameBoard => ("Rename board", state.active_board().name.clone()),
        SettingsItem::ClearBoard => ("Clear board", String::new()),
        SettingsItem::DeleteBoard => ("Delete board", String::new()),
        SettingsItem::Export => ("Export backup", app.export_dir.display().to_string()),
        SettingsItem::Import => ("Import backup", String::new()),
        SettingsItem::ResetAll => ("Reset all data", String::new()),
    }
}

/// Settings panel: one row per item, current value on the right
pub fn render_settings(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let mut lines: Vec<Line> = vec![Line::from("")];
    for (i, item) in SettingsItem::ALL.iter().enumerate() {
        let selected = i == app.settings_cursor;
        let row_bg = if selected { app.theme.selection_bg } else { bg };
        let (label, value) = settings_row(app, *item);
        let danger = matches!(
            item,
            SettingsItem::ClearBoard | SettingsItem::DeleteBoard | SettingsItem::ResetAll
        );
        let label_fg = if danger { app.theme.red } else { app.theme.text };
        let value = unicode::truncate_to_width(&value, 24);
        lines.push(Line::from(vec![
            Span::styled(
                if selected { " \u{25B8} " } else { "   " },
                Style::default().fg(app.theme.highlight).bg(row_bg),
            ),
            Span::styled(format!("{:<18}", label), Style::default().fg(label_fg).bg(row_bg)),
            Span::styled(value, Style::default().fg(app.theme.dim).bg(row_bg)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(hint_line(
        app,
        &[("\u{2191}\u{2193}", "move"), ("Enter", "select"), ("Esc", "close")],
    ));
    draw_popup(frame, app, area, "Settings", lines);
}
