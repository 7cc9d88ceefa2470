use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::{Task, View};
use crate::tui::app::{App, CardRegion, ListRegion};
use crate::util::unicode;
use crate::view::{DropTarget, Group, project};

/// Render the active board as kanban columns or matrix quadrants and
/// record where every list and card landed.
pub fn render_board(frame: &mut Frame, app: &mut App, area: Rect) {
    let view = app.store.state().view;
    let areas = list_areas(view, area);

    let lists: Vec<ListRegion> = {
        let app: &App = app;
        let projection = project(app.store.state());
        projection
            .groups
            .iter()
            .zip(areas)
            .enumerate()
            .map(|(i, (group, list_area))| render_list(frame, app, group, list_area, i))
            .collect()
    };
    app.layout.lists = lists;
}

/// Four columns side by side, or a 2x2 grid
fn list_areas(view: View, area: Rect) -> Vec<Rect> {
    match view {
        View::Kanban => Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(area)
            .to_vec(),
        View::Matrix => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Ratio(1, 2); 2])
                .split(area);
            rows.iter()
                .flat_map(|row| {
                    Layout::default()
                        .direction(Direction::Horizontal)
                        .constraints([Constraint::Ratio(1, 2); 2])
                        .split(*row)
                        .to_vec()
                })
                .collect()
        }
    }
}

fn list_title(target: DropTarget, count: usize) -> String {
    match target {
        DropTarget::Column(_) => format!(" {} ({}) ", target.label(), count),
        DropTarget::Quadrant(q) => format!(" {} \u{00B7} {} {} ", q.label(), q.code(), count),
    }
}

fn render_list(
    frame: &mut Frame,
    app: &App,
    group: &Group<'_>,
    area: Rect,
    index: usize,
) -> ListRegion {
    let theme = &app.theme;
    let accent = theme.list_color(group.target);
    let is_focused_list = index == app.focus_list;
    let border_style = if is_focused_list {
        Style::default().fg(accent).bg(theme.background)
    } else {
        Style::default().fg(theme.dim).bg(theme.background)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(
            list_title(group.target, group.count()),
            Style::default()
                .fg(accent)
                .bg(theme.background)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(theme.background));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut cards = Vec::new();
    if group.tasks.is_empty() {
        if inner.height > 0 {
            let hint = Paragraph::new(Span::styled(
                " No tasks",
                Style::default().fg(theme.dim).bg(theme.background),
            ));
            frame.render_widget(hint, Rect { height: 1, ..inner });
        }
        return ListRegion {
            target: group.target,
            area,
            cards,
        };
    }

    let mut y = inner.y;
    for (i, task) in group.tasks.iter().enumerate() {
        let height = card_height(task);
        let remaining = group.tasks.len() - i;
        // Keep one row for the overflow marker unless this is the last card
        let reserve = if remaining > 1 { 1 } else { 0 };
        if y + height + reserve > inner.bottom() {
            if y < inner.bottom() {
                let more = Paragraph::new(Span::styled(
                    format!(" +{} more", remaining),
                    Style::default().fg(theme.dim).bg(theme.background),
                ));
                frame.render_widget(more, Rect::new(inner.x, y, inner.width, 1));
            }
            break;
        }
        let card_area = Rect::new(inner.x, y, inner.width, height);
        render_card(frame, app, task, card_area);
        cards.push(CardRegion {
            task_id: task.id,
            area: card_area,
        });
        y += height;
    }

    ListRegion {
        target: group.target,
        area,
        cards,
    }
}

fn card_height(task: &Task) -> u16 {
    if task.subtasks.is_empty() { 1 } else { 2 }
}

fn render_card(frame: &mut Frame, app: &App, task: &Task, area: Rect) {
    let theme = &app.theme;
    let focused = app.focus == Some(task.id);
    let dragged = app.drag.dragged() == Some(task.id);
    let bg = if focused { theme.selection_bg } else { theme.background };

    let mut text_style = Style::default().fg(theme.text).bg(bg);
    if focused {
        text_style = text_style.fg(theme.text_bright).add_modifier(Modifier::BOLD);
    }
    if dragged {
        text_style = text_style.fg(theme.dim).add_modifier(Modifier::ITALIC);
    }

    let marker = match (dragged, focused) {
        (true, _) => "\u{21C5}",
        (false, true) => "\u{25B8}",
        (false, false) => " ",
    };
    let width = area.width as usize;
    let text = unicode::truncate_to_width(&task.text, width.saturating_sub(2));
    let mut lines = vec![Line::from(vec![
        Span::styled(marker, Style::default().fg(theme.highlight).bg(bg)),
        Span::styled(" ", Style::default().bg(bg)),
        Span::styled(text, text_style),
    ])];

    let (done, total) = task.progress();
    if total > 0 {
        let color = if done == total { theme.green } else { theme.dim };
        lines.push(Line::from(Span::styled(
            format!("  \u{2713} {}/{}", done, total),
            Style::default().fg(color).bg(bg),
        )));
    }

    let card = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(card, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Status, Subtask};
    use crate::tui::render::test_helpers::*;
    use crate::view::Quadrant;

    #[test]
    fn kanban_shows_four_columns_with_counts() {
        let mut app = app_with_tasks(&[("Buy milk", Status::Todo), ("Ship it", Status::Done)]);
        let out = render_to_string(TERM_W, 12, |frame, area| render_board(frame, &mut app, area));
        assert!(out.contains("Backlog (0)"));
        assert!(out.contains("To Do (1)"));
        assert!(out.contains("In Progress (0)"));
        assert!(out.contains("Done (1)"));
        assert!(out.contains("Buy milk"));
        assert!(out.contains("No tasks"));
    }

    #[test]
    fn matrix_shows_quadrant_codes() {
        let mut app = app_with_tasks(&[("Buy milk", Status::Todo)]);
        app.store.set_view(View::Matrix);
        let out = render_to_string(TERM_W, 16, |frame, area| render_board(frame, &mut app, area));
        assert!(out.contains("ui 1"));
        assert!(out.contains("nuni 0"));
        assert!(out.contains("Buy milk"));
        let targets: Vec<DropTarget> = app.layout.lists.iter().map(|l| l.target).collect();
        assert_eq!(targets, DropTarget::all(View::Matrix).to_vec());
        assert_eq!(
            app.layout.lists[0].target,
            DropTarget::Quadrant(Quadrant::UrgentImportant)
        );
    }

    #[test]
    fn card_regions_follow_board_order() {
        let mut app = app_with_tasks(&[
            ("first", Status::Todo),
            ("second", Status::Todo),
            ("third", Status::Todo),
        ]);
        let id = app.store.active_board().tasks[1].id;
        app.store
            .edit_task(id, "second", vec![Subtask::new("a"), Subtask::new("b")]);
        render_to_string(TERM_W, 12, |frame, area| render_board(frame, &mut app, area));

        let todo = &app.layout.lists[1];
        let rows: Vec<(i64, u16, u16)> = todo
            .cards
            .iter()
            .map(|c| (c.task_id, c.area.y, c.area.height))
            .collect();
        assert_eq!(rows, vec![(100, 1, 1), (101, 2, 2), (102, 4, 1)]);
    }

    #[test]
    fn overflow_is_summarized() {
        let tasks: Vec<(String, Status)> =
            (0..10).map(|i| (format!("task {}", i), Status::Backlog)).collect();
        let refs: Vec<(&str, Status)> = tasks.iter().map(|(t, s)| (t.as_str(), *s)).collect();
        let mut app = app_with_tasks(&refs);
        let out = render_to_string(TERM_W, 6, |frame, area| render_board(frame, &mut app, area));
        // 4 inner rows: 3 cards and the marker
        assert!(out.contains("+7 more"));
        assert_eq!(app.layout.lists[0].cards.len(), 3);
    }

    #[test]
    fn focused_card_is_marked() {
        let mut app = app_with_tasks(&[("Buy milk", Status::Todo)]);
        app.focus_task(100);
        let out = render_to_string(TERM_W, 6, |frame, area| render_board(frame, &mut app, area));
        assert!(out.contains("\u{25B8} Buy milk"));
    }
}
