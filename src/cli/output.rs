use serde::Serialize;

use crate::model::{AppState, Board, Status, Subtask, Task};
use crate::view::{Group, Projection, Quadrant};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct BoardJson {
    pub id: i64,
    pub name: String,
    pub tasks: usize,
    pub active: bool,
}

#[derive(Serialize)]
pub struct SubtaskJson {
    pub text: String,
    pub completed: bool,
}

#[derive(Serialize)]
pub struct TaskJson {
    pub id: i64,
    pub text: String,
    pub status: Status,
    pub quadrant: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subtasks: Vec<SubtaskJson>,
}

#[derive(Serialize)]
pub struct GroupJson {
    pub id: &'static str,
    pub label: &'static str,
    pub tasks: Vec<TaskJson>,
}

#[derive(Serialize)]
pub struct ShowJson {
    pub board_id: i64,
    pub board: String,
    pub view: &'static str,
    pub groups: Vec<GroupJson>,
}

#[derive(Serialize)]
pub struct PrefsJson {
    pub view: &'static str,
    pub theme: &'static str,
    pub show_tabs_dock: bool,
    pub show_ui_buttons: bool,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn board_to_json(board: &Board, active: bool) -> BoardJson {
    BoardJson {
        id: board.id,
        name: board.name.clone(),
        tasks: board.tasks.len(),
        active,
    }
}

fn subtask_to_json(sub: &Subtask) -> SubtaskJson {
    SubtaskJson {
        text: sub.text.clone(),
        completed: sub.completed,
    }
}

pub fn task_to_json(task: &Task) -> TaskJson {
    TaskJson {
        id: task.id,
        text: task.text.clone(),
        status: task.status,
        quadrant: Quadrant::for_status(task.status).id(),
        subtasks: task.subtasks.iter().map(subtask_to_json).collect(),
    }
}

pub fn projection_to_json(projection: &Projection<'_>) -> ShowJson {
    ShowJson {
        board_id: projection.board.id,
        board: projection.board.name.clone(),
        view: projection.view.as_str(),
        groups: projection
            .groups
            .iter()
            .map(|g| GroupJson {
                id: g.target.id(),
                label: g.target.label(),
                tasks: g.tasks.iter().map(|t| task_to_json(t)).collect(),
            })
            .collect(),
    }
}

pub fn prefs_to_json(state: &AppState) -> PrefsJson {
    PrefsJson {
        view: state.view.as_str(),
        theme: state.theme.as_str(),
        show_tabs_dock: state.prefs.show_tabs_dock,
        show_ui_buttons: state.prefs.show_ui_buttons,
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// One line per board; the active one is starred
pub fn format_board_line(board: &Board, active: bool) -> String {
    let marker = if active { '*' } else { ' ' };
    let count = board.tasks.len();
    let noun = if count == 1 { "task" } else { "tasks" };
    format!("{} {}  {} ({} {})", marker, board.id, board.name, count, noun)
}

/// `<id> <text>`, with a `done/total` badge when the task has subtasks
pub fn format_task_line(task: &Task) -> String {
    let (done, total) = task.progress();
    if total == 0 {
        format!("{} {}", task.id, task.text)
    } else {
        format!("{} {} [{}/{}]", task.id, task.text, done, total)
    }
}

fn format_subtask_line(index: usize, sub: &Subtask) -> String {
    let mark = if sub.completed { 'x' } else { ' ' };
    format!("[{}] {}. {}", mark, index + 1, sub.text)
}

pub fn format_group_header(group: &Group<'_>) -> String {
    format!("== {} ({}) ==", group.target.label(), group.count())
}

/// Render a whole projection: one section per column or quadrant
pub fn format_projection(projection: &Projection<'_>) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, group) in projection.groups.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.push(format_group_header(group));
        if group.tasks.is_empty() {
            lines.push("  (empty)".to_string());
        }
        for task in &group.tasks {
            lines.push(format!("  {}", format_task_line(task)));
            for (idx, sub) in task.subtasks.iter().enumerate() {
                lines.push(format!("      {}", format_subtask_line(idx, sub)));
            }
        }
    }
    lines
}

pub fn format_prefs(state: &AppState) -> Vec<String> {
    let on_off = |b: bool| if b { "on" } else { "off" };
    vec![
        format!("view:    {}", state.view.as_str()),
        format!("theme:   {}", state.theme.as_str()),
        format!("tabs:    {}", on_off(state.prefs.show_tabs_dock)),
        format!("buttons: {}", on_off(state.prefs.show_ui_buttons)),
    ]
}
