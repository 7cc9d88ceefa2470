use serde::{Deserialize, Serialize};

/// Board identifier (creation timestamp in milliseconds)
pub type BoardId = i64;

/// Task identifier (creation timestamp in milliseconds, unique within a board)
pub type TaskId = i64;

/// Task status: drives both the kanban column and the matrix quadrant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Todo,
    #[serde(rename = "inprogress")]
    InProgress,
    Done,
    /// Unknown statuses in stored or imported data read as backlog
    #[serde(other)]
    Backlog,
}

impl Status {
    /// Kanban column order
    pub const ALL: [Status; 4] = [
        Status::Backlog,
        Status::Todo,
        Status::InProgress,
        Status::Done,
    ];

    /// The wire name used in storage, backups and CLI arguments
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Backlog => "backlog",
            Status::Todo => "todo",
            Status::InProgress => "inprogress",
            Status::Done => "done",
        }
    }

    /// Column heading shown in the kanban view
    pub fn label(self) -> &'static str {
        match self {
            Status::Backlog => "Backlog",
            Status::Todo => "To Do",
            Status::InProgress => "In Progress",
            Status::Done => "Done",
        }
    }

    /// Parse a status name (accepts a few common spellings)
    pub fn parse(s: &str) -> Option<Status> {
        match s.trim().to_ascii_lowercase().as_str() {
            "backlog" => Some(Status::Backlog),
            "todo" | "to-do" => Some(Status::Todo),
            "inprogress" | "in-progress" | "doing" => Some(Status::InProgress),
            "done" => Some(Status::Done),
            _ => None,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A checklist entry owned by a task. Identified only by its position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

impl Subtask {
    pub fn new(text: impl Into<String>) -> Self {
        Subtask {
            text: text.into(),
            completed: false,
        }
    }
}

/// A unit of work on a board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
}

impl Task {
    pub fn new(id: TaskId, text: impl Into<String>, status: Status) -> Self {
        Task {
            id,
            text: text.into(),
            status,
            subtasks: Vec::new(),
        }
    }

    /// (completed, total) subtask counts
    pub fn progress(&self) -> (usize, usize) {
        let done = self.subtasks.iter().filter(|s| s.completed).count();
        (done, self.subtasks.len())
    }
}

/// A named, independent collection of tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Board {
    pub fn new(id: BoardId, name: impl Into<String>) -> Self {
        Board {
            id,
            name: name.into(),
            tasks: Vec::new(),
        }
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    pub fn task_index(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }
}
