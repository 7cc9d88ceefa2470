use crate::model::{AppState, Board, Status, Task, View};

/// One of the four fixed priority buckets of the matrix view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    UrgentImportant,
    NotUrgentImportant,
    UrgentNotImportant,
    NotUrgentNotImportant,
}

impl Quadrant {
    /// Display order: top-left, top-right, bottom-left, bottom-right
    pub const ALL: [Quadrant; 4] = [
        Quadrant::UrgentImportant,
        Quadrant::NotUrgentImportant,
        Quadrant::UrgentNotImportant,
        Quadrant::NotUrgentNotImportant,
    ];

    /// Forward mapping. Total and lossy: backlog and anything unrecognized
    /// land in the not-urgent/not-important bucket.
    pub fn for_status(status: Status) -> Quadrant {
        match status {
            Status::Todo => Quadrant::UrgentImportant,
            Status::InProgress => Quadrant::NotUrgentImportant,
            Status::Done => Quadrant::UrgentNotImportant,
            Status::Backlog => Quadrant::NotUrgentNotImportant,
        }
    }

    /// Reverse mapping used when a task is dropped into this quadrant
    pub fn status(self) -> Status {
        match self {
            Quadrant::UrgentImportant => Status::Todo,
            Quadrant::NotUrgentImportant => Status::InProgress,
            Quadrant::UrgentNotImportant => Status::Done,
            Quadrant::NotUrgentNotImportant => Status::Backlog,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Quadrant::UrgentImportant => "urgent-important",
            Quadrant::NotUrgentImportant => "not-urgent-important",
            Quadrant::UrgentNotImportant => "urgent-not-important",
            Quadrant::NotUrgentNotImportant => "not-urgent-not-important",
        }
    }

    /// Short counter code
    pub fn code(self) -> &'static str {
        match self {
            Quadrant::UrgentImportant => "ui",
            Quadrant::NotUrgentImportant => "nui",
            Quadrant::UrgentNotImportant => "uni",
            Quadrant::NotUrgentNotImportant => "nuni",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Quadrant::UrgentImportant => "Urgent & Important",
            Quadrant::NotUrgentImportant => "Important, Not Urgent",
            Quadrant::UrgentNotImportant => "Urgent, Not Important",
            Quadrant::NotUrgentNotImportant => "Neither",
        }
    }

    pub fn parse(s: &str) -> Option<Quadrant> {
        let s = s.trim();
        Quadrant::ALL
            .into_iter()
            .find(|q| q.id() == s || q.code() == s)
    }
}

/// A list tasks can be dropped into: a kanban column or a matrix quadrant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropTarget {
    Column(Status),
    Quadrant(Quadrant),
}

impl DropTarget {
    /// The status a task takes when dropped here
    pub fn status(self) -> Status {
        match self {
            DropTarget::Column(status) => status,
            DropTarget::Quadrant(q) => q.status(),
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            DropTarget::Column(status) => status.as_str(),
            DropTarget::Quadrant(q) => q.id(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DropTarget::Column(status) => status.label(),
            DropTarget::Quadrant(q) => q.label(),
        }
    }

    /// The list a task with `status` is shown in under `view`
    pub fn for_status(status: Status, view: View) -> DropTarget {
        match view {
            View::Kanban => DropTarget::Column(status),
            View::Matrix => DropTarget::Quadrant(Quadrant::for_status(status)),
        }
    }

    /// All lists of a view, in display order
    pub fn all(view: View) -> [DropTarget; 4] {
        match view {
            View::Kanban => Status::ALL.map(DropTarget::Column),
            View::Matrix => Quadrant::ALL.map(DropTarget::Quadrant),
        }
    }
}

/// One rendered list with its tasks in board order
#[derive(Debug, Clone)]
pub struct Group<'a> {
    pub target: DropTarget,
    pub tasks: Vec<&'a Task>,
}

impl Group<'_> {
    pub fn count(&self) -> usize {
        self.tasks.len()
    }
}

/// View-model of the active board under the current view
#[derive(Debug, Clone)]
pub struct Projection<'a> {
    pub view: View,
    pub board: &'a Board,
    pub groups: Vec<Group<'a>>,
}

impl<'a> Projection<'a> {
    pub fn group(&self, target: DropTarget) -> Option<&Group<'a>> {
        self.groups.iter().find(|g| g.target == target)
    }

    /// Tasks in display order: group by group, top to bottom
    pub fn cards(&self) -> impl Iterator<Item = &'a Task> + '_ {
        self.groups.iter().flat_map(|g| g.tasks.iter().copied())
    }

    /// Locate a task as (group index, row index)
    pub fn locate(&self, task_id: crate::model::TaskId) -> Option<(usize, usize)> {
        self.groups.iter().enumerate().find_map(|(gi, g)| {
            g.tasks
                .iter()
                .position(|t| t.id == task_id)
                .map(|row| (gi, row))
        })
    }
}

/// Project the active board of `state` under its current view
pub fn project(state: &AppState) -> Projection<'_> {
    project_board(state.active_board(), state.view)
}

/// Partition a board's tasks into the four lists of `view`. Every task
/// lands in exactly one list; order within a list follows the board.
pub fn project_board(board: &Board, view: View) -> Projection<'_> {
    let groups = DropTarget::all(view)
        .into_iter()
        .map(|target| Group {
            target,
            tasks: board
                .tasks
                .iter()
                .filter(|t| DropTarget::for_status(t.status, view) == target)
                .collect(),
        })
        .collect();
    Projection {
        view,
        board,
        groups,
    }
}
