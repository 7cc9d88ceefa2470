use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Position, Rect};

use crate::io::backup;
use crate::io::storage::Storage;
use crate::model::{BackendKind, BoardId, Status, Subtask, Task, TaskId, UiConfig};
use crate::ops::{Session, Store, open_session};
use crate::view::{DragSession, DropTarget, ItemBounds, Projection, project};

use super::input;
use super::line_input::LineInput;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    TaskForm,
    NameForm,
    Confirm,
    Settings,
    Help,
}

/// One subtask row in the task form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtaskField {
    pub input: LineInput,
    pub completed: bool,
}

/// Add/edit task modal. Field 0 is the task text, fields 1.. are subtasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    /// `None` when creating a new task
    pub task_id: Option<TaskId>,
    /// Status given to a new task
    pub status: Status,
    pub text: LineInput,
    pub subtasks: Vec<SubtaskField>,
    pub field: usize,
}

impl TaskForm {
    pub fn create(status: Status) -> Self {
        TaskForm {
            task_id: None,
            status,
            text: LineInput::default(),
            subtasks: Vec::new(),
            field: 0,
        }
    }

    pub fn edit(task: &Task) -> Self {
        TaskForm {
            task_id: Some(task.id),
            status: task.status,
            text: LineInput::new(task.text.clone()),
            subtasks: task
                .subtasks
                .iter()
                .map(|s| SubtaskField {
                    input: LineInput::new(s.text.clone()),
                    completed: s.completed,
                })
                .collect(),
            field: 0,
        }
    }

    pub fn field_count(&self) -> usize {
        1 + self.subtasks.len()
    }

    pub fn current_input_mut(&mut self) -> &mut LineInput {
        match self.field {
            0 => &mut self.text,
            n => &mut self.subtasks[n - 1].input,
        }
    }

    /// Subtasks as entered, completion flags kept
    pub fn collect_subtasks(&self) -> Vec<Subtask> {
        self.subtasks
            .iter()
            .map(|f| Subtask {
                text: f.input.text.clone(),
                completed: f.completed,
            })
            .collect()
    }
}

/// What a single-line name/path prompt is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamePurpose {
    NewBoard,
    RenameBoard(BoardId),
    ImportPath,
}

impl NamePurpose {
    pub fn title(self) -> &'static str {
        match self {
            NamePurpose::NewBoard => "New board",
            NamePurpose::RenameBoard(_) => "Rename board",
            NamePurpose::ImportPath => "Import backup (file path)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameForm {
    pub purpose: NamePurpose,
    pub input: LineInput,
}

/// Destructive actions that need a y/n before they reach the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteBoard(BoardId),
    ClearBoard,
    ResetAll,
}

/// Rows of the settings panel, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsItem {
    TabsDock,
    UiButtons,
    Theme,
    View,
    RenameBoard,
    ClearBoard,
    DeleteBoard,
    Export,
    Import,
    ResetAll,
}

impl SettingsItem {
    pub const ALL: [SettingsItem; 10] = [
        SettingsItem::TabsDock,
        SettingsItem::UiButtons,
        SettingsItem::Theme,
        SettingsItem::View,
        SettingsItem::RenameBoard,
        SettingsItem::ClearBoard,
        SettingsItem::DeleteBoard,
        SettingsItem::Export,
        SettingsItem::Import,
        SettingsItem::ResetAll,
    ];
}

/// Screen position of one rendered card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardRegion {
    pub task_id: TaskId,
    pub area: Rect,
}

/// Screen position of one rendered list and its cards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRegion {
    pub target: DropTarget,
    pub area: Rect,
    pub cards: Vec<CardRegion>,
}

impl ListRegion {
    /// Vertical bounds of the cards, for the drop resolver
    pub fn bounds(&self) -> Vec<ItemBounds> {
        self.cards
            .iter()
            .map(|c| ItemBounds::new(c.task_id, c.area.y as f64, c.area.height as f64))
            .collect()
    }
}

/// Hit-test geometry captured by the last render
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenLayout {
    pub lists: Vec<ListRegion>,
    pub tabs: Vec<(BoardId, Rect)>,
}

impl ScreenLayout {
    pub fn list_at(&self, col: u16, row: u16) -> Option<&ListRegion> {
        let pos = Position::new(col, row);
        self.lists.iter().find(|l| l.area.contains(pos))
    }

    pub fn card_at(&self, col: u16, row: u16) -> Option<(DropTarget, TaskId)> {
        let pos = Position::new(col, row);
        self.lists.iter().find_map(|l| {
            l.cards
                .iter()
                .find(|c| c.area.contains(pos))
                .map(|c| (l.target, c.task_id))
        })
    }

    pub fn tab_at(&self, col: u16, row: u16) -> Option<BoardId> {
        let pos = Position::new(col, row);
        self.tabs
            .iter()
            .find(|(_, area)| area.contains(pos))
            .map(|(id, _)| *id)
    }
}

/// Main application state
pub struct App {
    pub store: Store<Box<dyn Storage>>,
    pub ui_config: UiConfig,
    pub export_dir: PathBuf,
    pub theme: Theme,
    pub mode: Mode,
    pub should_quit: bool,
    /// Focused card, if any
    pub focus: Option<TaskId>,
    /// Focused list (index into the current view's lists)
    pub focus_list: usize,
    pub task_form: Option<TaskForm>,
    pub name_form: Option<NameForm>,
    pub confirm: Option<ConfirmAction>,
    pub settings_cursor: usize,
    pub drag: DragSession,
    /// Whether the pointer moved since the drag started
    pub drag_moved: bool,
    pub layout: ScreenLayout,
    pub status_message: Option<String>,
    seen_revision: u64,
}

impl App {
    pub fn new(session: Session) -> Self {
        let Session {
            data_dir: _,
            config,
            store,
        } = session;
        let export_dir = config
            .ui
            .export_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        let theme = Theme::new(store.state().theme, &config.ui);
        let seen_revision = store.revision();
        App {
            store,
            ui_config: config.ui,
            export_dir,
            theme,
            mode: Mode::Navigate,
            should_quit: false,
            focus: None,
            focus_list: 1,
            task_form: None,
            name_form: None,
            confirm: None,
            settings_cursor: 0,
            drag: DragSession::new(),
            drag_moved: false,
            layout: ScreenLayout::default(),
            status_message: None,
            seen_revision,
        }
    }

    pub fn projection(&self) -> Projection<'_> {
        project(self.store.state())
    }

    /// The list that `a` adds to and that an unfocused cursor sits in
    pub fn focused_target(&self) -> DropTarget {
        DropTarget::all(self.store.state().view)[self.focus_list.min(3)]
    }

    /// Focus a task and the list it is shown in
    pub fn focus_task(&mut self, id: TaskId) {
        let located = self.projection().locate(id);
        if let Some((list, _)) = located {
            self.focus = Some(id);
            self.focus_list = list;
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
    }

    /// React to store changes: rebuild the theme, drop a stale focus and
    /// surface failed writes. Called after every handled event.
    pub fn sync(&mut self) {
        if let Some(e) = self.store.take_persist_error() {
            self.set_status(format!("could not save: {}", e));
        }
        if self.store.revision() == self.seen_revision {
            return;
        }
        self.seen_revision = self.store.revision();
        self.theme = Theme::new(self.store.state().theme, &self.ui_config);
        match self.focus {
            Some(id) if self.store.active_board().task(id).is_some() => self.focus_task(id),
            _ => self.focus = None,
        }
        if self.drag.dragged().is_some_and(|id| self.store.active_board().task(id).is_none()) {
            self.drag.cancel();
        }
    }

    /// Write a backup of every board into the export directory
    pub fn export(&mut self) {
        let result = self.store.export_boards().map_err(|e| e.to_string()).and_then(|export| {
            backup::write_backup(&self.export_dir, &export.file_name, &export.json)
                .map_err(|e| e.to_string())
        });
        match result {
            Ok(path) => self.set_status(format!("exported to {}", path.display())),
            Err(e) => self.set_status(format!("export failed: {}", e)),
        }
    }

    /// Replace all boards with the backup at `path`
    pub fn import(&mut self, path: &str) {
        let path = path.trim();
        let content = match backup::read_backup(std::path::Path::new(path)) {
            Ok(content) => content,
            Err(e) => {
                self.set_status(e.to_string());
                return;
            }
        };
        match self.store.import_boards(&content) {
            Ok(count) => {
                self.focus = None;
                self.set_status(format!("imported {} boards", count));
            }
            Err(e) => self.set_status(e.to_string()),
        }
    }
}

/// Run the TUI application
pub fn run(
    data_dir: Option<&str>,
    backend: Option<BackendKind>,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = open_session(data_dir, backend)?;
    let mut app = App::new(session);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
            app.sync();
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::app_with_tasks;

    #[test]
    fn focus_follows_task_into_its_list() {
        let mut app = app_with_tasks(&[("a", Status::Backlog), ("b", Status::Done)]);
        let done = app.store.active_board().tasks[1].id;
        app.focus_task(done);
        assert_eq!(app.focus, Some(done));
        assert_eq!(app.focus_list, 3);
        assert_eq!(app.focused_target(), DropTarget::Column(Status::Done));
    }

    #[test]
    fn sync_drops_focus_on_deleted_task() {
        let mut app = app_with_tasks(&[("a", Status::Todo)]);
        let id = app.store.active_board().tasks[0].id;
        app.focus_task(id);
        app.store.delete_task(id);
        app.sync();
        assert_eq!(app.focus, None);
    }

    #[test]
    fn sync_rebuilds_theme_after_toggle() {
        let mut app = app_with_tasks(&[]);
        assert_eq!(app.theme, Theme::dark());
        app.store.toggle_theme();
        app.sync();
        assert_eq!(app.theme, Theme::light());
    }

    #[test]
    fn layout_hit_testing() {
        let layout = ScreenLayout {
            lists: vec![ListRegion {
                target: DropTarget::Column(Status::Todo),
                area: Rect::new(0, 2, 20, 10),
                cards: vec![CardRegion {
                    task_id: 5,
                    area: Rect::new(1, 3, 18, 2),
                }],
            }],
            tabs: vec![(1, Rect::new(0, 0, 8, 1))],
        };
        assert_eq!(layout.card_at(4, 4), Some((DropTarget::Column(Status::Todo), 5)));
        assert_eq!(layout.card_at(4, 6), None);
        assert!(layout.list_at(4, 6).is_some());
        assert!(layout.list_at(30, 6).is_none());
        assert_eq!(layout.tab_at(3, 0), Some(1));
        assert_eq!(
            layout.lists[0].bounds(),
            vec![ItemBounds::new(5, 3.0, 2.0)]
        );
    }

    #[test]
    fn task_form_keeps_subtask_completion() {
        let mut task = Task::new(1, "Report", Status::Todo);
        task.subtasks = vec![Subtask::new("outline"), Subtask::new("draft")];
        task.subtasks[0].completed = true;
        let form = TaskForm::edit(&task);
        assert_eq!(form.field_count(), 3);
        assert_eq!(form.collect_subtasks(), task.subtasks);
    }
}
