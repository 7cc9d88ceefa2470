use crate::io::backup::export_file_name;
use crate::io::snapshot::Snapshot;
use crate::io::storage::{Storage, StorageError};
use crate::model::{AppState, Board, BoardId, Status, Subtask, Task, TaskId, ThemeMode, View};
use crate::ops::clock::Clock;
use crate::ops::history::History;
use crate::view::drag::DropResolution;

/// Error type for store operations that can be refused
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("You must have at least one board.")]
    LastBoard,
    #[error("Invalid file format. Please use a valid JSON backup. ({0})")]
    InvalidImport(String),
    #[error("could not serialize boards: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// A serialized backup ready to be written somewhere
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    /// Suggested file name, derived from the active board's name
    pub file_name: String,
    /// Pretty-printed JSON array of every board
    pub json: String,
}

/// Owns the application state and applies every mutation to it.
///
/// Mutations record a history snapshot first, then persist the whole state
/// through the injected storage backend and bump `revision`. Invalid input
/// (empty names, unknown ids) leaves everything untouched.
pub struct Store<S: Storage> {
    state: AppState,
    history: History,
    storage: S,
    clock: Box<dyn Clock>,
    revision: u64,
    persist_error: Option<StorageError>,
}

impl<S: Storage> Store<S> {
    /// Load state from storage, restoring the board invariants.
    pub fn load(storage: S, clock: Box<dyn Clock>) -> Result<Self, StorageError> {
        let snapshot = storage.read()?;
        let mut store = Store {
            state: snapshot.into_state(),
            history: History::new(),
            storage,
            clock,
            revision: 0,
            persist_error: None,
        };
        let fallback_id = match store.state.boards.first() {
            Some(board) => board.id,
            None => store.clock.now_millis(),
        };
        if store.state.normalize(fallback_id) {
            tracing::info!(
                active = store.state.active_board_id,
                "repaired stored board selection"
            );
            store.persist();
        }
        Ok(store)
    }

    /// Wrap an existing state (normalized on entry). Nothing is persisted
    /// until the first mutation.
    pub fn with_state(mut state: AppState, storage: S, clock: Box<dyn Clock>) -> Self {
        if state.boards.is_empty() {
            state.normalize(clock.now_millis());
        } else {
            state.normalize(state.boards[0].id);
        }
        Store {
            state,
            history: History::new(),
            storage,
            clock,
            revision: 0,
            persist_error: None,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn active_board(&self) -> &Board {
        self.state.active_board()
    }

    /// Bumped after every applied change; the UI re-renders when it moves
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// The most recent failed write, if any, cleared on read
    pub fn take_persist_error(&mut self) -> Option<StorageError> {
        self.persist_error.take()
    }

    // -----------------------------------------------------------------------
    // Boards
    // -----------------------------------------------------------------------

    /// Append a new empty board and make it active
    pub fn create_board(&mut self, name: &str) -> Option<BoardId> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let id = self.clock.now_millis();
        self.mutate(|state| {
            state.boards.push(Board::new(id, name));
            state.active_board_id = id;
        });
        tracing::info!(board = id, name, "created board");
        Some(id)
    }

    pub fn rename_board(&mut self, id: BoardId, new_name: &str) -> bool {
        let new_name = new_name.trim();
        if new_name.is_empty() || self.state.board(id).is_none() {
            return false;
        }
        self.mutate(|state| {
            if let Some(board) = state.board_mut(id) {
                board.name = new_name.to_string();
            }
        });
        true
    }

    /// Remove a board. Refused when it is the last one; an unknown id is a no-op.
    pub fn delete_board(&mut self, id: BoardId) -> Result<bool, StoreError> {
        if self.state.boards.len() <= 1 {
            tracing::warn!(board = id, "refusing to delete the last board");
            return Err(StoreError::LastBoard);
        }
        if self.state.board(id).is_none() {
            return Ok(false);
        }
        self.mutate(|state| {
            state.boards.retain(|b| b.id != id);
            if state.active_board_id == id {
                state.active_board_id = state.boards[0].id;
            }
        });
        tracing::info!(board = id, "deleted board");
        Ok(true)
    }

    /// Remove every task from the active board
    pub fn clear_board(&mut self) {
        self.mutate(|state| state.active_board_mut().tasks.clear());
    }

    /// Make the given board active. Not an undoable change.
    pub fn switch_board(&mut self, id: BoardId) -> bool {
        if self.state.board(id).is_none() || self.state.active_board_id == id {
            return false;
        }
        self.state.active_board_id = id;
        self.commit();
        true
    }

    /// Activate the next board, wrapping around. No-op with a single board.
    pub fn cycle_board(&mut self) -> bool {
        let count = self.state.boards.len();
        if count <= 1 {
            return false;
        }
        let current = self.state.board_index(self.state.active_board_id).unwrap_or(0);
        let next = self.state.boards[(current + 1) % count].id;
        self.switch_board(next)
    }

    // -----------------------------------------------------------------------
    // Tasks
    // -----------------------------------------------------------------------

    /// Append a task to the active board. Empty text is ignored.
    pub fn add_task(
        &mut self,
        text: &str,
        status: Option<Status>,
        subtasks: Vec<Subtask>,
    ) -> Option<TaskId> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let id = self.clock.now_millis();
        let mut task = Task::new(id, text, status.unwrap_or_default());
        task.subtasks = clean_subtasks(subtasks);
        self.mutate(|state| state.active_board_mut().tasks.push(task));
        tracing::debug!(task = id, "added task");
        Some(id)
    }

    /// Replace a task's text and subtasks in place
    pub fn edit_task(&mut self, id: TaskId, text: &str, subtasks: Vec<Subtask>) -> bool {
        let text = text.trim();
        if text.is_empty() || self.active_board().task(id).is_none() {
            return false;
        }
        let subtasks = clean_subtasks(subtasks);
        self.mutate(|state| {
            if let Some(task) = state.active_board_mut().task_mut(id) {
                task.text = text.to_string();
                task.subtasks = subtasks;
            }
        });
        true
    }

    pub fn delete_task(&mut self, id: TaskId) -> bool {
        if self.active_board().task(id).is_none() {
            return false;
        }
        self.mutate(|state| state.active_board_mut().tasks.retain(|t| t.id != id));
        tracing::debug!(task = id, "deleted task");
        true
    }

    pub fn toggle_subtask(&mut self, task_id: TaskId, index: usize) -> bool {
        let valid = self
            .active_board()
            .task(task_id)
            .is_some_and(|t| index < t.subtasks.len());
        if !valid {
            return false;
        }
        self.mutate(|state| {
            if let Some(sub) = state
                .active_board_mut()
                .task_mut(task_id)
                .and_then(|t| t.subtasks.get_mut(index))
            {
                sub.completed = !sub.completed;
            }
        });
        true
    }

    /// Take a task out of the list, set its status and reinsert it at
    /// `index` (counted after removal, clamped) or at the end.
    pub fn move_task(&mut self, id: TaskId, status: Status, index: Option<usize>) -> bool {
        if self.active_board().task(id).is_none() {
            return false;
        }
        self.mutate(|state| {
            let tasks = &mut state.active_board_mut().tasks;
            if let Some(pos) = tasks.iter().position(|t| t.id == id) {
                let mut task = tasks.remove(pos);
                task.status = status;
                let at = index.map_or(tasks.len(), |i| i.min(tasks.len()));
                tasks.insert(at, task);
            }
        });
        true
    }

    /// Like `move_task`, but positions the task right before a sibling
    /// (or at the end when `before` is `None` or no longer present).
    pub fn move_task_before(&mut self, id: TaskId, status: Status, before: Option<TaskId>) -> bool {
        if self.active_board().task(id).is_none() || before == Some(id) {
            return false;
        }
        self.mutate(|state| {
            let tasks = &mut state.active_board_mut().tasks;
            if let Some(pos) = tasks.iter().position(|t| t.id == id) {
                let mut task = tasks.remove(pos);
                task.status = status;
                let at = before
                    .and_then(|b| tasks.iter().position(|t| t.id == b))
                    .unwrap_or(tasks.len());
                tasks.insert(at, task);
            }
        });
        true
    }

    /// Apply a resolved drag-and-drop as a single move
    pub fn apply_drop(&mut self, drop: &DropResolution) -> bool {
        self.move_task_before(drop.task_id, drop.status, drop.before)
    }

    // -----------------------------------------------------------------------
    // Preferences (persisted, not undoable)
    // -----------------------------------------------------------------------

    pub fn set_view(&mut self, view: View) {
        if self.state.view != view {
            self.state.view = view;
            self.commit();
        }
    }

    pub fn toggle_view(&mut self) -> View {
        self.set_view(self.state.view.toggled());
        self.state.view
    }

    pub fn set_theme(&mut self, theme: ThemeMode) {
        if self.state.theme != theme {
            self.state.theme = theme;
            self.commit();
        }
    }

    pub fn toggle_theme(&mut self) -> ThemeMode {
        self.set_theme(self.state.theme.toggled());
        self.state.theme
    }

    pub fn set_show_tabs_dock(&mut self, show: bool) {
        self.state.prefs.show_tabs_dock = show;
        self.commit();
    }

    pub fn set_show_ui_buttons(&mut self, show: bool) {
        self.state.prefs.show_ui_buttons = show;
        self.commit();
    }

    // -----------------------------------------------------------------------
    // History, backups, reset
    // -----------------------------------------------------------------------

    /// Restore the most recent snapshot. No-op when there is none.
    pub fn undo(&mut self) -> bool {
        let Some(boards) = self.history.pop() else {
            return false;
        };
        self.state.boards = boards;
        let fallback = self.state.boards.first().map_or(1, |b| b.id);
        self.state.normalize(fallback);
        self.commit();
        tracing::debug!(remaining = self.history.len(), "undo");
        true
    }

    /// Replace all boards with a backup (a JSON array of boards) and
    /// activate its first board. On any error the state is untouched.
    pub fn import_boards(&mut self, json: &str) -> Result<usize, StoreError> {
        let boards: Vec<Board> =
            serde_json::from_str(json).map_err(|e| StoreError::InvalidImport(e.to_string()))?;
        if boards.is_empty() {
            return Err(StoreError::InvalidImport("backup contains no boards".into()));
        }
        let count = boards.len();
        self.mutate(|state| {
            state.active_board_id = boards[0].id;
            state.boards = boards;
        });
        tracing::info!(boards = count, "imported backup");
        Ok(count)
    }

    /// Serialize every board, named after the active one
    pub fn export_boards(&self) -> Result<Export, StoreError> {
        let json = serde_json::to_string_pretty(&self.state.boards)?;
        Ok(Export {
            file_name: export_file_name(&self.active_board().name),
            json,
        })
    }

    /// Wipe storage and return to first-run defaults
    pub fn reset_all(&mut self) -> Result<(), StoreError> {
        self.storage.clear()?;
        self.state = AppState::default();
        self.history.clear();
        self.revision += 1;
        tracing::info!("reset all data");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Record history, apply, restore invariants, persist.
    fn mutate<F: FnOnce(&mut AppState)>(&mut self, apply: F) {
        self.history.record(&self.state.boards);
        apply(&mut self.state);
        if self.state.boards.is_empty() {
            let id = self.clock.now_millis();
            self.state.normalize(id);
        } else {
            let first = self.state.boards[0].id;
            self.state.normalize(first);
        }
        self.commit();
    }

    /// Persist and signal a re-render
    fn commit(&mut self) {
        self.persist();
        self.revision += 1;
    }

    /// Fire-and-forget write: failures are logged and kept for
    /// `take_persist_error`, never rolled back
    fn persist(&mut self) {
        if let Err(e) = self.storage.write(&Snapshot::of(&self.state)) {
            tracing::warn!("failed to persist state: {}", e);
            self.persist_error = Some(e);
        }
    }
}

/// Trim subtask text and drop empty entries
fn clean_subtasks(subtasks: Vec<Subtask>) -> Vec<Subtask> {
    subtasks
        .into_iter()
        .filter_map(|s| {
            let text = s.text.trim();
            if text.is_empty() {
                None
            } else {
                Some(Subtask {
                    text: text.to_string(),
                    completed: s.completed,
                })
            }
        })
        .collect()
}
