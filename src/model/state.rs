use serde::{Deserialize, Serialize};

use super::board::{Board, BoardId};

/// Name of the board created on first run
pub const DEFAULT_BOARD_NAME: &str = "My Board";

/// Name of the board synthesized when no boards exist at all
pub const FALLBACK_BOARD_NAME: &str = "Main Board";

/// Which projection of the active board is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Kanban,
    Matrix,
}

impl View {
    pub fn toggled(self) -> View {
        match self {
            View::Kanban => View::Matrix,
            View::Matrix => View::Kanban,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            View::Kanban => "kanban",
            View::Matrix => "matrix",
        }
    }

    pub fn parse(s: &str) -> Option<View> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kanban" => Some(View::Kanban),
            "matrix" => Some(View::Matrix),
            _ => None,
        }
    }
}

/// Color scheme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggled(self) -> ThemeMode {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }

    pub fn parse(s: &str) -> Option<ThemeMode> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Some(ThemeMode::Dark),
            "light" => Some(ThemeMode::Light),
            _ => None,
        }
    }
}

/// Chrome toggles from the settings panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiPrefs {
    pub show_tabs_dock: bool,
    pub show_ui_buttons: bool,
}

impl Default for UiPrefs {
    fn default() -> Self {
        UiPrefs {
            show_tabs_dock: true,
            show_ui_buttons: true,
        }
    }
}

/// Everything the board keeps between sessions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    /// Never empty once normalized
    pub boards: Vec<Board>,
    pub active_board_id: BoardId,
    pub view: View,
    pub theme: ThemeMode,
    pub prefs: UiPrefs,
}

impl Default for AppState {
    fn default() -> Self {
        AppState {
            boards: vec![Board::new(1, DEFAULT_BOARD_NAME)],
            active_board_id: 1,
            view: View::default(),
            theme: ThemeMode::default(),
            prefs: UiPrefs::default(),
        }
    }
}

impl AppState {
    /// Restore the board invariants: at least one board, and an active id
    /// that resolves. Falls back to the first board, or synthesizes one with
    /// the given id when the list is empty. Returns true if anything changed.
    pub fn normalize(&mut self, fallback_id: BoardId) -> bool {
        if self.boards.is_empty() {
            self.boards.push(Board::new(fallback_id, FALLBACK_BOARD_NAME));
            self.active_board_id = fallback_id;
            return true;
        }
        if self.board(self.active_board_id).is_none() {
            self.active_board_id = self.boards[0].id;
            return true;
        }
        false
    }

    pub fn board(&self, id: BoardId) -> Option<&Board> {
        self.boards.iter().find(|b| b.id == id)
    }

    pub fn board_mut(&mut self, id: BoardId) -> Option<&mut Board> {
        self.boards.iter_mut().find(|b| b.id == id)
    }

    pub fn board_index(&self, id: BoardId) -> Option<usize> {
        self.boards.iter().position(|b| b.id == id)
    }

    /// The active board, or the first board if the active id is stale.
    /// Callers hold a normalized state, so `boards` is non-empty.
    pub fn active_board(&self) -> &Board {
        let idx = self.board_index(self.active_board_id).unwrap_or(0);
        &self.boards[idx]
    }

    pub fn active_board_mut(&mut self) -> &mut Board {
        let idx = self.board_index(self.active_board_id).unwrap_or(0);
        &mut self.boards[idx]
    }
}
