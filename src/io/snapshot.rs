use crate::model::{AppState, Board, BoardId, ThemeMode, UiPrefs, View};

/// Storage key for the boards array
pub const KEY_BOARDS: &str = "orbit_boards";
/// Storage key for the active board id
pub const KEY_ACTIVE: &str = "orbit_active";
/// Storage key for the color scheme
pub const KEY_THEME: &str = "orbit_theme";
/// Storage key for the current view
pub const KEY_VIEW: &str = "orbit_view";
/// Storage key for the tab dock toggle
pub const KEY_SHOW_TABS: &str = "orbit_show_tabs";
/// Storage key for the key-hint/buttons toggle
pub const KEY_SHOW_UI_BUTTONS: &str = "orbit_show_ui_buttons";

/// Active id used when nothing (or nothing readable) was stored
pub const DEFAULT_ACTIVE_ID: BoardId = 1;

/// The flat record persisted under one key per field.
///
/// `None` means "absent" on read and "leave untouched" on write, so a
/// snapshot can carry a partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub boards: Option<Vec<Board>>,
    pub active_board_id: Option<BoardId>,
    pub theme: Option<ThemeMode>,
    pub view: Option<View>,
    pub show_tabs_dock: Option<bool>,
    pub show_ui_buttons: Option<bool>,
}

impl Snapshot {
    /// Full snapshot of the state
    pub fn of(state: &AppState) -> Self {
        Snapshot {
            boards: Some(state.boards.clone()),
            active_board_id: Some(state.active_board_id),
            theme: Some(state.theme),
            view: Some(state.view),
            show_tabs_dock: Some(state.prefs.show_tabs_dock),
            show_ui_buttons: Some(state.prefs.show_ui_buttons),
        }
    }

    /// Overlay the present fields of `other` onto this snapshot
    pub fn merge(&mut self, other: &Snapshot) {
        if let Some(boards) = &other.boards {
            self.boards = Some(boards.clone());
        }
        if other.active_board_id.is_some() {
            self.active_board_id = other.active_board_id;
        }
        if other.theme.is_some() {
            self.theme = other.theme;
        }
        if other.view.is_some() {
            self.view = other.view;
        }
        if other.show_tabs_dock.is_some() {
            self.show_tabs_dock = other.show_tabs_dock;
        }
        if other.show_ui_buttons.is_some() {
            self.show_ui_buttons = other.show_ui_buttons;
        }
    }

    /// Build an in-memory state, filling absent fields with first-run
    /// defaults. The result is not normalized.
    pub fn into_state(self) -> AppState {
        let defaults = AppState::default();
        AppState {
            boards: self.boards.unwrap_or(defaults.boards),
            active_board_id: self.active_board_id.unwrap_or(DEFAULT_ACTIVE_ID),
            view: self.view.unwrap_or_default(),
            theme: self.theme.unwrap_or_default(),
            prefs: UiPrefs {
                show_tabs_dock: self.show_tabs_dock.unwrap_or(true),
                show_ui_buttons: self.show_ui_buttons.unwrap_or(true),
            },
        }
    }
}

/// Parse the leading integer of a string the lenient way stored ids have
/// always been read: surrounding whitespace and trailing junk are ignored.
pub fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(digits.len(), |(i, _)| i);
    if end == 0 {
        return None;
    }
    digits[..end].parse::<i64>().ok().map(|n| n * sign)
}
