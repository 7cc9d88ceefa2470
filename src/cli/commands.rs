use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "orbit", about = concat!("orbit v", env!("CARGO_PKG_VERSION"), " - kanban and priority matrix in your terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Data directory (default: $ORBIT_DIR, then ~/.orbit)
    #[arg(short = 'C', long = "data-dir", global = true)]
    pub data_dir: Option<String>,

    /// Storage backend, overriding orbit.toml
    #[arg(long, global = true, value_enum)]
    pub backend: Option<BackendArg>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum BackendArg {
    Extension,
    Local,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    pub fn enabled(self) -> bool {
        matches!(self, Switch::On)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all boards
    Boards,
    /// Board management
    Board(BoardCmd),
    /// Add a task to the active board
    Add(AddArgs),
    /// Replace a task's text (and optionally its subtasks)
    Edit(EditArgs),
    /// Delete a task
    Rm(RmArgs),
    /// Toggle a subtask's completion
    Toggle(ToggleArgs),
    /// Move a task to a column or quadrant
    Mv(MvArgs),
    /// Show the active board as kanban columns or matrix quadrants
    Show(ShowArgs),
    /// Show or set the default view
    View(ViewArgs),
    /// Show or change display preferences
    Prefs(PrefsArgs),
    /// Write a JSON backup of all boards
    Export(ExportArgs),
    /// Replace all boards with a JSON backup
    Import(ImportArgs),
    /// Delete all boards, tasks and settings
    Reset(ConfirmArgs),
}

// ---------------------------------------------------------------------------
// Board management
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct BoardCmd {
    #[command(subcommand)]
    pub action: BoardAction,
}

#[derive(Subcommand)]
pub enum BoardAction {
    /// Create a board and make it active
    New(BoardNewArgs),
    /// Rename a board
    Rename(BoardRenameArgs),
    /// Delete a board
    Rm(BoardRmArgs),
    /// Make a board active
    Use(BoardRefArg),
    /// Remove every task from the active board
    Clear(ConfirmArgs),
}

#[derive(Args)]
pub struct BoardNewArgs {
    /// Board name
    pub name: String,
}

#[derive(Args)]
pub struct BoardRenameArgs {
    /// Board id or name
    pub board: String,
    /// New name
    pub name: String,
}

#[derive(Args)]
pub struct BoardRmArgs {
    /// Board id or name
    pub board: String,
    /// Skip confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct BoardRefArg {
    /// Board id or name
    pub board: String,
}

#[derive(Args)]
pub struct ConfirmArgs {
    /// Skip confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

// ---------------------------------------------------------------------------
// Task commands
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    /// Task text
    pub text: String,
    /// Status (backlog, todo, inprogress, done) or quadrant (ui, nui, uni, nuni)
    #[arg(long, short = 's')]
    pub status: Option<String>,
    /// Add a subtask (repeatable)
    #[arg(long = "sub", action = clap::ArgAction::Append)]
    pub subtasks: Vec<String>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task ID
    pub id: i64,
    /// New task text
    pub text: String,
    /// Replace subtasks with these (repeatable)
    #[arg(long = "sub", action = clap::ArgAction::Append)]
    pub subtasks: Vec<String>,
    /// Remove all subtasks
    #[arg(long, conflicts_with = "subtasks")]
    pub clear_subs: bool,
}

#[derive(Args)]
pub struct RmArgs {
    /// Task ID
    pub id: i64,
}

#[derive(Args)]
pub struct ToggleArgs {
    /// Task ID
    pub id: i64,
    /// Subtask number (1-based)
    pub index: usize,
}

#[derive(Args)]
pub struct MvArgs {
    /// Task ID
    pub id: i64,
    /// Target status or quadrant
    pub to: String,
    /// Position in the board's task list (0-based, counted without the moved task)
    #[arg(long, conflicts_with = "before")]
    pub index: Option<usize>,
    /// Insert in front of this task
    #[arg(long)]
    pub before: Option<i64>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// View to render (default: the saved view)
    #[arg(long)]
    pub view: Option<String>,
    /// Board id or name (default: the active board)
    #[arg(long, short = 'b')]
    pub board: Option<String>,
}

#[derive(Args)]
pub struct ViewArgs {
    /// kanban or matrix; omit to toggle
    pub view: Option<String>,
}

#[derive(Args)]
pub struct PrefsArgs {
    /// Show the board tabs dock
    #[arg(long, value_enum)]
    pub tabs: Option<Switch>,
    /// Show key hints / UI buttons
    #[arg(long, value_enum)]
    pub buttons: Option<Switch>,
    /// Color theme (light or dark)
    #[arg(long)]
    pub theme: Option<String>,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Output file, or `-` for stdout (default: <board name>.json in the current directory)
    #[arg(long, short = 'o')]
    pub output: Option<String>,
}

#[derive(Args)]
pub struct ImportArgs {
    /// Backup file (a JSON array of boards)
    pub file: String,
}
