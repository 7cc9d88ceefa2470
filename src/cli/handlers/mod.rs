use std::path::{Path, PathBuf};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::backup;
use crate::io::storage::Storage;
use crate::model::{AppState, BackendKind, BoardId, Status, Subtask, ThemeMode, View};
use crate::ops::{Session, Store, StoreError, open_backend, open_session};
use crate::view::{Quadrant, project_board};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;
    let Some(cmd) = cli.command else {
        return Err("no command given (try `orbit --help`)".into());
    };
    let backend = cli.backend.map(backend_kind);
    // Reset must work even when the stored boards no longer load
    if let Commands::Reset(args) = cmd {
        return cmd_reset(cli.data_dir.as_deref(), backend, args);
    }
    let mut session = open_session(cli.data_dir.as_deref(), backend)?;

    match cmd {
        // Read commands
        Commands::Boards => cmd_boards(&session, json),
        Commands::Show(args) => cmd_show(&session, args, json),

        // Boards
        Commands::Board(args) => cmd_board(&mut session, args, json),

        // Tasks
        Commands::Add(args) => cmd_add(&mut session, args, json),
        Commands::Edit(args) => cmd_edit(&mut session, args),
        Commands::Rm(args) => cmd_rm(&mut session, args),
        Commands::Toggle(args) => cmd_toggle(&mut session, args),
        Commands::Mv(args) => cmd_mv(&mut session, args),

        // Preferences
        Commands::View(args) => cmd_view(&mut session, args, json),
        Commands::Prefs(args) => cmd_prefs(&mut session, args, json),

        // Backups
        Commands::Export(args) => cmd_export(&session, args),
        Commands::Import(args) => cmd_import(&mut session, args),
        // Handled before the store is loaded
        Commands::Reset(_) => Ok(()),
    }?;

    // The change is applied in memory either way; a failed write only warns
    if let Some(e) = session.store.take_persist_error() {
        eprintln!("warning: could not save: {}", e);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub fn backend_kind(arg: BackendArg) -> BackendKind {
    match arg {
        BackendArg::Extension => BackendKind::Extension,
        BackendArg::Local => BackendKind::Local,
    }
}

/// Find a board by numeric id, then by case-insensitive name
fn resolve_board(state: &AppState, query: &str) -> Result<BoardId, String> {
    let query = query.trim();
    if let Some(id) = query
        .parse::<BoardId>()
        .ok()
        .filter(|id| state.board(*id).is_some())
    {
        return Ok(id);
    }
    let matches: Vec<BoardId> = state
        .boards
        .iter()
        .filter(|b| b.name.eq_ignore_ascii_case(query))
        .map(|b| b.id)
        .collect();
    match matches.as_slice() {
        [id] => Ok(*id),
        [] => Err(format!("board not found: {}", query)),
        _ => Err(format!("board name is ambiguous, use its id: {}", query)),
    }
}

/// Accept a status name or a quadrant id/code
fn parse_status(s: &str) -> Result<Status, String> {
    Status::parse(s)
        .or_else(|| Quadrant::parse(s).map(Quadrant::status))
        .ok_or_else(|| {
            format!(
                "unknown status: {} (expected backlog, todo, inprogress, done, ui, nui, uni or nuni)",
                s
            )
        })
}

fn require_task<S: Storage>(store: &Store<S>, id: i64) -> Result<(), String> {
    match store.active_board().task(id) {
        Some(_) => Ok(()),
        None => Err(format!(
            "task not found on board '{}': {}",
            store.active_board().name,
            id
        )),
    }
}

fn confirm(prompt: &str) -> Result<bool, std::io::Error> {
    eprint!("{} [y/N] ", prompt);
    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

fn print_json<T: serde::Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_boards(session: &Session, json: bool) -> CmdResult {
    let state = session.store.state();
    if json {
        let boards: Vec<BoardJson> = state
            .boards
            .iter()
            .map(|b| board_to_json(b, b.id == state.active_board_id))
            .collect();
        return print_json(&boards);
    }
    for board in &state.boards {
        println!("{}", format_board_line(board, board.id == state.active_board_id));
    }
    Ok(())
}

fn cmd_show(session: &Session, args: ShowArgs, json: bool) -> CmdResult {
    let state = session.store.state();
    let view = match args.view.as_deref() {
        Some(v) => View::parse(v).ok_or_else(|| format!("unknown view: {}", v))?,
        None => state.view,
    };
    let board = match args.board.as_deref() {
        Some(query) => {
            let id = resolve_board(state, query)?;
            state.board(id).ok_or("board disappeared")?
        }
        None => state.active_board(),
    };
    let projection = project_board(board, view);
    if json {
        return print_json(&projection_to_json(&projection));
    }
    println!("{} ({})", board.name, view.as_str());
    println!();
    for line in format_projection(&projection) {
        println!("{}", line);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Boards
// ---------------------------------------------------------------------------

fn cmd_board(session: &mut Session, args: BoardCmd, json: bool) -> CmdResult {
    let store = &mut session.store;
    match args.action {
        BoardAction::New(a) => {
            let id = store
                .create_board(&a.name)
                .ok_or("board name cannot be empty")?;
            if json {
                let board = store.active_board();
                return print_json(&board_to_json(board, true));
            }
            println!("{}", id);
        }
        BoardAction::Rename(a) => {
            let id = resolve_board(store.state(), &a.board)?;
            if !store.rename_board(id, &a.name) {
                return Err("board name cannot be empty".into());
            }
            println!("renamed board {} to '{}'", id, a.name.trim());
        }
        BoardAction::Rm(a) => {
            let id = resolve_board(store.state(), &a.board)?;
            if store.state().boards.len() <= 1 {
                return Err(StoreError::LastBoard.into());
            }
            let name = store
                .state()
                .board(id)
                .map(|b| b.name.clone())
                .unwrap_or_default();
            if !a.yes && !confirm(&format!("Delete board '{}' and all its tasks?", name))? {
                println!("cancelled");
                return Ok(());
            }
            store.delete_board(id)?;
            println!("deleted board '{}'", name);
        }
        BoardAction::Use(a) => {
            let id = resolve_board(store.state(), &a.board)?;
            store.switch_board(id);
            println!("active board: {}", store.active_board().name);
        }
        BoardAction::Clear(a) => {
            let name = store.active_board().name.clone();
            if !a.yes && !confirm(&format!("Remove every task from '{}'?", name))? {
                println!("cancelled");
                return Ok(());
            }
            store.clear_board();
            println!("cleared board '{}'", name);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

fn cmd_add(session: &mut Session, args: AddArgs, json: bool) -> CmdResult {
    let status = args.status.as_deref().map(parse_status).transpose()?;
    let subtasks = args.subtasks.iter().map(Subtask::new).collect();
    let id = session
        .store
        .add_task(&args.text, status, subtasks)
        .ok_or("task text cannot be empty")?;
    if json {
        if let Some(task) = session.store.active_board().task(id) {
            return print_json(&task_to_json(task));
        }
    }
    println!("{}", id);
    Ok(())
}

fn cmd_edit(session: &mut Session, args: EditArgs) -> CmdResult {
    let store = &mut session.store;
    require_task(store, args.id)?;
    let subtasks = if args.clear_subs {
        Vec::new()
    } else if args.subtasks.is_empty() {
        store
            .active_board()
            .task(args.id)
            .map(|t| t.subtasks.clone())
            .unwrap_or_default()
    } else {
        args.subtasks.iter().map(Subtask::new).collect()
    };
    if !store.edit_task(args.id, &args.text, subtasks) {
        return Err("task text cannot be empty".into());
    }
    println!("{}", args.id);
    Ok(())
}

fn cmd_rm(session: &mut Session, args: RmArgs) -> CmdResult {
    require_task(&session.store, args.id)?;
    session.store.delete_task(args.id);
    println!("deleted {}", args.id);
    Ok(())
}

fn cmd_toggle(session: &mut Session, args: ToggleArgs) -> CmdResult {
    let store = &mut session.store;
    require_task(store, args.id)?;
    let index = args
        .index
        .checked_sub(1)
        .ok_or("subtask numbers start at 1")?;
    if !store.toggle_subtask(args.id, index) {
        return Err(format!("task {} has no subtask {}", args.id, args.index).into());
    }
    if let Some(sub) = store
        .active_board()
        .task(args.id)
        .and_then(|t| t.subtasks.get(index))
    {
        let mark = if sub.completed { 'x' } else { ' ' };
        println!("[{}] {}", mark, sub.text);
    }
    Ok(())
}

fn cmd_mv(session: &mut Session, args: MvArgs) -> CmdResult {
    let store = &mut session.store;
    require_task(store, args.id)?;
    let status = parse_status(&args.to)?;
    let moved = match args.before {
        Some(before) => {
            require_task(store, before)?;
            store.move_task_before(args.id, status, Some(before))
        }
        None => store.move_task(args.id, status, args.index),
    };
    if !moved {
        return Err("a task cannot be placed before itself".into());
    }
    println!("moved {} to {}", args.id, status.label());
    Ok(())
}

// ---------------------------------------------------------------------------
// Preferences
// ---------------------------------------------------------------------------

fn cmd_view(session: &mut Session, args: ViewArgs, json: bool) -> CmdResult {
    let store = &mut session.store;
    let view = match args.view.as_deref() {
        Some(v) => {
            let view = View::parse(v).ok_or_else(|| format!("unknown view: {}", v))?;
            store.set_view(view);
            view
        }
        None => store.toggle_view(),
    };
    if json {
        return print_json(&serde_json::json!({ "view": view.as_str() }));
    }
    println!("{}", view.as_str());
    Ok(())
}

fn cmd_prefs(session: &mut Session, args: PrefsArgs, json: bool) -> CmdResult {
    let store = &mut session.store;
    if let Some(theme) = args.theme.as_deref() {
        let theme = ThemeMode::parse(theme).ok_or_else(|| format!("unknown theme: {}", theme))?;
        store.set_theme(theme);
    }
    if let Some(tabs) = args.tabs {
        store.set_show_tabs_dock(tabs.enabled());
    }
    if let Some(buttons) = args.buttons {
        store.set_show_ui_buttons(buttons.enabled());
    }
    if json {
        return print_json(&prefs_to_json(store.state()));
    }
    for line in format_prefs(store.state()) {
        println!("{}", line);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Backups
// ---------------------------------------------------------------------------

fn cmd_export(session: &Session, args: ExportArgs) -> CmdResult {
    let export = session.store.export_boards()?;
    let (dir, file_name) = match args.output.as_deref() {
        Some("-") => {
            println!("{}", export.json);
            return Ok(());
        }
        Some(path) => split_output_path(Path::new(path), &export.file_name),
        None => {
            let dir = match &session.config.ui.export_dir {
                Some(dir) => PathBuf::from(dir),
                None => std::env::current_dir()?,
            };
            (dir, export.file_name.clone())
        }
    };
    let path = backup::write_backup(&dir, &file_name, &export.json)?;
    println!(
        "exported {} boards to {}",
        session.store.state().boards.len(),
        path.display()
    );
    Ok(())
}

/// An explicit output path names the file; a directory gets the default name
fn split_output_path(path: &Path, default_name: &str) -> (PathBuf, String) {
    if path.is_dir() {
        return (path.to_path_buf(), default_name.to_string());
    }
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| default_name.to_string());
    (dir, name)
}

fn cmd_import(session: &mut Session, args: ImportArgs) -> CmdResult {
    let content = backup::read_backup(Path::new(&args.file))?;
    let count = session.store.import_boards(&content)?;
    println!(
        "imported {} boards; active board: {}",
        count,
        session.store.active_board().name
    );
    Ok(())
}

fn cmd_reset(
    data_dir: Option<&str>,
    backend: Option<BackendKind>,
    args: ConfirmArgs,
) -> CmdResult {
    let (_, _, mut storage) = open_backend(data_dir, backend)?;
    if !args.yes && !confirm("Delete ALL boards, tasks and settings?")? {
        println!("cancelled");
        return Ok(());
    }
    storage.clear()?;
    tracing::info!("reset all data");
    println!("all data cleared");
    Ok(())
}
