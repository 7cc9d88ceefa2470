use std::path::PathBuf;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::storage::{MemoryStorage, Storage};
use crate::model::{Config, Status};
use crate::ops::{Session, StepClock, Store};
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Render the whole app at the standard test size
pub fn render_app(app: &mut App) -> String {
    render_to_string(TERM_W, TERM_H, |frame, _| super::render(frame, app))
}

/// An App on in-memory storage whose active board holds `tasks` in order.
/// Task ids start at 100 and count up.
pub fn app_with_tasks(tasks: &[(&str, Status)]) -> App {
    let storage: Box<dyn Storage> = Box::new(MemoryStorage::new());
    let mut store = Store::load(storage, Box::new(StepClock::new(100))).unwrap();
    for (text, status) in tasks {
        store.add_task(text, Some(*status), vec![]).unwrap();
    }
    App::new(Session {
        data_dir: PathBuf::from("/tmp/orbit-test"),
        config: Config::default(),
        store,
    })
}
