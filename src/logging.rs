use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `ORBIT_LOG=debug`)
pub const LOG_ENV: &str = "ORBIT_LOG";

/// Log file written inside the data directory
pub const LOG_FILE: &str = "orbit.log";

/// Install a file subscriber when `ORBIT_LOG` is set. Stdout and stderr
/// belong to the TUI and CLI output, so logs only ever go to the file.
/// Returns true if logging was enabled.
pub fn init(data_dir: &Path) -> bool {
    let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) else {
        return false;
    };
    if std::fs::create_dir_all(data_dir).is_err() {
        return false;
    }
    let file = match OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join(LOG_FILE))
    {
        Ok(f) => f,
        Err(_) => return false,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .is_ok()
}
