use clap::Parser;
use orbit::cli::commands::Cli;
use orbit::cli::handlers;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        // No subcommand → launch TUI
        None => orbit::tui::run(
            cli.data_dir.as_deref(),
            cli.backend.map(handlers::backend_kind),
        ),
        Some(_) => handlers::dispatch(cli),
    };
    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
