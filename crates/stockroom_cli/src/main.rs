//! stockroom CLI
//!
//! Interactive console for managing inventory categories, products and
//! low-stock reports backed by a local SQLite file.

mod commands;
mod error;
mod ui;

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;
use stockroom_core::{default_log_level, init_logging, Store};

use crate::commands::App;
use crate::error::{CliError, CliResult};
use crate::ui::Console;

#[derive(Parser)]
#[command(name = "stockroom")]
#[command(about = "Manage inventory categories and products", long_about = None)]
struct Cli {
    /// Inventory database file
    #[arg(long, default_value = stockroom_core::db::DEFAULT_DB_FILE)]
    db: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Directory for rolling log files (defaults to ./logs)
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(&cli);

    match run(&cli) {
        Ok(()) | Err(CliError::EndOfInput) => {
            info!("event=app_exit module=cli status=ok");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("event=app_exit module=cli status=error error={err}");
            eprintln!(
                "{}",
                format!("Error: {err}").if_supports_color(Stderr, |t| t.red())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> CliResult<()> {
    let store = Store::new(cli.db.clone());
    store.initialize()?;

    let app = App::new(&store);
    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());
    commands::main_menu(&app, &mut console)
}

/// Starts file logging. Failure only costs diagnostics, so the session goes on.
fn setup_logging(cli: &Cli) {
    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    let log_dir = match resolve_log_dir(cli.log_dir.as_deref()) {
        Ok(dir) => dir,
        Err(err) => {
            eprintln!("warning: logging disabled: cannot resolve log directory: {err}");
            return;
        }
    };
    if let Err(err) = init_logging(level, &log_dir) {
        eprintln!("warning: logging disabled: {err}");
    }
}

fn resolve_log_dir(requested: Option<&Path>) -> io::Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(match requested {
        Some(dir) if dir.is_absolute() => dir.to_path_buf(),
        Some(dir) => cwd.join(dir),
        None => cwd.join("logs"),
    })
}

#[cfg(test)]
mod tests {
    use super::{resolve_log_dir, Cli};
    use clap::Parser;
    use std::path::{Path, PathBuf};

    #[test]
    fn defaults_match_store_file_name() {
        let cli = Cli::parse_from(["stockroom"]);
        assert_eq!(cli.db, PathBuf::from("inventario.db"));
        assert!(cli.log_level.is_none());
        assert!(cli.log_dir.is_none());
    }

    #[test]
    fn relative_log_dir_resolves_against_cwd() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(resolve_log_dir(None).unwrap(), cwd.join("logs"));
        assert_eq!(
            resolve_log_dir(Some(Path::new("var/log"))).unwrap(),
            cwd.join("var/log")
        );
    }
}
