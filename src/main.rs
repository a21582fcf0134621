// repodesk: TUI for Gitness registry details and pull request descriptions.
// Parses the command line, sets up logging, and runs the app on the terminal.

mod api;
mod app;
mod config;
mod error;
mod state;
mod ui;

use clap::{Parser, Subcommand};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::api::GitnessClient;
use crate::app::App;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::state::RepositoryDetailsTab;

const LOG_ENV: &str = "REPODESK_LOG";

#[derive(Debug, Parser)]
#[command(name = "repodesk", version, about)]
struct Cli {
    /// Gitness server URL (overrides config and GITNESS_URL)
    #[arg(long, global = true)]
    server: Option<String>,

    /// Open the registry configuration read-only
    #[arg(long, global = true)]
    readonly: bool,

    /// Log filter, e.g. "debug" or "repodesk=trace"
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show registry details
    Registry {
        /// Registry reference, e.g. "space/registry"
        registry_ref: String,
        /// Tab to open: packages, configuration, or webhooks
        #[arg(long, default_value = "packages")]
        tab: RepositoryDetailsTab,
    },
    /// Show a pull request and edit its description
    Pullreq {
        /// Repository path, e.g. "space/repo"
        repo_path: String,
        /// Pull request number
        number: u64,
    },
}

/// Log to a file in the data dir; the terminal belongs to the UI.
fn init_logging(filter: Option<&str>) -> Option<WorkerGuard> {
    let dir = config::data_dir().unwrap_or_else(std::env::temp_dir);
    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("Warning: cannot create log directory {}: {e}", dir.display());
        return None;
    }

    let filter = match filter {
        Some(filter) => EnvFilter::new(filter),
        None => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    let file_appender = tracing_appender::rolling::never(&dir, "repodesk.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_env_filter(filter)
        .with_ansi(false)
        .init();
    Some(guard)
}

fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load()?;
    if let Some(server) = &cli.server {
        config.server_url = server.clone();
    }
    config.readonly |= cli.readonly;
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.log_level.as_deref());

    let config = resolve_config(&cli)?;
    tracing::info!(server = %config.server_url, "starting repodesk");
    let client = GitnessClient::new(&config.server_url, config.token.as_deref())?;

    let mut app = match cli.command {
        Command::Registry { registry_ref, tab } => {
            App::registry(client, registry_ref, tab, config.readonly)
        }
        Command::Pullreq { repo_path, number } => App::pull_request(client, repo_path, number),
    };

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();

    result.map_err(AppError::Io)
}

