use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, warn};

use provolution_ui::app::{App, Command};
use provolution_ui::config::AppConfig;
use provolution_ui::logging;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Provolution climate footprint client.
///
/// Without a subcommand the footprint wizard starts. Answers go to the
/// Provolution API, which returns the footprint, comparisons and
/// recommendations.
#[derive(Debug, Parser)]
#[command(name = "provolution", version)]
struct Cli {
    /// Config file. Defaults to `provolution.toml` when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// API base URL including the version prefix.
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Use the local development server.
    #[arg(long, global = true)]
    local: bool,

    /// Log filter, e.g. `debug` or `provolution_http=trace`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_level.as_deref());

    let config = AppConfig::load(cli.config.as_deref())
        .context("failed to load configuration")?
        .with_cli_overrides(cli.api_url, cli.local);

    if let Some(path) = &config.log_file {
        if let Err(err) = logging::enable_file_logging(path) {
            warn!(error = %err, "file logging disabled");
        }
    }

    let command = cli.command.unwrap_or(Command::Wizard);
    debug!(command = command.name(), api = %config.api_url, "starting");

    let app = App::build(config)?;
    app.run(command).await
}
