mod cli;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use cli::{Cli, CliError};
use rebike::config::Config;
use rebike::logging::init_tracing;
use rebike::App;

fn main() -> anyhow::Result<ExitCode> {
    let args = Cli::parse();
    init_tracing();

    let config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;
    tracing::debug!(base_url = %config.api.base_url, "Configuration loaded");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(run(args, config))
}

async fn run(args: Cli, config: Config) -> anyhow::Result<ExitCode> {
    let app = App::new(&config).context("Failed to create API client")?;
    app.auth.restore();

    let progress = if args.quiet {
        None
    } else {
        Some(tokio::spawn(cli::show_progress(app.coordinator.subscribe())))
    };
    let result = cli::execute(&app, args.command).await;
    if let Some(progress) = progress {
        progress.abort();
    }

    if let Some(modal) = app.coordinator.read(|s| s.ui.status_modal().cloned()) {
        cli::print_status(&modal);
    }

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(CliError::Flow(err)) if err.is_validation() => {
            eprintln!("error: {}", err);
            Ok(ExitCode::from(2))
        }
        // Already shown through the status modal.
        Err(CliError::Flow(err)) => {
            tracing::debug!(error = %err, "Command failed");
            Ok(ExitCode::FAILURE)
        }
        Err(err) => {
            eprintln!("error: {}", err);
            Ok(ExitCode::FAILURE)
        }
    }
}
