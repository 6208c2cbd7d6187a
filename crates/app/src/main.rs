// Composition root: wire the adapters to the dispatch service and feed it
// command messages, either from stdin (serve) or from CLI flags (run).

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

use gitrelay::adapters::{catalog::FileCatalog, git::GitAdapter, notify::LogSurface};
use gitrelay::cli::{CliArgs, Mode};
use gitrelay::config::Config;
use gitrelay::services::dispatch::{parse_request, DispatchService};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with env filter
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = CliArgs::parse();
    let config = Config::from_cli_and_file(&args)?;
    info!(catalog = %config.catalog_path.display(), "starting gitrelay");

    let git = Arc::new(GitAdapter::new());
    let catalog = Arc::new(FileCatalog::with_path(&config.catalog_path));
    let sink = Arc::new(LogSurface::new());
    let service = DispatchService::new(git, catalog, sink);

    match args.mode {
        Some(Mode::Run(run)) => {
            let request = run.into_request();
            match service.handle(&request) {
                Ok(operation) => {
                    let success = operation.wait().await;
                    if !success {
                        std::process::exit(1);
                    }
                }
                Err(e) => {
                    error!("request rejected: {e}");
                    eprintln!("Error: {e}");
                    std::process::exit(2);
                }
            }
        }
        _ => serve(&service).await?,
    }

    info!("gitrelay shut down cleanly");
    Ok(())
}

/// Read newline-delimited JSON command messages from stdin until EOF.
/// Each message is handled independently; a rejected message is logged
/// and processing continues.
async fn serve(service: &DispatchService) -> Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let request = match parse_request(line) {
            Ok(request) => request,
            Err(e) => {
                error!("dropping message: {e}");
                continue;
            }
        };

        match service.handle(&request) {
            Ok(operation) => {
                info!(
                    surface = %operation.surface,
                    kind = %operation.kind,
                    repo = %operation.repo_name,
                    "dispatched"
                );
            }
            Err(e) => error!(command = %request.command, "request rejected: {e}"),
        }
    }

    Ok(())
}
