//! draftpad - offline-first single-document editor
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use draftpad::cli::{Cli, Commands};
use draftpad::config::ConfigManager;
use draftpad::error::DraftpadResult;
use draftpad::ui;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

/// Initialize logging: 0 = warn, 1 = info, 2+ = debug
fn init_logging(verbose: u8, json: bool) {
    let filter = match verbose {
        0 => EnvFilter::new("draftpad=warn"),
        1 => EnvFilter::new("draftpad=info"),
        _ => EnvFilter::new("draftpad=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time();

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run() -> DraftpadResult<()> {
    let cli = Cli::parse();

    // Init command doesn't need config loading
    if let Commands::Init(args) = cli.command {
        init_logging(cli.verbose, false);
        return draftpad::cli::commands::init(args).await;
    }

    // Load configuration
    let config_manager = if let Some(ref path) = cli.config {
        ConfigManager::with_path(path.clone())
    } else {
        ConfigManager::new()
    };

    // Find local config unless --no-local is set
    let local_config_path = if cli.no_local {
        None
    } else {
        let cwd = std::env::current_dir()
            .map_err(|e| draftpad::error::DraftpadError::io("getting current directory", e))?;
        ConfigManager::find_local_config(&cwd)
    };

    let config = config_manager
        .load_merged(local_config_path.as_deref())
        .await?;

    // CLI -v wins over the configured verbosity
    let verbose = cli.verbose.max(u8::from(config.general.verbose));
    init_logging(verbose, config.general.log_format == "json");
    ui::init_theme();

    if let Some(ref path) = local_config_path {
        debug!("Using local config: {}", path.display());
    }

    // Ensure state directories exist
    ConfigManager::ensure_state_dirs(&config).await?;

    // Dispatch to command
    match cli.command {
        Commands::Init(_) => unreachable!("Init handled above"),
        Commands::Show => draftpad::cli::commands::show(&config).await,
        Commands::Write(args) => draftpad::cli::commands::write(args, &config).await,
        Commands::Open(args) => draftpad::cli::commands::open(args, &config).await,
        Commands::New(args) => draftpad::cli::commands::new(args, &config).await,
        Commands::Clear(args) => draftpad::cli::commands::clear(args, &config).await,
        Commands::Export(args) => draftpad::cli::commands::export(args, &config).await,
        Commands::Status(args) => draftpad::cli::commands::status(args, &config).await,
        Commands::Autosave(args) => {
            draftpad::cli::commands::autosave(args, &config_manager).await
        }
        Commands::Install(args) => draftpad::cli::commands::install(args).await,
        Commands::Config(args) => {
            draftpad::cli::commands::config(args, &config_manager, &config).await
        }
        Commands::Cache(args) => draftpad::cli::commands::cache(args, &config).await,
    }
}
