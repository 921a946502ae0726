//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// draftpad - offline-first single-document editor
///
/// Keeps one document persisted locally with debounced autosave, and
/// keeps the application's static assets usable without a network.
#[derive(Parser, Debug)]
#[command(name = "draftpad")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "DRAFTPAD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Skip local .draftpad.toml discovery
    #[arg(long, global = true)]
    pub no_local: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the saved document
    Show,

    /// Replace the document content and save
    Write(WriteArgs),

    /// Open a text file into the document
    Open(OpenArgs),

    /// Start a new empty document (keeps a saved empty entry)
    New(NewArgs),

    /// Clear the document and delete the saved entry
    Clear(ClearArgs),

    /// Export the document to a file
    Export(ExportArgs),

    /// Show document and cache state
    Status(StatusArgs),

    /// Toggle debounced autosave
    Autosave(AutosaveArgs),

    /// Replay the captured install offer
    Install(InstallArgs),

    /// Initialize a project-local .draftpad.toml config
    Init(InitArgs),

    /// Show or edit configuration
    Config(ConfigArgs),

    /// Manage the offline asset cache
    Cache(CacheArgs),
}

/// Arguments for the write command
#[derive(Parser, Debug)]
pub struct WriteArgs {
    /// New document content; reads stdin when omitted
    pub text: Option<String>,
}

/// Arguments for the open command
#[derive(Parser, Debug)]
pub struct OpenArgs {
    /// Text file to open
    pub file: PathBuf,
}

/// Arguments for the new command
#[derive(Parser, Debug)]
pub struct NewArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the clear command
#[derive(Parser, Debug)]
pub struct ClearArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the export command
#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Output path (defaults to the configured export filename)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the status command
#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Autosave toggle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AutosaveState {
    On,
    Off,
}

/// Arguments for the autosave command
#[derive(Parser, Debug)]
pub struct AutosaveArgs {
    /// Desired state
    pub state: AutosaveState,
}

/// Arguments for the install command
#[derive(Parser, Debug)]
pub struct InstallArgs {
    /// Accept the install prompt without asking
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the init command
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Overwrite existing .draftpad.toml
    #[arg(short, long)]
    pub force: bool,

    /// Target directory (defaults to current directory)
    #[arg(short, long)]
    pub path: Option<PathBuf>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

/// Arguments for the cache command
#[derive(Parser, Debug)]
pub struct CacheArgs {
    /// Subcommand for cache
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// Fetch every manifest asset into a new generation
    Warm,

    /// Prune stale generations and make the current one active
    Activate,

    /// List cache generations
    Status {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Fetch a URL through the intercept path (cache-first)
    Serve {
        /// Absolute URL to fetch
        url: String,

        /// Accept header to send (e.g. text/html)
        #[arg(long)]
        accept: Option<String>,
    },
}

/// Output format for status commands
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}
