//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Tarpon - Registry dependency explorer
///
/// Browse package metadata, resolve transitive dependencies, and
/// bulk-download tarballs from an npm-compatible registry.
#[derive(Parser, Debug)]
#[command(name = "tarpon")]
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
    #[arg(short, long, global = true, env = "TARPON_CONFIG")]
    pub config: Option<PathBuf>,

    /// Registry base URL (overrides config)
    #[arg(short, long, global = true, env = "TARPON_REGISTRY")]
    pub registry: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a package's latest metadata and direct dependencies
    Info(InfoArgs),

    /// Resolve a package's transitive dependency set
    Resolve(ResolveArgs),

    /// Emit a package's dependency graph for visualization
    Graph(GraphArgs),

    /// Download tarballs for a package and optionally its dependencies
    Download(DownloadArgs),

    /// Manage the metadata cache
    Cache(CacheArgs),

    /// Show or edit configuration
    Config(ConfigArgs),
}

/// Arguments for the info command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Package name
    pub name: String,

    /// Emit machine-readable JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the resolve command
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Root package name
    pub name: String,

    /// Emit machine-readable JSON
    #[arg(long)]
    pub json: bool,
}

/// Graph output format
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphFormat {
    /// Node/edge lists as JSON
    Json,
    /// Graphviz DOT
    Dot,
}

/// Arguments for the graph command
#[derive(Parser, Debug)]
pub struct GraphArgs {
    /// Root package name
    pub name: String,

    /// Maximum nodes admitted into the graph (default from config)
    #[arg(long)]
    pub max_nodes: Option<usize>,

    /// Output format
    #[arg(short, long, default_value = "json")]
    pub format: GraphFormat,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the download command
#[derive(Parser, Debug)]
pub struct DownloadArgs {
    /// Package name
    pub name: String,

    /// Also download direct dependencies
    #[arg(long, conflicts_with = "recursive")]
    pub deps: bool,

    /// Also download the whole transitive dependency set
    #[arg(long)]
    pub recursive: bool,

    /// Directory to write tarballs into (default from config)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,
}

/// Arguments for the cache command
#[derive(Parser, Debug)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// List cached metadata entries
    List {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Clear the metadata cache (memory and disk)
    Clear {
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Print the cache directory
    Path,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the active configuration
    Show,

    /// Print the config file path
    Path,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

/// Tabular output format
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}
