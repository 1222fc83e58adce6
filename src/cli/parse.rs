//! CLI parse: clap types for patchtree. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// patchtree CLI - browse game patch manifests as a directory tree
#[derive(Parser)]
#[command(name = "patchtree")]
#[command(about = "Browse remotely hosted game patch manifests as a directory tree")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Working directory (config/ is read from here)
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Read manifests from a local mirror directory instead of the relay
    #[arg(long)]
    pub mirror: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List one directory level
    Ls {
        /// File set: launcher, game or all
        #[arg(default_value = "all")]
        set: String,
        /// Location inside the set, as segments or a slash-separated path
        path: Vec<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the directory tree below a location
    Tree {
        /// File set: launcher, game or all
        set: String,
        /// Location inside the set
        path: Vec<String>,
        /// Maximum depth to print
        #[arg(long)]
        depth: Option<usize>,
    },
    /// Total size below a location
    Size {
        /// File set: launcher, game or all
        set: String,
        /// Location inside the set
        path: Vec<String>,
    },
    /// List every directory route in a file set
    Routes {
        /// File set: launcher, game or all
        set: String,
    },
    /// Fetch one file and print it when it is text
    Show {
        /// Full path of the file inside its set
        path: String,
        /// File set holding the file: launcher or game
        #[arg(long, default_value = "launcher")]
        set: String,
    },
    /// Print the effective configuration
    Config,
}

impl Commands {
    /// Stable command name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Ls { .. } => "ls",
            Commands::Tree { .. } => "tree",
            Commands::Size { .. } => "size",
            Commands::Routes { .. } => "routes",
            Commands::Show { .. } => "show",
            Commands::Config => "config",
        }
    }
}
