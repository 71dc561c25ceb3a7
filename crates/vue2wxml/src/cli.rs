//! Command-line argument parsing.

use clap::Parser;
use std::path::PathBuf;

/// Convert Vue single-file component templates to WeChat WXML
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "vue2wxml")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Files or directories to convert (default: the workspace)
    pub paths: Vec<PathBuf>,

    /// Workspace directory; the config file is looked up here
    #[arg(long)]
    pub workspace: Option<PathBuf>,

    /// Directory to write `.wxml` files to (default: next to each source)
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Print converted markup to stdout instead of writing files
    #[arg(long)]
    pub stdout: bool,

    /// Path to a vue2wxml.json config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Reconvert files as they change
    #[arg(short, long)]
    pub watch: bool,

    /// Diagnostics format
    #[arg(long, default_value = "human")]
    pub output: OutputFormat,

    /// Ignore patterns (glob)
    #[arg(long)]
    pub ignore: Vec<String>,

    /// Drop template comments from the output
    #[arg(long)]
    pub no_comments: bool,

    /// Show timing information
    #[arg(long)]
    pub timings: bool,

    /// Preserve watch output (don't clear screen)
    #[arg(long)]
    pub preserve_watch_output: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// One JSON object per line
    Json,
    /// `file:line:col:code:message` lines
    Machine,
}
