use crate::pipeline::{BenchmarkMode, Mode};
use crate::report::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "gh-visibility",
    version,
    about = "Score how clearly a GitHub account's repositories present themselves"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Config file used instead of ./gh-visibility.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// GitHub personal access token
    #[arg(long, env = "GITHUB_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a user's public repositories and score their presentation
    Scan(ScanCommand),
    /// Inspect the available presets
    Presets(PresetsCommand),
    /// Show recorded scans for a user
    History(HistoryCommand),
    /// Run the HTTP service
    Serve(ServeCommand),
}

#[derive(Args)]
pub struct ScanCommand {
    /// GitHub username to scan
    #[arg(long)]
    pub user: String,
    /// Preset id (defaults to presets.default from config)
    #[arg(long)]
    pub preset: Option<String>,
    #[arg(long, value_enum, default_value = "table")]
    pub output: OutputFormat,
    /// Write the report here instead of stdout
    #[arg(long)]
    pub outfile: Option<PathBuf>,
    /// Only evaluate the repository with this exact name
    #[arg(long)]
    pub repo: Option<String>,
    #[arg(long, value_enum, default_value = "none")]
    pub benchmark: BenchmarkMode,
    /// analyze = scores only; suggest = scores plus advisory suggestions
    #[arg(long, value_enum, default_value = "analyze")]
    pub mode: Mode,
    /// Add LLM-generated notes (suggest mode only)
    #[arg(long)]
    pub llm: bool,
    /// Fetch community profiles to fill license/contributing/template flags
    #[arg(long)]
    pub community: bool,
    /// Do not record this scan in the history store
    #[arg(long)]
    pub no_history: bool,
    /// Exit with status 1 if any repository's overall score is below this
    #[arg(long)]
    pub fail_under: Option<f64>,
}

#[derive(Args)]
pub struct PresetsCommand {
    #[command(subcommand)]
    pub action: PresetsAction,
}

#[derive(Subcommand)]
pub enum PresetsAction {
    /// List preset ids
    List,
    /// Print one preset as JSON
    Show { id: String },
}

#[derive(Args)]
pub struct HistoryCommand {
    #[arg(long)]
    pub user: String,
    #[arg(long, default_value_t = 20)]
    pub limit: usize,
}

#[derive(Args)]
pub struct ServeCommand {
    /// Address to bind (defaults to server.bind from config)
    #[arg(long)]
    pub bind: Option<String>,
}
