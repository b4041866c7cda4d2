mod analyze;
mod benchmark;
mod cli;
mod config;
mod error;
mod github;
mod history;
mod outcome;
mod pipeline;
mod presets;
mod report;
mod scan;
mod serve;
mod suggest;
mod types;

use crate::error::{Result, VisibilityError};
use crate::github::GitHubClient;
use crate::pipeline::{Evaluator, Mode, ScanOptions};
use crate::report::{OutputFormat, ReportContext};
use crate::types::config::AppConfig;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const BELOW_THRESHOLD: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Some("error"),
        (false, 0) => None,
        (false, 1) => Some("info"),
        (false, _) => Some("debug"),
    };
    let filter = match level {
        Some(level) => EnvFilter::new(format!("warn,gh_visibility={level}")),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<i32> {
    let cli::Cli {
        verbose,
        quiet,
        config: config_path,
        token,
        command,
    } = cli::Cli::parse();
    init_logging(verbose, quiet);

    let root = std::env::current_dir()?;
    let app_config = config::load_config(&root, config_path.as_deref())?;

    match command {
        cli::Commands::Scan(cmd) => run_scan(&app_config, token, cmd),
        cli::Commands::Presets(cmd) => match cmd.action {
            cli::PresetsAction::List => {
                for id in presets::list_presets(&app_config.presets.dir)? {
                    println!("{id}");
                }
                Ok(exit_code::SUCCESS)
            }
            cli::PresetsAction::Show { id } => {
                let preset = presets::load_preset(&app_config.presets.dir, &id)?;
                println!("{}", serde_json::to_string_pretty(&preset)?);
                Ok(exit_code::SUCCESS)
            }
        },
        cli::Commands::History(cmd) => {
            let records = match app_config.history.resolved_path() {
                Some(path) if path.exists() => {
                    history::HistoryStore::open(&path)?.recent(&cmd.user, cmd.limit)?
                }
                _ => Vec::new(),
            };
            if records.is_empty() {
                println!("No scans recorded for {}.", cmd.user);
            }
            for record in records {
                println!(
                    "#{} {} preset={} repos={}",
                    record.scan_id, record.timestamp, record.preset_id, record.repo_count
                );
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Serve(cmd) => {
            let bind = cmd.bind.unwrap_or_else(|| app_config.server.bind.clone());
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            runtime.block_on(serve::run(app_config, &bind))?;
            Ok(exit_code::SUCCESS)
        }
    }
}

fn run_scan(config: &AppConfig, token: Option<String>, cmd: cli::ScanCommand) -> Result<i32> {
    let preset_id = cmd
        .preset
        .clone()
        .unwrap_or_else(|| config.presets.default.clone());
    let preset = presets::load_preset(&config.presets.dir, &preset_id)?;
    let token = token
        .filter(|token| !token.trim().is_empty())
        .ok_or(VisibilityError::MissingToken)?;

    let client = GitHubClient::new(token, &config.github.api_root);
    let options = ScanOptions {
        mode: cmd.mode,
        benchmark: cmd.benchmark,
        repo_filter: cmd.repo.clone(),
        community: cmd.community || config.github.community_profile,
    };
    let mut evaluations = Evaluator::new(&client, &preset, options).evaluate_account(&cmd.user)?;

    if !cmd.no_history {
        let _ = history::record_scan(&config.history, &cmd.user, &preset.id, &evaluations);
    }

    if cmd.llm {
        if cmd.mode == Mode::Suggest {
            let augmented =
                pipeline::apply_llm(&mut evaluations, &config.llm, None, &preset).into_value();
            info!(repos = augmented, "llm notes added");
        } else {
            warn!("--llm only applies with --mode suggest; ignoring");
        }
    }

    let context = ReportContext {
        username: &cmd.user,
        preset_id: &preset.id,
        show_suggestions: cmd.mode == Mode::Suggest,
    };
    let rendered = report::render(&evaluations, cmd.output, &context)?;
    match &cmd.outfile {
        Some(path) => {
            std::fs::write(path, ensure_trailing_newline(rendered))?;
            if cmd.output == OutputFormat::Markdown {
                eprintln!("Wrote markdown report to {}", path.display());
            }
        }
        None => print!("{}", ensure_trailing_newline(rendered)),
    }

    if let Some(threshold) = cmd.fail_under {
        let below = evaluations
            .iter()
            .filter(|evaluation| evaluation.overall() < threshold)
            .count();
        if below > 0 {
            eprintln!("{below} repositories scored below {threshold}");
            return Ok(exit_code::BELOW_THRESHOLD);
        }
    }
    Ok(exit_code::SUCCESS)
}

fn ensure_trailing_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

fn main() {
    match run() {
        Ok(code) => {
            if code != exit_code::SUCCESS {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
