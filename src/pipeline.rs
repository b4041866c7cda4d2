//! Scan pipeline: list, fetch, normalize, score, suggest, benchmark.

use crate::analyze::score;
use crate::benchmark::annotate_internal;
use crate::error::Result;
use crate::github::RepoSource;
use crate::outcome::Outcome;
use crate::scan::normalize;
use crate::suggest::generate_suggestions;
use crate::suggest::llm::{augment, ChatCompletionClient, CompletionClient};
use crate::types::config::LlmConfig;
use crate::types::preset::Preset;
use crate::types::report::RepoEvaluation;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Analyze,
    #[default]
    Suggest,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BenchmarkMode {
    #[default]
    None,
    Internal,
}

#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    pub mode: Mode,
    pub benchmark: BenchmarkMode,
    /// Only evaluate the repository with exactly this name.
    pub repo_filter: Option<String>,
    pub community: bool,
}

pub struct Evaluator<'a, S: RepoSource + ?Sized> {
    source: &'a S,
    preset: &'a Preset,
    options: ScanOptions,
}

impl<'a, S: RepoSource + ?Sized> Evaluator<'a, S> {
    pub fn new(source: &'a S, preset: &'a Preset, options: ScanOptions) -> Self {
        Self {
            source,
            preset,
            options,
        }
    }

    pub fn evaluate_account(&self, username: &str) -> Result<Vec<RepoEvaluation>> {
        self.evaluate_account_at(username, Utc::now())
    }

    /// Same as [`evaluate_account`](Self::evaluate_account) with a fixed clock.
    pub fn evaluate_account_at(
        &self,
        username: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<RepoEvaluation>> {
        let mut evaluations = Vec::new();

        for repo in self.source.list_repos(username) {
            let repo = repo?;
            if let Some(filter) = &self.options.repo_filter {
                if &repo.name != filter {
                    continue;
                }
            }

            debug!(repo = %repo.full_name, "evaluating");
            let readme = self.source.readme(&repo.full_name)?;
            let mut analysis = normalize(&repo, readme.as_deref(), now);
            if self.options.community {
                if let Some(files) = self.source.community_profile(&repo.full_name)? {
                    analysis.apply_community(&files);
                }
            }

            let scores = score(&repo, &analysis, &self.preset.weights);
            let suggestions = match self.options.mode {
                Mode::Suggest => generate_suggestions(&repo, &analysis, &scores, self.preset),
                Mode::Analyze => Vec::new(),
            };

            evaluations.push(RepoEvaluation {
                repo,
                analysis,
                scores,
                suggestions,
            });
        }

        if self.options.benchmark == BenchmarkMode::Internal {
            annotate_internal(&mut evaluations);
        }

        info!(
            username,
            preset = %self.preset.id,
            repos = evaluations.len(),
            "scan complete"
        );
        Ok(evaluations)
    }
}

/// Appends LLM notes to every evaluation. Failures are logged per repository
/// and leave that repository's suggestions unchanged.
pub fn augment_with_llm(
    evaluations: &mut [RepoEvaluation],
    client: &dyn CompletionClient,
    preset: &Preset,
) -> usize {
    let mut degraded = 0;
    for evaluation in evaluations.iter_mut() {
        let outcome = augment(
            client,
            &evaluation.repo,
            &evaluation.suggestions,
            preset.display_name(),
        );
        if outcome.is_degraded() {
            degraded += 1;
        }
        evaluation.suggestions.extend(outcome.into_value());
    }
    degraded
}

/// Builds the chat-completions client and augments the batch. A missing key
/// or any call failure only degrades the result.
pub fn apply_llm(
    evaluations: &mut [RepoEvaluation],
    config: &LlmConfig,
    api_key: Option<&str>,
    preset: &Preset,
) -> Outcome<usize> {
    match ChatCompletionClient::from_config(config, api_key) {
        Ok(client) => {
            let degraded = augment_with_llm(evaluations, &client, preset);
            if degraded == 0 {
                Outcome::Complete(evaluations.len())
            } else {
                Outcome::degraded(
                    evaluations.len() - degraded,
                    format!("llm suggestions unavailable for {degraded} repositories"),
                )
            }
        }
        Err(err) => Outcome::degraded(0, err.to_string()),
    }
}
