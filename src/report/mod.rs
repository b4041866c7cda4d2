pub mod json;
pub mod md;
pub mod table;

use crate::error::Result;
use crate::types::report::RepoEvaluation;
use chrono::Utc;
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
}

/// What a report is about, beyond the evaluations themselves.
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    pub username: &'a str,
    pub preset_id: &'a str,
    pub show_suggestions: bool,
}

pub fn render(
    evaluations: &[RepoEvaluation],
    format: OutputFormat,
    context: &ReportContext<'_>,
) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(json::to_json(evaluations)?),
        OutputFormat::Table => Ok(table::to_table(evaluations, context.show_suggestions)),
        OutputFormat::Markdown => Ok(md::to_markdown(
            evaluations,
            context.username,
            context.preset_id,
            Utc::now(),
        )),
    }
}

/// Whole-number rendering used by the human-readable formats.
pub(crate) fn truncated(score: f64) -> i64 {
    score.trunc() as i64
}
