use crate::report::truncated;
use crate::types::report::RepoEvaluation;
use chrono::{DateTime, Utc};

pub fn to_markdown(
    evaluations: &[RepoEvaluation],
    username: &str,
    preset_id: &str,
    generated: DateTime<Utc>,
) -> String {
    let mut output = String::new();
    output.push_str(&format!("# GitHub Account Presentation Report: {username}\n\n"));
    output.push_str(&format!("**Preset:** {preset_id}  \n"));
    output.push_str(&format!(
        "**Generated:** {}  \n",
        generated.format("%Y-%m-%d %H:%M UTC")
    ));
    output.push_str(&format!("**Repositories:** {}\n\n---\n\n", evaluations.len()));

    for evaluation in evaluations {
        let full_name = evaluation.display_name();
        if evaluation.repo.html_url.is_empty() {
            output.push_str(&format!("## {full_name}\n\n"));
        } else {
            output.push_str(&format!(
                "## [{full_name}]({})\n\n",
                evaluation.repo.html_url
            ));
        }

        output.push_str("| Dimension | Score |\n|-----------|-------|\n");
        output.push_str(&format!(
            "| **Overall** | {} |\n",
            truncated(evaluation.overall())
        ));
        for (dimension, entry) in evaluation.scores.dimensions() {
            output.push_str(&format!(
                "| {} | {} |\n",
                dimension.id(),
                truncated(entry.score)
            ));
        }
        output.push('\n');

        if !evaluation.suggestions.is_empty() {
            output.push_str("### Suggestions\n\n");
            for suggestion in &evaluation.suggestions {
                output.push_str(&format!(
                    "- **[{}]** {}\n",
                    suggestion.severity, suggestion.message
                ));
            }
            output.push('\n');
        }
        output.push_str("---\n\n");
    }

    output
}
