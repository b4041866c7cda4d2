use crate::report::truncated;
use crate::types::report::RepoEvaluation;
use crate::types::scoring::Dimension;

const NAME_WIDTH: usize = 44;
const RULE_WIDTH: usize = 105;
const SUGGESTION_COLUMN_WIDTH: usize = 9;

pub fn to_table(evaluations: &[RepoEvaluation], show_suggestions: bool) -> String {
    if evaluations.is_empty() {
        return "No repositories evaluated.\n".to_string();
    }

    let rule = "-".repeat(
        RULE_WIDTH
            + if show_suggestions {
                SUGGESTION_COLUMN_WIDTH
            } else {
                0
            },
    );
    let mut output = format!(
        "{:<45} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8}",
        "Repo", "Overall", "Name", "Desc", "Topics", "README", "Activity", "Meta"
    );
    if show_suggestions {
        output.push_str("  Sugg ");
    }
    output.push('\n');
    output.push_str(&rule);
    output.push('\n');

    for evaluation in evaluations {
        let name: String = evaluation.display_name().chars().take(NAME_WIDTH).collect();
        output.push_str(&format!(
            "{:<45} {:>8}",
            name,
            truncated(evaluation.overall())
        ));
        for dimension in Dimension::ALL {
            output.push_str(&format!(
                " {:>8}",
                truncated(evaluation.scores.get(dimension).score)
            ));
        }
        if show_suggestions {
            output.push_str(&format!(" {:>6}", evaluation.suggestions.len()));
        }
        output.push('\n');
    }
    output.push_str(&rule);
    output.push('\n');

    if show_suggestions {
        for evaluation in evaluations.iter().filter(|e| !e.suggestions.is_empty()) {
            output.push_str(&format!("\n--- {} ---\n", evaluation.display_name()));
            for suggestion in &evaluation.suggestions {
                output.push_str(&format!(
                    "  [{}] {}\n",
                    suggestion.severity, suggestion.message
                ));
            }
        }
    }

    output
}
