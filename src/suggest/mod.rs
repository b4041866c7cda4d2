//! Rule-based advisory suggestions. One entry per dimension scoring below
//! the band threshold; nothing here touches the repository itself.

pub mod llm;

use crate::types::preset::Preset;
use crate::types::report::{ProposedChange, Severity, Suggestion};
use crate::types::repo::{Analysis, RepoSummary};
use crate::types::scoring::{Dimension, ScoreCard, BAND_THRESHOLD};

const DESCRIPTION_HINT: &str =
    "e.g. A CLI that scans your GitHub account and scores repo presentation.";
const TOPICS_HINT: &str = "e.g. cli, python, developer-tools";

pub fn generate_suggestions(
    repo: &RepoSummary,
    analysis: &Analysis,
    scores: &ScoreCard,
    preset: &Preset,
) -> Vec<Suggestion> {
    scores
        .dimensions()
        .filter(|(_, entry)| entry.score < BAND_THRESHOLD)
        .map(|(dimension, _)| match dimension {
            Dimension::NameClarity => name_suggestion(analysis, preset),
            Dimension::DescriptionQuality => description_suggestion(repo, preset),
            Dimension::TopicCoverage => topic_suggestion(repo, preset),
            Dimension::ReadmeStructure => readme_suggestion(analysis, preset),
            Dimension::ActivityRecency => activity_suggestion(analysis),
            Dimension::MetadataHygiene => metadata_suggestion(),
        })
        .collect()
}

fn name_suggestion(analysis: &Analysis, preset: &Preset) -> Suggestion {
    let max_length = preset.name_max_length();
    if analysis.name_length == 0 {
        Suggestion::rubric(
            Dimension::NameClarity,
            Severity::Suggestion,
            "Repository has no name set.",
        )
    } else if analysis.name_length > max_length {
        Suggestion::rubric(
            Dimension::NameClarity,
            Severity::Note,
            format!(
                "Repository name is long ({} chars). Consider a shorter, clearer name (e.g. under {max_length} chars).",
                analysis.name_length
            ),
        )
    } else {
        Suggestion::rubric(
            Dimension::NameClarity,
            Severity::Suggestion,
            "Use a name that clearly reflects what the project does or its primary tech (e.g. hyphens: my-tool-name).",
        )
    }
}

fn description_suggestion(repo: &RepoSummary, preset: &Preset) -> Suggestion {
    let length = repo
        .description
        .as_deref()
        .map(|description| description.chars().count())
        .unwrap_or(0);
    let min_length = preset.description_min_length();
    let max_length = preset.description_max_length();

    if length == 0 {
        Suggestion::rubric(
            Dimension::DescriptionQuality,
            Severity::Important,
            format!(
                "Add a short description (what it does, who it's for, platform). Aim for {min_length}-{max_length} characters."
            ),
        )
        .with_change(ProposedChange::Description {
            hint: DESCRIPTION_HINT.to_string(),
        })
    } else if length < min_length {
        Suggestion::rubric(
            Dimension::DescriptionQuality,
            Severity::Suggestion,
            format!(
                "Description is short ({length} chars). Include value proposition, audience, and platform (aim for {min_length}-{max_length} chars)."
            ),
        )
    } else if length > max_length {
        Suggestion::rubric(
            Dimension::DescriptionQuality,
            Severity::Note,
            format!(
                "Description is long ({length} chars). Keep under {max_length} chars for GitHub display."
            ),
        )
    } else {
        Suggestion::rubric(
            Dimension::DescriptionQuality,
            Severity::Suggestion,
            "Ensure the description states what the project does, who it's for, and which platform it targets.",
        )
    }
}

fn topic_suggestion(repo: &RepoSummary, preset: &Preset) -> Suggestion {
    let count = repo.topics.len();
    let min_count = preset.topic_min_count();

    if count == 0 {
        Suggestion::rubric(
            Dimension::TopicCoverage,
            Severity::Important,
            format!(
                "Add GitHub topics (technology, use case, platform). This preset recommends at least {min_count} topics."
            ),
        )
        .with_change(ProposedChange::Topics {
            hint: TOPICS_HINT.to_string(),
        })
    } else if count < min_count {
        Suggestion::rubric(
            Dimension::TopicCoverage,
            Severity::Suggestion,
            format!(
                "You have {count} topic(s). Add more (e.g. tech stack, use case); this preset recommends at least {min_count}."
            ),
        )
    } else {
        Suggestion::rubric(
            Dimension::TopicCoverage,
            Severity::Suggestion,
            "Review topics for clarity and coverage (tech, platform, use case).",
        )
    }
}

fn readme_suggestion(analysis: &Analysis, preset: &Preset) -> Suggestion {
    let required = preset.required_sections();

    if !analysis.has_readme {
        return Suggestion::rubric(
            Dimension::ReadmeStructure,
            Severity::Important,
            "Add a README. Include an H1 title, a first paragraph (what + who + platform), and sections like Installation, Usage, License.",
        )
        .with_change(ProposedChange::Readme {
            sections: required.iter().take(5).cloned().collect(),
        });
    }

    if analysis.readme_words < 200 {
        let examples = required
            .iter()
            .take(4)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        let message = if examples.is_empty() {
            format!(
                "README is short ({} words). Expand with clear sections.",
                analysis.readme_words
            )
        } else {
            format!(
                "README is short ({} words). Expand with clear sections (e.g. {examples}).",
                analysis.readme_words
            )
        };
        Suggestion::rubric(Dimension::ReadmeStructure, Severity::Suggestion, message)
    } else if analysis.readme_heading_count < 2 {
        Suggestion::rubric(
            Dimension::ReadmeStructure,
            Severity::Suggestion,
            "Add clear H2 sections (e.g. What This Is, Installation, Usage) so readers can skim.",
        )
    } else {
        Suggestion::rubric(
            Dimension::ReadmeStructure,
            Severity::Suggestion,
            "Ensure the first paragraph answers what the project is, who it's for, and which platform it targets.",
        )
    }
}

fn activity_suggestion(analysis: &Analysis) -> Suggestion {
    Suggestion::rubric(
        Dimension::ActivityRecency,
        Severity::Note,
        format!(
            "Last push was {} days ago. Consider a small update or an 'Archived' note in the README if the project is stable but unmaintained.",
            analysis.days_since_last_push
        ),
    )
}

fn metadata_suggestion() -> Suggestion {
    Suggestion::rubric(
        Dimension::MetadataHygiene,
        Severity::Suggestion,
        "Improve metadata: add or refine description, topics, and README so the repo looks complete and maintainable.",
    )
}
