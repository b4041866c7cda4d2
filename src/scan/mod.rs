pub mod readme;
pub mod recency;

use crate::types::repo::{Analysis, RepoSummary};
use chrono::{DateTime, Utc};
use readme::detect_readme;
use recency::days_since_push;

/// Derives the analysis record for one repository. Presence flags for
/// license/contributing/templates stay false here; the pipeline fills them
/// from the community profile when that fetch is enabled.
pub fn normalize(repo: &RepoSummary, readme: Option<&str>, now: DateTime<Utc>) -> Analysis {
    let signals = detect_readme(readme);

    Analysis {
        has_readme: signals.has_readme,
        readme_heading_count: signals.heading_count,
        readme_words: signals.words,
        readme_sections: signals.sections,
        intro_has_what_who_platform: signals.intro_has_what_who_platform,
        name_length: repo.name.chars().count(),
        description_length: repo
            .description
            .as_deref()
            .map(|description| description.chars().count())
            .unwrap_or(0),
        topic_count: repo.topics.len(),
        days_since_last_push: days_since_push(repo.pushed_at.as_deref(), now),
        ..Analysis::default()
    }
}
