pub mod activity;
pub mod description;
pub mod metadata;
pub mod name;
pub mod readme;
pub mod topics;

use crate::types::preset::Weights;
use crate::types::repo::{Analysis, RepoSummary};
use crate::types::scoring::{Dimension, DimensionScore, ScoreCard};

pub fn score(repo: &RepoSummary, analysis: &Analysis, weights: &Weights) -> ScoreCard {
    let dimensions = [
        DimensionScore::rated(
            Dimension::NameClarity,
            name::name_clarity_score(&repo.name, analysis),
            format!("Name length {} chars.", analysis.name_length),
        ),
        DimensionScore::rated(
            Dimension::DescriptionQuality,
            description::description_quality_score(analysis),
            format!("Description length {} chars.", analysis.description_length),
        ),
        DimensionScore::rated(
            Dimension::TopicCoverage,
            topics::topic_coverage_score(analysis),
            format!("{} topics set.", analysis.topic_count),
        ),
        DimensionScore::rated(
            Dimension::ReadmeStructure,
            readme::readme_structure_score(analysis),
            format!(
                "README: {} words, {} headings.",
                analysis.readme_words, analysis.readme_heading_count
            ),
        ),
        DimensionScore::rated(
            Dimension::ActivityRecency,
            activity::activity_recency_score(analysis),
            format!("Last push {} days ago.", analysis.days_since_last_push),
        ),
        DimensionScore::rated(
            Dimension::MetadataHygiene,
            metadata::metadata_hygiene_score(analysis),
            "Metadata completeness.",
        ),
    ];

    ScoreCard::finalize(dimensions, |dimension| weights.get(dimension))
}
