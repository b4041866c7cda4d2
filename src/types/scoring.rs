use serde::{Deserialize, Serialize};
use std::fmt;

pub type Score = f64;

/// Scores below this get the weaker band label and trigger a suggestion.
pub const BAND_THRESHOLD: Score = 70.0;

pub fn clamp_score(score: Score) -> Score {
    score.clamp(0.0, 100.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    NameClarity,
    DescriptionQuality,
    TopicCoverage,
    ReadmeStructure,
    ActivityRecency,
    MetadataHygiene,
}

impl Dimension {
    pub const ALL: [Dimension; 6] = [
        Dimension::NameClarity,
        Dimension::DescriptionQuality,
        Dimension::TopicCoverage,
        Dimension::ReadmeStructure,
        Dimension::ActivityRecency,
        Dimension::MetadataHygiene,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Self::NameClarity => "nameClarity",
            Self::DescriptionQuality => "descriptionQuality",
            Self::TopicCoverage => "topicCoverage",
            Self::ReadmeStructure => "readmeStructure",
            Self::ActivityRecency => "activityRecency",
            Self::MetadataHygiene => "metadataHygiene",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|dimension| dimension.id() == id)
    }

    /// (below threshold, at or above threshold)
    fn band_labels(self) -> (&'static str, &'static str) {
        match self {
            Self::NameClarity => ("Partial", "Clear"),
            Self::DescriptionQuality => ("Basic", "Strong"),
            Self::TopicCoverage => ("Moderate", "Comprehensive"),
            Self::ReadmeStructure => ("Basic", "Well-Structured"),
            Self::ActivityRecency => ("Aging", "Recently Active"),
            Self::MetadataHygiene => ("Okay", "Clean"),
        }
    }

    pub fn band(self, score: Score) -> &'static str {
        let (weak, strong) = self.band_labels();
        if score < BAND_THRESHOLD {
            weak
        } else {
            strong
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub score: Score,
    pub band: String,
    pub explanation: String,
}

impl DimensionScore {
    pub fn rated(dimension: Dimension, score: Score, explanation: impl Into<String>) -> Self {
        let score = clamp_score(score);
        Self {
            score,
            band: dimension.band(score).to_string(),
            explanation: explanation.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallScore {
    pub score: Score,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreCard {
    pub name_clarity: DimensionScore,
    pub description_quality: DimensionScore,
    pub topic_coverage: DimensionScore,
    pub readme_structure: DimensionScore,
    pub activity_recency: DimensionScore,
    pub metadata_hygiene: DimensionScore,
    pub overall: OverallScore,
}

impl ScoreCard {
    /// Builds the card from the six dimension scores (in `Dimension::ALL`
    /// order) and computes the weighted overall.
    pub fn finalize(
        dimensions: [DimensionScore; 6],
        weight_of: impl Fn(Dimension) -> f64,
    ) -> Self {
        let pairs = Dimension::ALL
            .iter()
            .zip(dimensions.iter())
            .map(|(dimension, score)| (score.score, weight_of(*dimension)));
        let overall = weighted_average(pairs);
        let [
            name_clarity,
            description_quality,
            topic_coverage,
            readme_structure,
            activity_recency,
            metadata_hygiene,
        ] = dimensions;
        Self {
            name_clarity,
            description_quality,
            topic_coverage,
            readme_structure,
            activity_recency,
            metadata_hygiene,
            overall: OverallScore {
                score: overall,
                explanation: "Weighted average of dimensions.".to_string(),
            },
        }
    }

    pub fn get(&self, dimension: Dimension) -> &DimensionScore {
        match dimension {
            Dimension::NameClarity => &self.name_clarity,
            Dimension::DescriptionQuality => &self.description_quality,
            Dimension::TopicCoverage => &self.topic_coverage,
            Dimension::ReadmeStructure => &self.readme_structure,
            Dimension::ActivityRecency => &self.activity_recency,
            Dimension::MetadataHygiene => &self.metadata_hygiene,
        }
    }

    pub fn dimensions(&self) -> impl Iterator<Item = (Dimension, &DimensionScore)> {
        Dimension::ALL
            .into_iter()
            .map(move |dimension| (dimension, self.get(dimension)))
    }
}

/// `Σ(score × weight) / Σ(weight)`, 0 when the weights sum to 0.
pub fn weighted_average(pairs: impl IntoIterator<Item = (Score, f64)>) -> Score {
    let (total, denom) = pairs
        .into_iter()
        .fold((0.0, 0.0), |(total, denom), (score, weight)| {
            (total + score * weight, denom + weight)
        });
    if denom == 0.0 {
        return 0.0;
    }
    clamp_score(total / denom)
}
