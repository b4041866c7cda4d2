use crate::types::repo::Analysis;
use crate::types::scoring::{clamp_score, Score};

pub fn metadata_hygiene_score(analysis: &Analysis) -> Score {
    let mut score: Score = 0.0;
    if analysis.has_readme {
        score += 40.0;
    }
    if analysis.description_length > 0 {
        score += 30.0;
    }
    if analysis.topic_count >= 3 {
        score += 30.0;
    }
    clamp_score(score)
}
