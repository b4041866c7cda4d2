use crate::types::repo::Analysis;
use crate::types::scoring::{clamp_score, Score};

// The 30-point base and the >20 bonus stack independently of the length
// band, so a 1..=20 char description earns 30 + 20.
pub fn description_quality_score(analysis: &Analysis) -> Score {
    let length = analysis.description_length;
    let mut score: Score = 0.0;
    if length > 0 {
        score += 30.0;
    }
    score += if (60..=160).contains(&length) {
        40.0
    } else {
        20.0
    };
    if length > 20 {
        score += 30.0;
    }
    clamp_score(score)
}
