use crate::types::repo::Analysis;
use crate::types::scoring::{clamp_score, Score};

pub fn name_clarity_score(name: &str, analysis: &Analysis) -> Score {
    let mut score: Score = 0.0;
    if analysis.name_length >= 3 {
        score += 20.0;
    }
    score += if analysis.name_length <= 40 { 30.0 } else { 10.0 };
    score += if name.contains('-') || name.contains('_') {
        50.0
    } else {
        20.0
    };
    clamp_score(score)
}
