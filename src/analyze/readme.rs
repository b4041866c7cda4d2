use crate::types::repo::Analysis;
use crate::types::scoring::{clamp_score, Score};

pub fn readme_structure_score(analysis: &Analysis) -> Score {
    let mut score: Score = 0.0;
    if analysis.has_readme {
        score += 50.0;
    }
    if analysis.readme_heading_count >= 2 {
        score += 20.0;
    }
    if analysis.readme_words >= 200 {
        score += 15.0;
    }
    if analysis.intro_has_what_who_platform {
        score += 15.0;
    }
    clamp_score(score)
}
