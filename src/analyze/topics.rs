use crate::types::repo::Analysis;
use crate::types::scoring::{clamp_score, Score};

pub fn topic_coverage_score(analysis: &Analysis) -> Score {
    let count = analysis.topic_count as Score;
    let bonus = if analysis.topic_count > 0 { 20.0 } else { 0.0 };
    clamp_score((count * 15.0 + bonus).min(100.0))
}
