use crate::types::repo::Analysis;
use crate::types::scoring::{clamp_score, Score};

/// Linear decay: two points per day since the last push, 0 at 50+ days.
pub fn activity_recency_score(analysis: &Analysis) -> Score {
    let days = analysis.days_since_last_push as Score;
    clamp_score(100.0 - (days * 2.0).min(100.0))
}
