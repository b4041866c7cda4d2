use crate::types::report::RepoEvaluation;

/// Appends an in-account percentile to each overall explanation. Ranking is
/// by overall score, descending; ties keep scan order.
pub fn annotate_internal(evaluations: &mut [RepoEvaluation]) {
    let total = evaluations.len();
    if total <= 1 {
        return;
    }

    let mut order: Vec<usize> = (0..total).collect();
    order.sort_by(|a, b| {
        evaluations[*b]
            .overall()
            .total_cmp(&evaluations[*a].overall())
    });

    for (rank, index) in order.into_iter().enumerate() {
        let percentile = (total - rank) as f64 / total as f64 * 100.0;
        evaluations[index]
            .scores
            .overall
            .explanation
            .push_str(&format!(" (top {percentile:.0}% in this account)"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::score;
    use crate::scan::normalize;
    use crate::types::preset::Weights;
    use crate::types::repo::RepoSummary;
    use chrono::Utc;

    fn evaluation(name: &str, overall: f64) -> RepoEvaluation {
        let repo = RepoSummary {
            id: 1,
            name: name.to_string(),
            full_name: format!("octo/{name}"),
            html_url: String::new(),
            private: false,
            description: None,
            topics: Vec::new(),
            archived: false,
            pushed_at: None,
            default_branch: "main".to_string(),
        };
        let analysis = normalize(&repo, None, Utc::now());
        let mut scores = score(&repo, &analysis, &Weights::default());
        scores.overall.score = overall;
        RepoEvaluation {
            repo,
            analysis,
            scores,
            suggestions: Vec::new(),
        }
    }

    fn explanation(evaluation: &RepoEvaluation) -> &str {
        &evaluation.scores.overall.explanation
    }

    #[test]
    fn single_repository_is_untouched() {
        let mut batch = vec![evaluation("solo", 42.0)];
        annotate_internal(&mut batch);
        assert_eq!(explanation(&batch[0]), "Weighted average of dimensions.");
        let mut empty: Vec<RepoEvaluation> = Vec::new();
        annotate_internal(&mut empty);
        assert!(empty.is_empty());
    }

    #[test]
    fn ranks_by_overall_descending() {
        let mut batch = vec![
            evaluation("low", 10.0),
            evaluation("high", 90.0),
            evaluation("mid", 50.0),
            evaluation("lower", 5.0),
        ];
        annotate_internal(&mut batch);
        assert!(explanation(&batch[1]).ends_with(" (top 100% in this account)"));
        assert!(explanation(&batch[2]).ends_with(" (top 75% in this account)"));
        assert!(explanation(&batch[0]).ends_with(" (top 50% in this account)"));
        assert!(explanation(&batch[3]).ends_with(" (top 25% in this account)"));
        assert!(explanation(&batch[0]).starts_with("Weighted average of dimensions."));
    }

    #[test]
    fn ties_keep_scan_order() {
        let mut batch = vec![evaluation("first", 60.0), evaluation("second", 60.0)];
        annotate_internal(&mut batch);
        assert!(explanation(&batch[0]).ends_with("(top 100% in this account)"));
        assert!(explanation(&batch[1]).ends_with("(top 50% in this account)"));
    }

    #[test]
    fn order_of_batch_is_preserved() {
        let mut batch = vec![evaluation("b", 1.0), evaluation("a", 99.0)];
        annotate_internal(&mut batch);
        assert_eq!(batch[0].repo.name, "b");
        assert_eq!(batch[1].repo.name, "a");
    }
}
