use crate::types::repo::{Analysis, RepoSummary};
use crate::types::scoring::{Dimension, Score, ScoreCard};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dimension id carried by suggestions that come from the LLM augmenter.
pub const LLM_DIMENSION: &str = "llm";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Note,
    Suggestion,
    Important,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Note => "note",
            Self::Suggestion => "suggestion",
            Self::Important => "important",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ProposedChange {
    Description { hint: String },
    Topics { hint: String },
    Readme { sections: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub dimension: String,
    pub severity: Severity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proposed_change: Option<ProposedChange>,
}

impl Suggestion {
    pub fn rubric(dimension: Dimension, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            dimension: dimension.id().to_string(),
            severity,
            message: message.into(),
            proposed_change: None,
        }
    }

    pub fn with_change(mut self, change: ProposedChange) -> Self {
        self.proposed_change = Some(change);
        self
    }

    pub fn llm(line: &str) -> Self {
        Self {
            dimension: LLM_DIMENSION.to_string(),
            severity: Severity::Note,
            message: format!("[AI suggestion] {line}"),
            proposed_change: None,
        }
    }

    #[cfg(test)]
    pub fn is_llm(&self) -> bool {
        self.dimension == LLM_DIMENSION
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoEvaluation {
    pub repo: RepoSummary,
    pub analysis: Analysis,
    pub scores: ScoreCard,
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
}

impl RepoEvaluation {
    pub fn overall(&self) -> Score {
        self.scores.overall.score
    }

    /// Full name when known, otherwise the short name.
    pub fn display_name(&self) -> &str {
        if self.repo.full_name.is_empty() {
            &self.repo.name
        } else {
            &self.repo.full_name
        }
    }
}
