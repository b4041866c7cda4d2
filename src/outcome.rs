//! Fail-open boundary for side channels (history writes, LLM calls) whose
//! failure must never change the outcome of a scan.

use std::fmt::Display;
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Complete(T),
    Degraded { value: T, reason: String },
}

impl<T> Outcome<T> {
    /// Turns a fallible side-channel result into an `Outcome`, substituting
    /// `fallback` and logging the reason when it failed.
    pub fn fail_open<E: Display>(context: &str, result: Result<T, E>, fallback: T) -> Self {
        match result {
            Ok(value) => Self::Complete(value),
            Err(err) => {
                let reason = format!("{context}: {err}");
                warn!(%reason, "degraded");
                Self::Degraded {
                    value: fallback,
                    reason,
                }
            }
        }
    }

    pub fn degraded(value: T, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        warn!(%reason, "degraded");
        Self::Degraded { value, reason }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    #[cfg(test)]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Complete(_) => None,
            Self::Degraded { reason, .. } => Some(reason),
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Self::Complete(value) | Self::Degraded { value, .. } => value,
        }
    }
}
