//! Result vocabulary shared by all engines

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::plan::SequentialPlan;

/// Outcome of a plan generation call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanGenerationStatus {
    SolvedSatisficing,
    SolvedOptimally,
    UnsolvableProven,
    UnsolvableIncompletely,
    Timeout,
    Memout,
    InternalError,
    UnsupportedProblem,
    /// A non-final solution from an anytime engine
    Intermediate,
}

impl PlanGenerationStatus {
    /// Every status except [`PlanGenerationStatus::Intermediate`] ends a run
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PlanGenerationStatus::Intermediate)
    }

    pub fn is_solved(&self) -> bool {
        matches!(
            self,
            PlanGenerationStatus::SolvedSatisficing | PlanGenerationStatus::SolvedOptimally
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanGenerationStatus::SolvedSatisficing => "SOLVED_SATISFICING",
            PlanGenerationStatus::SolvedOptimally => "SOLVED_OPTIMALLY",
            PlanGenerationStatus::UnsolvableProven => "UNSOLVABLE_PROVEN",
            PlanGenerationStatus::UnsolvableIncompletely => "UNSOLVABLE_INCOMPLETELY",
            PlanGenerationStatus::Timeout => "TIMEOUT",
            PlanGenerationStatus::Memout => "MEMOUT",
            PlanGenerationStatus::InternalError => "INTERNAL_ERROR",
            PlanGenerationStatus::UnsupportedProblem => "UNSUPPORTED_PROBLEM",
            PlanGenerationStatus::Intermediate => "INTERMEDIATE",
        }
    }
}

impl fmt::Display for PlanGenerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of an engine log message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

/// A message an engine attached to its result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogMessage {
    pub level: LogLevel,
    pub message: String,
}

impl LogMessage {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// What an engine returns from a solve call, or yields from an anytime run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanGenerationResult {
    pub status: PlanGenerationStatus,
    pub plan: Option<SequentialPlan>,
    pub engine_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub log_messages: Vec<LogMessage>,
}

impl PlanGenerationResult {
    pub fn new(status: PlanGenerationStatus, plan: Option<SequentialPlan>, engine_name: impl Into<String>) -> Self {
        Self {
            status,
            plan,
            engine_name: engine_name.into(),
            log_messages: Vec::new(),
        }
    }

    /// Builder-style log message append
    pub fn with_log(mut self, message: LogMessage) -> Self {
        self.log_messages.push(message);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_intermediate_is_not_terminal() {
        assert!(!PlanGenerationStatus::Intermediate.is_terminal());
        assert!(PlanGenerationStatus::InternalError.is_terminal());
        assert!(PlanGenerationStatus::UnsolvableProven.is_terminal());
        assert!(PlanGenerationStatus::SolvedOptimally.is_terminal());
    }

    #[test]
    fn test_is_solved() {
        assert!(PlanGenerationStatus::SolvedSatisficing.is_solved());
        assert!(PlanGenerationStatus::SolvedOptimally.is_solved());
        assert!(!PlanGenerationStatus::Intermediate.is_solved());
        assert!(!PlanGenerationStatus::UnsolvableProven.is_solved());
    }

    #[test]
    fn test_with_log() {
        let result = PlanGenerationResult::new(PlanGenerationStatus::InternalError, None, "enhsp")
            .with_log(LogMessage::new(LogLevel::Error, "boom"));
        assert_eq!(result.log_messages.len(), 1);
        assert_eq!(result.log_messages[0].message, "boom");
        assert_eq!(result.status.to_string(), "INTERNAL_ERROR");
    }
}
