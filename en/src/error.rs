//! Engine error types

use std::path::PathBuf;

use planmodel::{NamespaceError, PddlError};
use thiserror::Error;

/// Plan text that could not be turned into a plan
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Error parsing plan generated by {engine}: line {line}: {text:?}")]
    Malformed { engine: String, line: usize, text: String },

    #[error("Error parsing plan generated by {engine}: line {line}: {source}")]
    Namespace {
        engine: String,
        line: usize,
        #[source]
        source: NamespaceError,
    },

    #[error("Error parsing plan generated by {engine}: line {line}: {action} expects {expected} parameters, got {actual}")]
    Arity {
        engine: String,
        line: usize,
        action: String,
        expected: usize,
        actual: usize,
    },
}

/// Errors that can occur while running the engine
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Empty command line")]
    EmptyCommand,

    #[error("Failed to prepare working directory: {0}")]
    Workdir(#[source] std::io::Error),

    #[error("Failed to read plan file {path}: {source}")]
    PlanFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error while talking to the engine: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Pddl(#[from] PddlError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("{engine} does not support {operation}")]
    UnsupportedOperation { engine: String, operation: &'static str },

    #[error("Background worker failed: {0}")]
    Worker(String),

    #[error("Could not determine Java version from: {0:?}")]
    JavaVersion(String),

    #[error("Java {found} found, ENHSP requires JDK {required} or newer")]
    JavaTooOld { found: u32, required: u32 },
}

impl EngineError {
    /// True when the engine process could not be started at all
    pub fn is_launch_failure(&self) -> bool {
        matches!(self, EngineError::Spawn { .. } | EngineError::EmptyCommand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_names_engine() {
        let err = ParseError::Malformed {
            engine: "enhsp".to_string(),
            line: 3,
            text: "garbage line".to_string(),
        };

        let msg = err.to_string();
        assert!(msg.contains("enhsp"));
        assert!(msg.contains("line 3"));
        assert!(msg.contains("garbage line"));
    }

    #[test]
    fn test_is_launch_failure() {
        let err = EngineError::Spawn {
            program: "java".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert!(err.is_launch_failure());
        assert!(err.to_string().contains("java"));

        assert!(!EngineError::Worker("panicked".to_string()).is_launch_failure());
    }
}
