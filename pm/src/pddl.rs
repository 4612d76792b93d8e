//! PDDL writer seam
//!
//! Problems carry their PDDL text already written by the host; engines only
//! ask for it to be materialised into their own working directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors raised while materialising PDDL files
#[derive(Debug, Error)]
pub enum PddlError {
    #[error("Failed to read PDDL source {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write PDDL file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Writes a problem's domain and problem descriptions to disk
pub trait PddlWriter {
    fn write_domain(&self, path: &Path) -> Result<(), PddlError>;

    fn write_problem(&self, path: &Path) -> Result<(), PddlError>;
}

/// Where a problem's PDDL text lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PddlSource {
    /// Existing files on disk
    Files { domain: PathBuf, problem: PathBuf },

    /// Text held in memory
    Inline { domain: String, problem: String },
}

impl PddlSource {
    /// Resolve relative file paths against `base`
    pub fn rebase(self, base: &Path) -> Self {
        match self {
            PddlSource::Files { domain, problem } => PddlSource::Files {
                domain: rebase_path(base, domain),
                problem: rebase_path(base, problem),
            },
            inline => inline,
        }
    }
}

fn rebase_path(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() { path } else { base.join(path) }
}

fn copy_file(from: &Path, to: &Path) -> Result<(), PddlError> {
    debug!(?from, ?to, "copy_file: called");
    let content = fs::read(from).map_err(|source| PddlError::Read {
        path: from.to_path_buf(),
        source,
    })?;
    fs::write(to, content).map_err(|source| PddlError::Write {
        path: to.to_path_buf(),
        source,
    })
}

fn write_text(text: &str, to: &Path) -> Result<(), PddlError> {
    debug!(?to, len = text.len(), "write_text: called");
    fs::write(to, text).map_err(|source| PddlError::Write {
        path: to.to_path_buf(),
        source,
    })
}

impl PddlWriter for PddlSource {
    fn write_domain(&self, path: &Path) -> Result<(), PddlError> {
        match self {
            PddlSource::Files { domain, .. } => copy_file(domain, path),
            PddlSource::Inline { domain, .. } => write_text(domain, path),
        }
    }

    fn write_problem(&self, path: &Path) -> Result<(), PddlError> {
        match self {
            PddlSource::Files { problem, .. } => copy_file(problem, path),
            PddlSource::Inline { problem, .. } => write_text(problem, path),
        }
    }
}
