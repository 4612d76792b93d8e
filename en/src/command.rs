//! Command line construction
//!
//! The canonical invocation is
//! `<launcher> -o <domain> -f <problem> -sp <plan> [search flags] [variant flags]`.
//! Flag values are not validated here; a bad flag surfaces as an engine failure.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::variant::{DEFAULT_SAT_CONFIGURATION, Variant};

/// Search configuration requested by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchParams {
    /// Explicit search algorithm and/or heuristic (`-s`, `-h`)
    Discrete {
        #[serde(default)]
        search_algorithm: Option<String>,
        #[serde(default)]
        heuristic: Option<String>,
    },

    /// Free-form flags, split on whitespace
    Raw(String),
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams::Discrete {
            search_algorithm: None,
            heuristic: None,
        }
    }
}

impl SearchParams {
    pub fn discrete(search_algorithm: Option<String>, heuristic: Option<String>) -> Self {
        SearchParams::Discrete {
            search_algorithm,
            heuristic,
        }
    }

    /// True when nothing beyond the default configuration was asked for
    pub fn is_default(&self) -> bool {
        match self {
            SearchParams::Discrete {
                search_algorithm,
                heuristic,
            } => search_algorithm.is_none() && heuristic.is_none(),
            SearchParams::Raw(raw) => raw.trim().is_empty(),
        }
    }

    /// Flags for these parameters, falling back to the named default configuration
    pub fn flags(&self) -> Vec<String> {
        if self.is_default() {
            return vec!["-planner".to_string(), DEFAULT_SAT_CONFIGURATION.to_string()];
        }
        match self {
            SearchParams::Discrete {
                search_algorithm,
                heuristic,
            } => {
                let mut flags = Vec::new();
                if let Some(s) = search_algorithm {
                    flags.push("-s".to_string());
                    flags.push(s.clone());
                }
                if let Some(h) = heuristic {
                    flags.push("-h".to_string());
                    flags.push(h.clone());
                }
                flags
            }
            SearchParams::Raw(raw) => raw.split_whitespace().map(str::to_string).collect(),
        }
    }
}

/// How the engine jar gets executed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launcher {
    pub program: String,
    pub args: Vec<String>,
}

impl Launcher {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// `java [jvm args] -jar <jar>`
    pub fn java(java: impl Into<String>, jvm_args: &[String], jar: &Path) -> Self {
        let mut args: Vec<String> = jvm_args.to_vec();
        args.push("-jar".to_string());
        args.push(jar.to_string_lossy().to_string());
        Self::new(java, args)
    }
}

/// File paths one invocation reads and writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanFiles {
    pub domain: PathBuf,
    pub problem: PathBuf,
    pub plan: PathBuf,
}

impl PlanFiles {
    /// Standard file names inside a working directory
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            domain: dir.join("domain.pddl"),
            problem: dir.join("problem.pddl"),
            plan: dir.join("plan.txt"),
        }
    }
}

/// Build the full argv for one run of `variant`
pub fn build(launcher: &Launcher, variant: Variant, params: &SearchParams, files: &PlanFiles) -> Vec<String> {
    debug!(%variant, ?params, ?files, "build: called");
    let spec = variant.spec();

    let mut argv = Vec::with_capacity(launcher.args.len() + 12);
    argv.push(launcher.program.clone());
    argv.extend(launcher.args.iter().cloned());
    argv.push("-o".to_string());
    argv.push(files.domain.to_string_lossy().to_string());
    argv.push("-f".to_string());
    argv.push(files.problem.to_string_lossy().to_string());
    argv.push("-sp".to_string());
    argv.push(files.plan.to_string_lossy().to_string());

    if spec.forced_flags.is_empty() {
        argv.extend(params.flags());
    } else {
        if !params.is_default() {
            warn!(%variant, ?params, "Search parameters ignored: variant forces its own configuration");
        }
        argv.extend(spec.forced_flags.iter().map(|f| f.to_string()));
    }

    argv.extend(spec.trailing_flags.iter().map(|f| f.to_string()));
    debug!(?argv, "build: done");
    argv
}
