//! Planning problem namespace
//!
//! Only what an engine adapter reads from a problem lives here: action
//! schemas, objects, declared quality metrics, the problem kind and the PDDL
//! text the host already produced.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::kind::ProblemKind;
use crate::pddl::PddlSource;

/// Name lookup failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NamespaceError {
    #[error("Action '{0}' is not defined in the problem")]
    UnknownAction(String),

    #[error("Object '{0}' is not defined in the problem")]
    UnknownObject(String),
}

/// Failures loading a problem manifest
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read problem manifest {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse problem manifest {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Duplicate {what} name '{name}' in problem manifest")]
    Duplicate { what: &'static str, name: String },
}

/// A typed action parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

/// A lifted action as declared by the problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSchema {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl ActionSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
        }
    }

    /// Builder-style parameter append
    pub fn param(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.parameters.push(Parameter {
            name: name.into(),
            type_name: type_name.into(),
        });
        self
    }

    pub fn arity(&self) -> usize {
        self.parameters.len()
    }
}

/// A problem object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Object {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

impl Object {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// Objective a problem declares for plan quality
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QualityMetric {
    MinimizeActionCosts,
    MinimizeSequentialPlanLength,
    MinimizeExpressionOnFinalState(String),
    MaximizeExpressionOnFinalState(String),
}

/// A planning problem as seen by an engine adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Problem {
    pub name: String,

    #[serde(default)]
    actions: Vec<ActionSchema>,

    #[serde(default)]
    objects: Vec<Object>,

    #[serde(default, with = "serde_yaml::with::singleton_map_recursive")]
    quality_metrics: Vec<QualityMetric>,

    #[serde(default)]
    kind: ProblemKind,

    #[serde(with = "serde_yaml::with::singleton_map")]
    pddl: PddlSource,
}

impl Problem {
    /// Create an empty problem with no PDDL text attached
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            actions: Vec::new(),
            objects: Vec::new(),
            quality_metrics: Vec::new(),
            kind: ProblemKind::new(),
            pddl: PddlSource::Inline {
                domain: String::new(),
                problem: String::new(),
            },
        }
    }

    /// Load a problem manifest (YAML)
    ///
    /// Relative PDDL paths are resolved against the manifest's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        debug!(?path, "Problem::load: called");
        let content = fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut problem: Problem = serde_yaml::from_str(&content).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        problem.pddl = problem.pddl.rebase(base);
        problem.check_unique_names()?;

        info!(
            problem = %problem.name,
            actions = problem.actions.len(),
            objects = problem.objects.len(),
            "Loaded problem manifest from: {}",
            path.display()
        );
        Ok(problem)
    }

    fn check_unique_names(&self) -> Result<(), ManifestError> {
        let mut seen = HashSet::new();
        for action in &self.actions {
            if !seen.insert(action.name.as_str()) {
                return Err(ManifestError::Duplicate {
                    what: "action",
                    name: action.name.clone(),
                });
            }
        }
        let mut seen = HashSet::new();
        for object in &self.objects {
            if !seen.insert(object.name.as_str()) {
                return Err(ManifestError::Duplicate {
                    what: "object",
                    name: object.name.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn add_action(&mut self, action: ActionSchema) {
        self.actions.push(action);
    }

    pub fn add_object(&mut self, object: Object) {
        self.objects.push(object);
    }

    pub fn add_objects(&mut self, objects: impl IntoIterator<Item = Object>) {
        self.objects.extend(objects);
    }

    pub fn add_quality_metric(&mut self, metric: QualityMetric) {
        self.quality_metrics.push(metric);
    }

    pub fn set_kind(&mut self, kind: ProblemKind) {
        self.kind = kind;
    }

    pub fn set_pddl(&mut self, pddl: PddlSource) {
        self.pddl = pddl;
    }

    /// Look up an action schema by name
    ///
    /// Exact matches win; otherwise the comparison ignores ASCII case, as
    /// planners commonly lower-case identifiers in their output.
    pub fn action(&self, name: &str) -> Result<&ActionSchema, NamespaceError> {
        self.actions
            .iter()
            .find(|a| a.name == name)
            .or_else(|| self.actions.iter().find(|a| a.name.eq_ignore_ascii_case(name)))
            .ok_or_else(|| NamespaceError::UnknownAction(name.to_string()))
    }

    /// Look up an object by name, with the same matching rules as [`Problem::action`]
    pub fn object(&self, name: &str) -> Result<&Object, NamespaceError> {
        self.objects
            .iter()
            .find(|o| o.name == name)
            .or_else(|| self.objects.iter().find(|o| o.name.eq_ignore_ascii_case(name)))
            .ok_or_else(|| NamespaceError::UnknownObject(name.to_string()))
    }

    pub fn actions(&self) -> &[ActionSchema] {
        &self.actions
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn quality_metrics(&self) -> &[QualityMetric] {
        &self.quality_metrics
    }

    pub fn has_quality_metrics(&self) -> bool {
        !self.quality_metrics.is_empty()
    }

    pub fn kind(&self) -> &ProblemKind {
        &self.kind
    }

    pub fn pddl(&self) -> &PddlSource {
        &self.pddl
    }
}
