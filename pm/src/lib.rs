//! PlanModel - contracts between a planning host and its engines
//!
//! A host owns the planning problem and its PDDL rendering; engines read the
//! problem's namespace, run, and answer with results from a shared status
//! vocabulary.
//!
//! # Modules
//!
//! - [`kind`] - problem feature sets used for capability checks
//! - [`problem`] - action, object and metric namespace of a problem
//! - [`pddl`] - the writer seam that materialises PDDL for an engine
//! - [`plan`] - action instances and sequential plans
//! - [`result`] - statuses and results engines produce
//! - [`engine`] - the traits engines implement

pub mod engine;
pub mod kind;
pub mod pddl;
pub mod plan;
pub mod problem;
pub mod result;

pub use engine::{AnytimePlanner, Credits, Engine, OneshotPlanner, OperationMode};
pub use kind::{Feature, FeatureCategory, KindError, ProblemKind};
pub use pddl::{PddlError, PddlSource, PddlWriter};
pub use plan::{ActionInstance, SequentialPlan};
pub use problem::{ActionSchema, ManifestError, NamespaceError, Object, Parameter, Problem, QualityMetric};
pub use result::{LogLevel, LogMessage, PlanGenerationResult, PlanGenerationStatus};
