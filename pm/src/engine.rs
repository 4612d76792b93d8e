//! Engine traits - how a host dispatches to planners uniformly

use async_trait::async_trait;
use futures::Stream;
use serde::Serialize;

use crate::kind::ProblemKind;
use crate::problem::Problem;
use crate::result::PlanGenerationResult;

/// Authorship and licensing information an engine advertises
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credits {
    pub name: &'static str,
    pub author: &'static str,
    pub contact: &'static str,
    pub website: &'static str,
    pub license: &'static str,
    pub short_description: &'static str,
    pub long_description: &'static str,
}

/// Operations a host may ask an engine to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperationMode {
    OneshotPlanner,
    AnytimePlanner,
    PlanValidator,
    Grounder,
}

/// Static description every engine provides
pub trait Engine: Send + Sync {
    /// Registry name, e.g. `enhsp-opt`
    fn name(&self) -> &str;

    fn credits(&self) -> &Credits;

    /// True when the engine accepts every feature of `kind`
    fn supports(&self, kind: &ProblemKind) -> bool;

    fn supports_operation(&self, mode: OperationMode) -> bool;

    /// True when solved results with a quality metric are optimal
    fn satisfies_optimality(&self) -> bool {
        false
    }
}

/// Engines that produce a single plan and terminate
#[async_trait]
pub trait OneshotPlanner: Engine {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn solve(&self, problem: &Problem) -> Result<PlanGenerationResult, Self::Error>;
}

/// Engines that stream improving plans
///
/// The stream yields zero or more intermediate results followed by exactly
/// one terminal result, after which it ends.
#[async_trait]
pub trait AnytimePlanner: Engine {
    type Error: std::error::Error + Send + Sync + 'static;
    type Solutions: Stream<Item = Result<PlanGenerationResult, Self::Error>> + Send + Unpin;

    async fn get_solutions(&self, problem: &Problem) -> Result<Self::Solutions, Self::Error>;
}
