//! The ENHSP engine
//!
//! One configuration-driven type covers every variant; behaviour differences
//! come from the variant's record, not from separate implementations.

use std::sync::Arc;

use async_trait::async_trait;
use planmodel::{
    AnytimePlanner, Credits, Engine, OneshotPlanner, OperationMode, PlanGenerationResult, PlanGenerationStatus,
    Problem, ProblemKind,
};
use tracing::{debug, info, warn};

use crate::capabilities;
use crate::classify::classify;
use crate::command::{self, Launcher, PlanFiles, SearchParams};
use crate::error::EngineError;
use crate::parser::parse_plan_file;
use crate::runner::{AnytimeJob, AnytimeRun, run_oneshot, stderr_message};
use crate::variant::{CREDITS, Variant};
use crate::workspace::Workspace;

/// A configured ENHSP engine
#[derive(Debug, Clone)]
pub struct Enhsp {
    variant: Variant,
    params: SearchParams,
    launcher: Launcher,
    keep_workdir: bool,
}

impl Enhsp {
    pub fn new(variant: Variant, launcher: Launcher) -> Self {
        debug!(%variant, ?launcher, "Enhsp::new: called");
        Self {
            variant,
            params: SearchParams::default(),
            launcher,
            keep_workdir: false,
        }
    }

    /// Builder-style search parameters
    pub fn with_params(mut self, params: SearchParams) -> Self {
        self.params = params;
        self
    }

    /// Keep working directories after the run
    pub fn keep_workdir(mut self, keep: bool) -> Self {
        self.keep_workdir = keep;
        self
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    /// The argv this engine would run for `files`
    pub fn command(&self, files: &PlanFiles) -> Vec<String> {
        command::build(&self.launcher, self.variant, &self.params, files)
    }

    /// Run once and classify the outcome
    pub async fn solve(&self, problem: &Problem) -> Result<PlanGenerationResult, EngineError> {
        let name = self.variant.engine_name();
        if self.variant.is_anytime() {
            return Err(EngineError::UnsupportedOperation {
                engine: name.to_string(),
                operation: "oneshot planning",
            });
        }
        debug!(engine = name, problem = %problem.name, "Enhsp::solve: called");

        let workspace = Workspace::prepare(problem, self.keep_workdir)?;
        let files = workspace.files();
        let argv = self.command(&files);

        info!(engine = name, problem = %problem.name, "Running engine");
        let output = run_oneshot(&argv, workspace.path()).await?;

        // Only a clean exit is worth parsing; anything else is an internal error.
        let plan = if output.success() && files.plan.exists() {
            Some(parse_plan_file(&files.plan, problem, name)?)
        } else {
            None
        };

        let status = classify(
            output.exit_code,
            plan.is_some(),
            problem.has_quality_metrics(),
            self.variant.is_optimal(),
        );

        match status {
            PlanGenerationStatus::InternalError => {
                warn!(engine = name, exit_code = ?output.exit_code, stderr = %output.stderr.trim(), "Engine failed");
            }
            PlanGenerationStatus::UnsolvableProven => {
                info!(engine = name, "Engine produced no plan");
            }
            _ => {
                info!(engine = name, %status, steps = plan.as_ref().map(|p| p.len()), "Engine solved problem");
            }
        }

        let mut result = PlanGenerationResult::new(status, plan, name);
        if !status.is_solved()
            && let Some(message) = stderr_message(status, &output.stderr)
        {
            result = result.with_log(message);
        }
        Ok(result)
    }

    /// Start an anytime run
    pub fn start_anytime(&self, problem: &Problem) -> Result<AnytimeRun, EngineError> {
        let name = self.variant.engine_name();
        if !self.variant.is_anytime() {
            return Err(EngineError::UnsupportedOperation {
                engine: name.to_string(),
                operation: "anytime planning",
            });
        }
        debug!(engine = name, problem = %problem.name, "Enhsp::start_anytime: called");

        let workspace = Workspace::prepare(problem, self.keep_workdir)?;
        let argv = self.command(&workspace.files());
        let job = AnytimeJob {
            problem: Arc::new(problem.clone()),
            engine_name: name.to_string(),
            optimal: self.variant.is_optimal(),
        };
        AnytimeRun::spawn(&argv, workspace, job)
    }
}

impl Engine for Enhsp {
    fn name(&self) -> &str {
        self.variant.engine_name()
    }

    fn credits(&self) -> &Credits {
        &CREDITS
    }

    fn supports(&self, kind: &ProblemKind) -> bool {
        capabilities::supports(self.variant, kind)
    }

    fn supports_operation(&self, mode: OperationMode) -> bool {
        match mode {
            OperationMode::OneshotPlanner => !self.variant.is_anytime(),
            OperationMode::AnytimePlanner => self.variant.is_anytime(),
            OperationMode::PlanValidator | OperationMode::Grounder => false,
        }
    }

    fn satisfies_optimality(&self) -> bool {
        self.variant.is_optimal()
    }
}

#[async_trait]
impl OneshotPlanner for Enhsp {
    type Error = EngineError;

    async fn solve(&self, problem: &Problem) -> Result<PlanGenerationResult, Self::Error> {
        Enhsp::solve(self, problem).await
    }
}

#[async_trait]
impl AnytimePlanner for Enhsp {
    type Error = EngineError;
    type Solutions = AnytimeRun;

    async fn get_solutions(&self, problem: &Problem) -> Result<Self::Solutions, Self::Error> {
        self.start_anytime(problem)
    }
}
