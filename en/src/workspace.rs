//! Per-run working directory

use std::path::{Path, PathBuf};

use planmodel::{PddlWriter, Problem};
use tempfile::TempDir;
use tracing::{debug, info};

use crate::command::PlanFiles;
use crate::error::EngineError;

/// Scratch directory holding `domain.pddl`, `problem.pddl` and `plan.txt`
///
/// Removed on drop unless created with `keep = true`.
#[derive(Debug)]
pub struct Workspace {
    dir: Option<TempDir>,
    path: PathBuf,
}

impl Workspace {
    pub fn create(keep: bool) -> Result<Self, EngineError> {
        let dir = tempfile::Builder::new()
            .prefix("enhsp-")
            .tempdir()
            .map_err(EngineError::Workdir)?;

        if keep {
            let path = dir.keep();
            info!("Keeping engine working directory: {}", path.display());
            return Ok(Self { dir: None, path });
        }

        let path = dir.path().to_path_buf();
        debug!(?path, "Workspace::create: temporary");
        Ok(Self { dir: Some(dir), path })
    }

    /// Create a workspace and write the problem's PDDL into it
    pub fn prepare(problem: &Problem, keep: bool) -> Result<Self, EngineError> {
        let workspace = Self::create(keep)?;
        let files = workspace.files();
        problem.pddl().write_domain(&files.domain)?;
        problem.pddl().write_problem(&files.problem)?;
        debug!(problem = %problem.name, path = ?workspace.path, "Workspace::prepare: PDDL written");
        Ok(workspace)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn files(&self) -> PlanFiles {
        PlanFiles::in_dir(&self.path)
    }

    pub fn is_temporary(&self) -> bool {
        self.dir.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planmodel::PddlSource;

    #[test]
    fn test_prepare_writes_pddl_and_cleans_up() {
        let mut problem = Problem::new("p");
        problem.set_pddl(PddlSource::Inline {
            domain: "(define (domain d))".to_string(),
            problem: "(define (problem p))".to_string(),
        });

        let workspace = Workspace::prepare(&problem, false).unwrap();
        let files = workspace.files();
        assert!(workspace.is_temporary());
        assert_eq!(std::fs::read_to_string(&files.domain).unwrap(), "(define (domain d))");
        assert_eq!(std::fs::read_to_string(&files.problem).unwrap(), "(define (problem p))");
        assert!(!files.plan.exists());

        let path = workspace.path().to_path_buf();
        drop(workspace);
        assert!(!path.exists());
    }

    #[test]
    fn test_kept_workspace_survives_drop() {
        let workspace = Workspace::create(true).unwrap();
        let path = workspace.path().to_path_buf();
        assert!(!workspace.is_temporary());
        drop(workspace);

        assert!(path.exists());
        std::fs::remove_dir_all(path).unwrap();
    }

    #[test]
    fn test_prepare_propagates_pddl_errors() {
        let mut problem = Problem::new("p");
        problem.set_pddl(PddlSource::Files {
            domain: PathBuf::from("/nonexistent/domain.pddl"),
            problem: PathBuf::from("/nonexistent/problem.pddl"),
        });

        let err = Workspace::prepare(&problem, false).unwrap_err();
        assert!(matches!(err, EngineError::Pddl(_)));
    }
}
