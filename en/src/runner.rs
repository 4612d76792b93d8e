//! Process runner
//!
//! Oneshot runs spawn the engine and wait for it. Anytime runs hand the child
//! to a background task that scans stdout for plans and queues results on an
//! unbounded channel; the caller drains it through [`AnytimeRun`], which is a
//! [`Stream`].

use std::io;
use std::path::Path;
use std::pin::Pin;
use std::process::Stdio;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::Stream;
use planmodel::{LogLevel, LogMessage, PlanGenerationResult, PlanGenerationStatus, Problem, SequentialPlan};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::classify::classify;
use crate::error::EngineError;
use crate::parser::parse_plan;
use crate::scanner::PlanScanner;
use crate::workspace::Workspace;

/// What a finished oneshot process left behind
#[derive(Debug, Clone)]
pub struct EngineOutput {
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl EngineOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

fn command_for(argv: &[String], workdir: &Path) -> Result<Command, EngineError> {
    let (program, args) = argv.split_first().ok_or(EngineError::EmptyCommand)?;
    let mut cmd = Command::new(program);
    cmd.args(args).current_dir(workdir).stdin(Stdio::null()).kill_on_drop(true);
    Ok(cmd)
}

fn spawn_error(argv: &[String], source: io::Error) -> EngineError {
    EngineError::Spawn {
        program: argv.first().cloned().unwrap_or_default(),
        source,
    }
}

/// Run the engine to completion, capturing stdout and stderr
pub async fn run_oneshot(argv: &[String], workdir: &Path) -> Result<EngineOutput, EngineError> {
    debug!(?argv, ?workdir, "run_oneshot: called");
    let output = command_for(argv, workdir)?
        .output()
        .await
        .map_err(|e| spawn_error(argv, e))?;

    let result = EngineOutput {
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    };
    debug!(
        exit_code = ?result.exit_code,
        stdout_len = result.stdout.len(),
        stderr_len = result.stderr.len(),
        "run_oneshot: process finished"
    );
    Ok(result)
}

/// Kill the child, treating an already exited process as success
async fn kill_child(child: &mut Child) {
    match child.kill().await {
        Ok(()) => debug!("kill_child: engine process killed"),
        Err(e) if e.kind() == io::ErrorKind::InvalidInput => {
            debug!("kill_child: engine process had already exited");
        }
        Err(e) => warn!(error = %e, "Failed to kill engine process"),
    }
}

async fn read_all<R: AsyncRead + Unpin>(mut reader: R) -> String {
    let mut buf = Vec::new();
    if let Err(e) = reader.read_to_end(&mut buf).await {
        debug!(error = %e, "read_all: stream error");
    }
    String::from_utf8_lossy(&buf).to_string()
}

/// Everything the background worker needs to turn output into results
#[derive(Debug, Clone)]
pub struct AnytimeJob {
    pub problem: Arc<Problem>,
    pub engine_name: String,
    pub optimal: bool,
}

type Item = Result<PlanGenerationResult, EngineError>;

/// A running anytime engine
///
/// Yields [`PlanGenerationStatus::Intermediate`] results as plans are found,
/// then one terminal result, then ends. An error item also ends the stream.
///
/// Call [`AnytimeRun::cancel`] to stop early: it kills the engine and waits
/// for the worker. Dropping an unfinished run signals the worker to kill the
/// engine but cannot wait for it.
pub struct AnytimeRun {
    rx: mpsc::UnboundedReceiver<Item>,
    stop_tx: Option<oneshot::Sender<()>>,
    worker: Option<JoinHandle<()>>,
    finished: bool,
}

impl AnytimeRun {
    /// Spawn the engine and its output worker
    ///
    /// The workspace moves into the worker and is removed once the engine is gone.
    pub fn spawn(argv: &[String], workspace: Workspace, job: AnytimeJob) -> Result<Self, EngineError> {
        debug!(?argv, engine = %job.engine_name, "AnytimeRun::spawn: called");
        let child = command_for(argv, workspace.path())?
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| spawn_error(argv, e))?;
        info!(pid = ?child.id(), engine = %job.engine_name, "Anytime engine started");

        let (tx, rx) = mpsc::unbounded_channel();
        let (stop_tx, stop_rx) = oneshot::channel();
        let worker = tokio::spawn(anytime_worker(child, workspace, job, tx, stop_rx));

        Ok(Self {
            rx,
            stop_tx: Some(stop_tx),
            worker: Some(worker),
            finished: false,
        })
    }

    /// Stop the engine and wait for the worker to finish
    pub async fn cancel(mut self) -> Result<(), EngineError> {
        debug!(finished = self.finished, "AnytimeRun::cancel: called");
        if let Some(stop_tx) = self.stop_tx.take() {
            // The worker may already be gone; that is fine.
            let _ = stop_tx.send(());
        }
        if let Some(worker) = self.worker.take() {
            worker.await.map_err(|e| EngineError::Worker(e.to_string()))?;
        }
        info!("Anytime engine cancelled");
        Ok(())
    }

    /// True once a terminal result or an error has been yielded
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl Stream for AnytimeRun {
    type Item = Item;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if self.finished {
            return Poll::Ready(None);
        }
        match self.rx.poll_recv(cx) {
            Poll::Ready(Some(Ok(result))) => {
                if result.status.is_terminal() {
                    self.finished = true;
                }
                Poll::Ready(Some(Ok(result)))
            }
            Poll::Ready(Some(Err(e))) => {
                self.finished = true;
                Poll::Ready(Some(Err(e)))
            }
            Poll::Ready(None) => {
                self.finished = true;
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl Drop for AnytimeRun {
    /// Signal the worker to kill the engine; the kill happens after drop returns
    fn drop(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
    }
}

async fn anytime_worker(
    mut child: Child,
    workspace: Workspace,
    job: AnytimeJob,
    tx: mpsc::UnboundedSender<Item>,
    mut stop_rx: oneshot::Receiver<()>,
) {
    debug!(engine = %job.engine_name, "anytime_worker: started");
    let stderr_task = child.stderr.take().map(|s| tokio::spawn(read_all(s)));

    let Some(stdout) = child.stdout.take() else {
        let _ = tx.send(Err(EngineError::Worker("engine stdout was not captured".to_string())));
        kill_child(&mut child).await;
        return;
    };

    let mut lines = BufReader::new(stdout).lines();
    let mut scanner = PlanScanner::new();
    let mut best: Option<SequentialPlan> = None;

    loop {
        let line = tokio::select! {
            _ = &mut stop_rx => {
                debug!("anytime_worker: stop requested");
                kill_child(&mut child).await;
                abort_task(stderr_task);
                return;
            }
            line = lines.next_line() => line,
        };

        match line {
            Ok(Some(line)) => {
                let Some(text) = scanner.feed(&line) else { continue };
                match parse_plan(&text, &job.problem, &job.engine_name) {
                    Ok(plan) => {
                        info!(steps = plan.len(), plans = scanner.plans_seen(), "Anytime engine found a plan");
                        best = Some(plan.clone());
                        let result =
                            PlanGenerationResult::new(PlanGenerationStatus::Intermediate, Some(plan), &job.engine_name);
                        if tx.send(Ok(result)).is_err() {
                            debug!("anytime_worker: consumer gone");
                            kill_child(&mut child).await;
                            abort_task(stderr_task);
                            return;
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "Anytime engine produced an unparseable plan");
                        let _ = tx.send(Err(e.into()));
                        kill_child(&mut child).await;
                        abort_task(stderr_task);
                        return;
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "Failed reading engine output");
                let _ = tx.send(Err(EngineError::Io(e)));
                kill_child(&mut child).await;
                abort_task(stderr_task);
                return;
            }
        }
    }

    let waited = tokio::select! {
        _ = &mut stop_rx => None,
        status = child.wait() => Some(status),
    };
    let status = match waited {
        Some(Ok(status)) => status,
        Some(Err(e)) => {
            let _ = tx.send(Err(EngineError::Io(e)));
            abort_task(stderr_task);
            return;
        }
        None => {
            debug!("anytime_worker: stop requested while waiting for exit");
            kill_child(&mut child).await;
            abort_task(stderr_task);
            return;
        }
    };

    let stderr = match stderr_task {
        Some(task) => task.await.unwrap_or_default(),
        None => String::new(),
    };

    let exit_code = status.code();
    let final_status = classify(exit_code, best.is_some(), job.problem.has_quality_metrics(), job.optimal);
    let plan = if final_status == PlanGenerationStatus::InternalError { None } else { best };
    let mut result = PlanGenerationResult::new(final_status, plan, &job.engine_name);
    if let Some(message) = stderr_message(final_status, &stderr) {
        result = result.with_log(message);
    }
    info!(status = %final_status, exit_code = ?exit_code, "Anytime engine finished");
    let _ = tx.send(Ok(result));

    debug!(path = ?workspace.path(), "anytime_worker: done");
}

fn abort_task(task: Option<JoinHandle<String>>) {
    if let Some(task) = task {
        task.abort();
    }
}

/// Turn captured stderr into a log message, if there is anything to say
pub fn stderr_message(status: PlanGenerationStatus, stderr: &str) -> Option<LogMessage> {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        return None;
    }
    let level = match status {
        PlanGenerationStatus::InternalError => LogLevel::Error,
        _ => LogLevel::Info,
    };
    Some(LogMessage::new(level, stderr))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh(script: &str) -> Vec<String> {
        vec!["sh".to_string(), "-c".to_string(), script.to_string()]
    }

    #[tokio::test]
    async fn test_run_oneshot_captures_output() {
        let temp = tempfile::tempdir().unwrap();
        let out = run_oneshot(&sh("echo out; echo err >&2; exit 3"), temp.path()).await.unwrap();

        assert_eq!(out.exit_code, Some(3));
        assert!(!out.success());
        assert_eq!(out.stdout.trim(), "out");
        assert_eq!(out.stderr.trim(), "err");
    }

    #[tokio::test]
    async fn test_run_oneshot_runs_in_workdir() {
        let temp = tempfile::tempdir().unwrap();
        let out = run_oneshot(&sh("touch marker"), temp.path()).await.unwrap();

        assert!(out.success());
        assert!(temp.path().join("marker").exists());
    }

    #[tokio::test]
    async fn test_run_oneshot_launch_failure() {
        let temp = tempfile::tempdir().unwrap();
        let argv = vec!["/nonexistent/java".to_string()];
        let err = run_oneshot(&argv, temp.path()).await.unwrap_err();

        assert!(err.is_launch_failure());
    }

    #[tokio::test]
    async fn test_run_oneshot_empty_argv() {
        let temp = tempfile::tempdir().unwrap();
        let err = run_oneshot(&[], temp.path()).await.unwrap_err();
        assert!(matches!(err, EngineError::EmptyCommand));
    }

    #[test]
    fn test_stderr_message_levels() {
        assert_eq!(stderr_message(PlanGenerationStatus::InternalError, "  \n"), None);
        assert_eq!(
            stderr_message(PlanGenerationStatus::InternalError, "Exception\n"),
            Some(LogMessage::new(LogLevel::Error, "Exception"))
        );
        assert_eq!(
            stderr_message(PlanGenerationStatus::UnsolvableProven, "note"),
            Some(LogMessage::new(LogLevel::Info, "note"))
        );
    }
}
