//! External flashing-tool pipelines
//!
//! Flashing a board usually means chaining external tools (format
//! converters into an uploader such as avrdude or bossac) with the stdout of
//! one stage feeding the stdin of the next. All stages run concurrently;
//! the final stage's stdout is collected and returned.

use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum FlashError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Pipeline has no stages")]
    EmptyPipeline,
    #[error("Stage {program:?} failed: {detail}")]
    Stage { program: String, detail: String },
}

/// One external command in a pipeline.
#[derive(Debug, Clone)]
pub struct PipelineStage {
    pub program: String,
    pub args: Vec<String>,
}

impl PipelineStage {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

/// Run a pipeline of external commands, wiring stdout to stdin between
/// consecutive stages, and return the final stage's stdout.
///
/// Every stage's stderr is captured; a stage that cannot be spawned or
/// exits non-zero fails the whole pipeline with its stderr in the error.
pub async fn run_pipeline(stages: &[PipelineStage]) -> Result<Vec<u8>, FlashError> {
    if stages.is_empty() {
        return Err(FlashError::EmptyPipeline);
    }

    let mut children = Vec::with_capacity(stages.len());
    let mut upstream: Option<Stdio> = None;

    for (i, stage) in stages.iter().enumerate() {
        let mut cmd = Command::new(&stage.program);
        cmd.args(&stage.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Reap already-running stages if a later spawn fails.
            .kill_on_drop(true);
        match upstream.take() {
            Some(stdin) => {
                cmd.stdin(stdin);
            }
            None => {
                cmd.stdin(Stdio::null());
            }
        }

        debug!(program = %stage.program, args = ?stage.args, "Spawning pipeline stage");
        let mut child = cmd.spawn().map_err(|e| FlashError::Stage {
            program: stage.program.clone(),
            detail: e.to_string(),
        })?;

        if i + 1 < stages.len() {
            let stdout = child.stdout.take().ok_or_else(|| FlashError::Stage {
                program: stage.program.clone(),
                detail: "stdout handle unavailable".to_string(),
            })?;
            upstream = Some(stdout.try_into()?);
        }

        children.push(child);
    }

    // Drain every stage concurrently. Waiting front-to-back would deadlock
    // once a downstream stdout or stderr pipe fills: the stalled stage stops
    // reading stdin and the backpressure reaches the stage being awaited.
    let tasks: Vec<_> = children
        .into_iter()
        .map(|child| tokio::spawn(child.wait_with_output()))
        .collect();

    let last = tasks.len() - 1;
    let mut output = Vec::new();
    for (i, task) in tasks.into_iter().enumerate() {
        let result = task.await.map_err(|e| FlashError::Stage {
            program: stages[i].program.clone(),
            detail: format!("stage task failed: {e}"),
        })??;
        if !result.stderr.is_empty() {
            warn!(
                program = %stages[i].program,
                stderr = %String::from_utf8_lossy(&result.stderr),
                "Pipeline stage wrote to stderr"
            );
        }
        if !result.status.success() {
            return Err(FlashError::Stage {
                program: stages[i].program.clone(),
                detail: format!(
                    "exited with {}: {}",
                    result.status,
                    String::from_utf8_lossy(&result.stderr).trim()
                ),
            });
        }
        if i == last {
            output = result.stdout;
        }
    }

    Ok(output)
}
