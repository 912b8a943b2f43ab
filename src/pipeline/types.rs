//! Shared context and accumulated state for pipeline steps.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::logging::JobLogger;
use crate::media::runner::{CommandOutput, ToolRunner};
use crate::media::MediaError;
use crate::models::CompositionRequest;

use super::errors::{StepError, StepResult};
use super::workspace::WorkingArea;

/// Read-only context shared by every step of one composition.
pub struct Context {
    /// The caller's request; never mutated after construction.
    pub request: CompositionRequest,
    /// Composition name, used for log files and error context.
    pub job_name: String,
    /// Scratch directory for intermediate artifacts.
    pub work: WorkingArea,
    pub logger: Arc<JobLogger>,
    pub runner: Arc<dyn ToolRunner>,
    cancel: Arc<AtomicBool>,
}

impl Context {
    pub fn new(
        request: CompositionRequest,
        job_name: impl Into<String>,
        work: WorkingArea,
        logger: Arc<JobLogger>,
        runner: Arc<dyn ToolRunner>,
    ) -> Self {
        Self {
            request,
            job_name: job_name.into(),
            work,
            logger,
            runner,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag an embedding caller can set from another thread to stop the
    /// pipeline at the next step boundary.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        self.cancel.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    /// Run an external tool, logging the command line and feeding its
    /// stderr into the tail buffer. On failure the tail is shown before the
    /// error propagates.
    pub fn run_tool(&self, tool: &str, args: &[String]) -> StepResult<CommandOutput> {
        self.logger
            .command(&format!("{} {}", tool, args.join(" ")));
        self.logger.clear_tail();

        match self.runner.run(tool, args) {
            Ok(output) => {
                for line in output.stderr.lines() {
                    self.logger.output_line(line, true);
                }
                Ok(output)
            }
            Err(err) => {
                if let MediaError::CommandFailed { stderr, .. } = &err {
                    for line in stderr.lines() {
                        self.logger.output_line(line, true);
                    }
                    self.logger.show_tail(tool);
                }
                Err(StepError::from(err))
            }
        }
    }
}

/// Mutable state accumulated as steps execute.
///
/// Each step reads what earlier steps recorded and adds its own artifacts.
#[derive(Debug, Clone, Default)]
pub struct JobState {
    /// Speech duration in seconds; authoritative for every trim.
    pub target_duration_secs: Option<f64>,
    pub trimmed_video: Option<PathBuf>,
    pub trimmed_music: Option<PathBuf>,
    pub mixed_audio: Option<PathBuf>,
    /// Rendered subtitle file, when captions are enabled.
    pub subtitle_file: Option<PathBuf>,
    /// Final muxed output, set by the last step.
    pub delivered: Option<PathBuf>,
}

impl JobState {
    /// The probed speech duration, or an error if the probe step has not
    /// recorded one yet.
    pub fn target_duration(&self) -> StepResult<f64> {
        self.target_duration_secs
            .ok_or_else(|| StepError::invalid_input("speech duration has not been probed"))
    }
}

/// Result of a step execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Step completed and its artifacts are recorded in the state.
    Success,
    /// Step had nothing to do; carries the reason for the log.
    Skipped(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_duration_is_an_error() {
        let state = JobState::default();
        assert!(matches!(
            state.target_duration(),
            Err(StepError::InvalidInput(_))
        ));

        let state = JobState {
            target_duration_secs: Some(12.5),
            ..JobState::default()
        };
        assert_eq!(state.target_duration().unwrap(), 12.5);
    }
}
