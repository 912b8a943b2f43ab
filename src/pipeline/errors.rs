//! Error types for the composition pipeline.
//!
//! Errors carry context that chains through layers:
//! Composition → Step → Operation → Detail
//!
//! All of them are terminal for the current request: every step is
//! deterministic given its inputs, so a retry would reproduce the failure.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::media::MediaError;
use crate::subtitles::RenderError;

/// Top-level pipeline error with composition context.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A step failed during execution.
    #[error("Composition '{job_name}' failed at step '{step_name}': {source}")]
    StepFailed {
        job_name: String,
        step_name: String,
        #[source]
        source: StepError,
    },

    /// Pipeline was cancelled.
    #[error("Composition '{job_name}' was cancelled")]
    Cancelled { job_name: String },

    /// Failed to set up the composition (working area, log directory).
    #[error("Composition '{job_name}' setup failed: {message}")]
    SetupFailed { job_name: String, message: String },
}

impl PipelineError {
    pub fn step_failed(
        job_name: impl Into<String>,
        step_name: impl Into<String>,
        source: StepError,
    ) -> Self {
        Self::StepFailed {
            job_name: job_name.into(),
            step_name: step_name.into(),
            source,
        }
    }

    pub fn setup_failed(job_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SetupFailed {
            job_name: job_name.into(),
            message: message.into(),
        }
    }

    pub fn cancelled(job_name: impl Into<String>) -> Self {
        Self::Cancelled {
            job_name: job_name.into(),
        }
    }
}

/// Error from a pipeline step with operation context.
#[derive(Error, Debug)]
pub enum StepError {
    /// An input file does not exist. Checked eagerly, before any
    /// subprocess is spawned.
    #[error("Input file not found: {}", path.display())]
    MissingInput { path: PathBuf },

    /// Duration probe failed or produced unparseable output.
    #[error("Duration probe failed: {0}")]
    Probe(#[source] MediaError),

    /// An external tool invocation failed.
    #[error(transparent)]
    Tool(#[from] MediaError),

    /// A subtitle file could not be written.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// File I/O error.
    #[error("I/O error in {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: io::Error,
    },

    /// Input validation failed.
    #[error("Input validation failed: {0}")]
    InvalidInput(String),

    /// Output validation failed.
    #[error("Output validation failed: {0}")]
    InvalidOutput(String),
}

impl StepError {
    pub fn missing_input(path: impl Into<PathBuf>) -> Self {
        Self::MissingInput { path: path.into() }
    }

    pub fn io(operation: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_output(message: impl Into<String>) -> Self {
        Self::InvalidOutput(message.into())
    }
}

/// Result type for step operations.
pub type StepResult<T> = Result<T, StepError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_error_displays_context() {
        let err = StepError::Tool(MediaError::CommandFailed {
            tool: "ffmpeg".to_string(),
            exit_code: 1,
            command: "ffmpeg -y -i x".to_string(),
            stderr: "Invalid data found".to_string(),
        });
        let msg = err.to_string();
        assert!(msg.contains("ffmpeg"));
        assert!(msg.contains("exit code 1"));
        assert!(msg.contains("Invalid data found"));
    }

    #[test]
    fn pipeline_error_chains_context() {
        let step_err = StepError::missing_input("/path/to/speech.mp3");
        let pipeline_err = PipelineError::step_failed("story_xyz", "Probe", step_err);

        let msg = pipeline_err.to_string();
        assert!(msg.contains("story_xyz"));
        assert!(msg.contains("Probe"));
        assert!(msg.contains("speech.mp3"));
    }
}
