//! External media tool integration.
//!
//! - **runner**: subprocess execution seam ([`ToolRunner`] / [`FfmpegRunner`])
//! - **probe**: duration queries via ffprobe
//! - **args**: argument-vector builders for every ffmpeg invocation
//! - **filters**: filter-graph string builders (ducking mix, subtitle burn,
//!   playback speed)
//!
//! The builders are pure so every command the pipeline would run can be
//! asserted in tests without spawning a process.

pub mod args;
pub mod filters;
pub mod probe;
pub mod runner;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors from external tool invocations and their output parsing.
#[derive(Error, Debug)]
pub enum MediaError {
    /// The tool binary could not be launched at all.
    #[error("Failed to launch {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: io::Error,
    },

    /// The tool exited non-zero. Carries the full command line and captured
    /// stderr for diagnosis; never retried.
    #[error("{tool} failed with exit code {exit_code}: {stderr}")]
    CommandFailed {
        tool: String,
        exit_code: i32,
        command: String,
        stderr: String,
    },

    /// ffprobe ran but its output was not a non-negative duration.
    #[error("Unable to parse duration from ffprobe output for {}: {output:?}", path.display())]
    UnparseableDuration { path: PathBuf, output: String },
}

/// Result type for media tool operations.
pub type MediaResult<T> = Result<T, MediaError>;

pub use probe::probe_duration_secs;
pub use runner::{CommandOutput, FfmpegRunner, ToolRunner};
