//! Command runner for external media tools.
//!
//! [`ToolRunner`] is the seam between the pipeline and the operating
//! system: production code uses [`FfmpegRunner`], tests substitute a
//! recording mock to assert exactly which commands would run.

use std::process::{Command, Stdio};

use super::{MediaError, MediaResult};

/// Captured output of a completed command.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Executes an external tool to completion.
///
/// Implementations block until the subprocess exits and return `Ok` only
/// for a zero exit status; any failure surfaces as
/// [`MediaError::CommandFailed`] carrying the command line and stderr.
pub trait ToolRunner: Send + Sync {
    fn run(&self, tool: &str, args: &[String]) -> MediaResult<CommandOutput>;
}

/// Runs ffmpeg/ffprobe found on PATH (or at configured locations).
#[derive(Debug, Clone, Default)]
pub struct FfmpegRunner;

impl FfmpegRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ToolRunner for FfmpegRunner {
    fn run(&self, tool: &str, args: &[String]) -> MediaResult<CommandOutput> {
        tracing::debug!(tool, ?args, "running external tool");

        let output = Command::new(tool)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| MediaError::Spawn {
                tool: tool.to_string(),
                source: e,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            return Err(MediaError::CommandFailed {
                tool: tool.to_string(),
                exit_code: output.status.code().unwrap_or(-1),
                command: format!("{} {}", tool, args.join(" ")),
                stderr,
            });
        }

        Ok(CommandOutput { stdout, stderr })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonzero_exit_surfaces_command_and_stderr() {
        let runner = FfmpegRunner::new();
        // `false` exits 1 with no output; portable enough for CI.
        let err = runner.run("false", &[]).unwrap_err();
        match err {
            MediaError::CommandFailed {
                tool, exit_code, ..
            } => {
                assert_eq!(tool, "false");
                assert_ne!(exit_code, 0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_binary_is_a_spawn_error() {
        let runner = FfmpegRunner::new();
        let err = runner
            .run("definitely-not-a-real-tool-xyz", &[])
            .unwrap_err();
        assert!(matches!(err, MediaError::Spawn { .. }));
    }

    #[test]
    fn captures_stdout() {
        let runner = FfmpegRunner::new();
        let out = runner.run("echo", &["hello".to_string()]).unwrap();
        assert_eq!(out.stdout.trim(), "hello");
    }
}
