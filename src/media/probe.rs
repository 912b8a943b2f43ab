//! Duration probing via ffprobe.

use std::path::Path;

use super::runner::ToolRunner;
use super::{MediaError, MediaResult};

/// Query a media file's duration in seconds.
///
/// Fails if ffprobe exits non-zero or prints anything other than a
/// non-negative number. No retry: probing is deterministic, and without a
/// duration there is nothing to trim to.
pub fn probe_duration_secs(runner: &dyn ToolRunner, path: &Path) -> MediaResult<f64> {
    let args = probe_args(path);
    let output = runner.run("ffprobe", &args)?;

    let raw = output.stdout.trim();
    match raw.parse::<f64>() {
        Ok(secs) if secs.is_finite() && secs >= 0.0 => Ok(secs),
        _ => Err(MediaError::UnparseableDuration {
            path: path.to_path_buf(),
            output: raw.to_string(),
        }),
    }
}

/// ffprobe arguments: suppress everything except a bare duration value.
pub fn probe_args(path: &Path) -> Vec<String> {
    vec![
        "-v".to_string(),
        "error".to_string(),
        "-show_entries".to_string(),
        "format=duration".to_string(),
        "-of".to_string(),
        "default=noprint_wrappers=1:nokey=1".to_string(),
        path.display().to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::runner::CommandOutput;
    use std::path::PathBuf;

    struct FixedOutput(&'static str);

    impl ToolRunner for FixedOutput {
        fn run(&self, _tool: &str, _args: &[String]) -> MediaResult<CommandOutput> {
            Ok(CommandOutput {
                stdout: self.0.to_string(),
                stderr: String::new(),
            })
        }
    }

    #[test]
    fn parses_trimmed_duration() {
        let secs = probe_duration_secs(&FixedOutput("42.75\n"), &PathBuf::from("a.mp3")).unwrap();
        assert_eq!(secs, 42.75);
    }

    #[test]
    fn rejects_garbage_output() {
        let err = probe_duration_secs(&FixedOutput("N/A"), &PathBuf::from("a.mp3")).unwrap_err();
        assert!(matches!(err, MediaError::UnparseableDuration { .. }));
    }

    #[test]
    fn rejects_negative_duration() {
        let err = probe_duration_secs(&FixedOutput("-3.0"), &PathBuf::from("a.mp3")).unwrap_err();
        assert!(matches!(err, MediaError::UnparseableDuration { .. }));
    }

    #[test]
    fn probe_args_end_with_input_path() {
        let args = probe_args(&PathBuf::from("/tmp/x.mp3"));
        assert_eq!(args.first().unwrap(), "-v");
        assert_eq!(args.last().unwrap(), "/tmp/x.mp3");
    }
}
