//! Trim the background video to the speech duration.

use crate::media::args;
use crate::pipeline::errors::{StepError, StepResult};
use crate::pipeline::step::PipelineStep;
use crate::pipeline::types::{Context, JobState, StepOutcome};

/// Re-encodes the background video down to `[0, speech_duration]`, dropping
/// its original audio track.
pub struct TrimVideoStep;

impl PipelineStep for TrimVideoStep {
    fn name(&self) -> &'static str {
        "Trim Video"
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<StepOutcome> {
        let duration = state.target_duration()?;
        let output = ctx.work.trimmed_video();

        let args = args::trim_video_args(
            &ctx.request.background_video,
            duration,
            &ctx.request.encode,
            &output,
        );
        ctx.run_tool("ffmpeg", &args)?;

        state.trimmed_video = Some(output);
        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        match &state.trimmed_video {
            Some(path) if path.is_file() => Ok(()),
            Some(path) => Err(StepError::invalid_output(format!(
                "trimmed video missing: {}",
                path.display()
            ))),
            None => Err(StepError::invalid_output("no trimmed video recorded")),
        }
    }
}
