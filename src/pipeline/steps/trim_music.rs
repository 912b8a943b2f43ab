//! Trim and attenuate the background music.

use crate::media::args;
use crate::pipeline::errors::{StepError, StepResult};
use crate::pipeline::step::PipelineStep;
use crate::pipeline::types::{Context, JobState, StepOutcome};

/// Trims the music to `[0, speech_duration]` and applies the configured
/// volume reduction so it sits under the speech in the mix.
pub struct TrimMusicStep;

impl PipelineStep for TrimMusicStep {
    fn name(&self) -> &'static str {
        "Trim Music"
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<StepOutcome> {
        let duration = state.target_duration()?;
        let output = ctx.work.trimmed_music();

        let args = args::trim_music_args(
            &ctx.request.background_music,
            duration,
            ctx.request.mix.music_db_reduction,
            &ctx.request.encode,
            &output,
        );
        ctx.run_tool("ffmpeg", &args)?;

        state.trimmed_music = Some(output);
        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        match &state.trimmed_music {
            Some(path) if path.is_file() => Ok(()),
            Some(path) => Err(StepError::invalid_output(format!(
                "trimmed music missing: {}",
                path.display()
            ))),
            None => Err(StepError::invalid_output("no trimmed music recorded")),
        }
    }
}
