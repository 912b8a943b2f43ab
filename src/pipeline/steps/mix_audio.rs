//! Mix speech with the attenuated music, optionally ducking.

use crate::pipeline::errors::{StepError, StepResult};
use crate::pipeline::step::PipelineStep;
use crate::pipeline::types::{Context, JobState, StepOutcome};

use crate::media::args;

/// Combines the speech track and the trimmed music into one audio stream.
/// With ducking enabled the music is sidechain-compressed against the
/// speech first, so it dips under phrases and recovers between them.
pub struct MixAudioStep;

impl PipelineStep for MixAudioStep {
    fn name(&self) -> &'static str {
        "Mix Audio"
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<StepOutcome> {
        let music = state
            .trimmed_music
            .clone()
            .ok_or_else(|| StepError::invalid_input("music has not been trimmed"))?;
        let output = ctx.work.mixed_audio();

        if ctx.request.ducking.enabled {
            ctx.logger.info("Ducking enabled for music under speech");
        }

        let args = args::mix_args(&ctx.request.speech_audio, &music, &ctx.request, &output);
        ctx.run_tool("ffmpeg", &args)?;

        state.mixed_audio = Some(output);
        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        match &state.mixed_audio {
            Some(path) if path.is_file() => Ok(()),
            Some(path) => Err(StepError::invalid_output(format!(
                "mixed audio missing: {}",
                path.display()
            ))),
            None => Err(StepError::invalid_output("no mixed audio recorded")),
        }
    }
}
