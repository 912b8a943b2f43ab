//! Final step: mux video and audio into the delivered container.

use std::fs;

use crate::media::args;
use crate::pipeline::errors::{StepError, StepResult};
use crate::pipeline::step::PipelineStep;
use crate::pipeline::types::{Context, JobState, StepOutcome};

/// Combines the trimmed video with the mixed audio. Burns the subtitle
/// file into the pixels when configured to; otherwise copies it next to
/// the output so players can load it as a side file.
pub struct MuxStep;

impl PipelineStep for MuxStep {
    fn name(&self) -> &'static str {
        "Mux"
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<StepOutcome> {
        let video = state
            .trimmed_video
            .clone()
            .ok_or_else(|| StepError::invalid_input("video has not been trimmed"))?;
        let audio = state
            .mixed_audio
            .clone()
            .ok_or_else(|| StepError::invalid_input("audio has not been mixed"))?;

        let output = ctx.request.output_path.clone();
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| StepError::io("create output directory", e))?;
            }
        }

        let format = ctx.request.captions.mode.format();
        let burn = match (&state.subtitle_file, format) {
            (Some(path), Some(format)) if ctx.request.captions.burn_in => {
                Some((path.as_path(), format))
            }
            _ => None,
        };

        let args = args::mux_args(&video, &audio, burn, &ctx.request, &output);
        ctx.run_tool("ffmpeg", &args)?;

        // Subtitle survives the working-area cleanup as a sidecar file.
        if !ctx.request.captions.burn_in {
            if let (Some(subtitle), Some(format)) = (&state.subtitle_file, format) {
                let sidecar = output.with_extension(format.extension());
                fs::copy(subtitle, &sidecar)
                    .map_err(|e| StepError::io("copy subtitle sidecar", e))?;
                ctx.logger
                    .info(&format!("Subtitle sidecar: {}", sidecar.display()));
            }
        }

        ctx.logger
            .success(&format!("Delivered {}", output.display()));
        state.delivered = Some(output);
        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        match &state.delivered {
            Some(path) if path.is_file() => Ok(()),
            Some(path) => Err(StepError::invalid_output(format!(
                "output missing: {}",
                path.display()
            ))),
            None => Err(StepError::invalid_output("no output recorded")),
        }
    }
}
