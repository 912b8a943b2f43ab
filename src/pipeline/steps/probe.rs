//! First step: validate inputs and probe the speech duration.

use crate::media::probe_duration_secs;
use crate::pipeline::errors::{StepError, StepResult};
use crate::pipeline::step::PipelineStep;
use crate::pipeline::types::{Context, JobState, StepOutcome};

/// Probes the speech audio's duration, which every later trim targets.
///
/// Input validation covers the whole composition: all three input files
/// must exist, and the configured caption mode must have its text source.
/// This runs before any subprocess, so a bad request never spawns one.
pub struct ProbeDurationStep;

impl PipelineStep for ProbeDurationStep {
    fn name(&self) -> &'static str {
        "Probe Duration"
    }

    fn validate_input(&self, ctx: &Context) -> StepResult<()> {
        for path in ctx.request.input_paths() {
            if !path.is_file() {
                return Err(StepError::missing_input(path.clone()));
            }
        }

        let speed = ctx.request.playback_speed;
        if !speed.is_finite() || speed <= 0.0 {
            return Err(StepError::invalid_input(format!(
                "playback speed must be a positive number, got {}",
                speed
            )));
        }

        let mode = ctx.request.captions.mode;
        if mode.needs_narration()
            && ctx
                .request
                .narration
                .as_deref()
                .map_or(true, |t| t.trim().is_empty())
        {
            return Err(StepError::invalid_input(
                "proportional caption mode requires narration text",
            ));
        }
        if mode.needs_transcript()
            && ctx
                .request
                .transcript
                .as_deref()
                .map_or(true, |t| t.is_empty())
        {
            return Err(StepError::invalid_input(
                "word-exact caption mode requires a transcript",
            ));
        }

        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<StepOutcome> {
        let path = &ctx.request.speech_audio;
        ctx.logger
            .command(&format!("ffprobe {}", path.display()));

        let duration = probe_duration_secs(ctx.runner.as_ref(), path).map_err(StepError::Probe)?;

        ctx.logger
            .info(&format!("Speech duration: {:.3}s", duration));
        state.target_duration_secs = Some(duration);
        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        if state.target_duration_secs.is_none() {
            return Err(StepError::invalid_output("no duration was recorded"));
        }
        Ok(())
    }
}
