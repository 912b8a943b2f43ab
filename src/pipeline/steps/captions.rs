//! Render the subtitle file for the configured caption mode.

use crate::models::SubtitleFormat;
use crate::pipeline::errors::{StepError, StepResult};
use crate::pipeline::step::PipelineStep;
use crate::pipeline::types::{Context, JobState, StepOutcome};
use crate::subtitles::{self, writers};

/// Builds caption events from the narration or transcript and writes the
/// subtitle file into the working area. Skipped entirely when captions are
/// disabled or no events come out (e.g. whitespace-only narration).
pub struct RenderCaptionsStep;

impl PipelineStep for RenderCaptionsStep {
    fn name(&self) -> &'static str {
        "Render Captions"
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<StepOutcome> {
        let captions = &ctx.request.captions;
        let Some(format) = captions.mode.format() else {
            return Ok(StepOutcome::Skipped("captions disabled".to_string()));
        };

        let duration = state.target_duration()?;
        let events = subtitles::build_events(&ctx.request, duration).unwrap_or_default();
        if events.is_empty() {
            return Ok(StepOutcome::Skipped(
                "no caption events produced".to_string(),
            ));
        }

        let path = ctx.work.subtitle(format);
        match format {
            SubtitleFormat::Srt => {
                writers::write_srt_file(&path, &events, captions.wrap_width, captions.max_lines)?
            }
            SubtitleFormat::Ass => writers::write_ass_file(&path, &events, captions)?,
        }

        ctx.logger.info(&format!(
            "Rendered {} caption events to {}",
            events.len(),
            path.display()
        ));
        state.subtitle_file = Some(path);
        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        match &state.subtitle_file {
            Some(path) if path.is_file() => Ok(()),
            Some(path) => Err(StepError::invalid_output(format!(
                "subtitle file missing: {}",
                path.display()
            ))),
            None => Err(StepError::invalid_output("no subtitle file recorded")),
        }
    }
}
