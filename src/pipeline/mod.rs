//! Composition pipeline: orchestration of the probe/trim/mix/caption/mux
//! steps that turn three input files into one narrated video.
//!
//! The [`compose`] entry point covers the common case; embedding callers
//! that need cancellation or progress callbacks can assemble a
//! [`Pipeline`] and [`Context`] themselves.

pub mod errors;
#[allow(clippy::module_inception)]
mod pipeline;
mod step;
pub mod steps;
mod types;
mod workspace;

pub use errors::{PipelineError, PipelineResult, StepError, StepResult};
pub use pipeline::Pipeline;
pub use step::PipelineStep;
pub use types::{Context, JobState, StepOutcome};
pub use workspace::WorkingArea;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use uuid::Uuid;

use crate::config::Settings;
use crate::logging::{JobLogger, LogCallback, LogConfig};
use crate::media::runner::ToolRunner;
use crate::models::CompositionRequest;

use steps::{
    MixAudioStep, MuxStep, ProbeDurationStep, RenderCaptionsStep, TrimMusicStep, TrimVideoStep,
};

/// The standard composition pipeline, steps in dependency order.
pub fn create_composition_pipeline() -> Pipeline {
    Pipeline::new()
        .add_step(Box::new(ProbeDurationStep))
        .add_step(Box::new(TrimVideoStep))
        .add_step(Box::new(TrimMusicStep))
        .add_step(Box::new(MixAudioStep))
        .add_step(Box::new(RenderCaptionsStep))
        .add_step(Box::new(MuxStep))
}

/// Run one composition end to end.
///
/// Creates a working area under the configured temp root and a log file
/// under the configured logs folder, runs the standard pipeline, and
/// returns the delivered output path. The working area is removed on every
/// exit path; the log file stays.
pub fn compose(
    request: CompositionRequest,
    settings: &Settings,
    runner: Arc<dyn ToolRunner>,
    log_callback: Option<LogCallback>,
) -> PipelineResult<PathBuf> {
    let job_name = job_name_for(&request);

    let log_config = LogConfig::from_settings(&settings.logging);
    let logger = JobLogger::new(
        &job_name,
        &settings.paths.logs_folder,
        log_config,
        log_callback,
    )
    .map_err(|e| PipelineError::setup_failed(&job_name, format!("log file: {}", e)))?;
    let logger = Arc::new(logger);

    let work = WorkingArea::create_under(Path::new(&settings.paths.temp_root))
        .map_err(|e| PipelineError::setup_failed(&job_name, format!("working area: {}", e)))?;

    logger.info(&format!("Working area: {}", work.path().display()));

    let ctx = Context::new(request, job_name, work, logger.clone(), runner);
    let mut state = JobState::default();

    match create_composition_pipeline().run(&ctx, &mut state) {
        Ok(()) => Ok(ctx.request.output_path.clone()),
        Err(err) => {
            logger.error(&err.to_string());
            Err(err)
        }
    }
}

/// Composition name: output file stem plus a short unique suffix, so
/// repeated runs for the same output get distinct log files.
fn job_name_for(request: &CompositionRequest) -> String {
    let stem = request
        .output_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "composition".to_string());
    let id = Uuid::new_v4().simple().to_string();
    format!("{}_{}", stem, &id[..8])
}
