//! The step abstraction every pipeline stage implements.

use super::errors::StepResult;
use super::types::{Context, JobState, StepOutcome};

/// One stage of a composition pipeline.
///
/// The pipeline calls `validate_input` before `execute`, and
/// `validate_output` after a successful (non-skipped) execution. Any error
/// aborts the composition; steps never retry.
pub trait PipelineStep: Send + Sync {
    /// Human-readable step name, used in phase markers and error context.
    fn name(&self) -> &'static str;

    /// Check preconditions that do not depend on accumulated state.
    fn validate_input(&self, _ctx: &Context) -> StepResult<()> {
        Ok(())
    }

    /// Do the work, reading the request from `ctx` and recording produced
    /// artifacts in `state`.
    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<StepOutcome>;

    /// Check that the step's artifacts actually materialized.
    fn validate_output(&self, _ctx: &Context, _state: &JobState) -> StepResult<()> {
        Ok(())
    }
}
