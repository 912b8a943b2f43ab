//! Sequential step runner.

use super::errors::{PipelineError, PipelineResult};
use super::step::PipelineStep;
use super::types::{Context, JobState, StepOutcome};

/// Ordered sequence of steps run against one context and state.
pub struct Pipeline {
    steps: Vec<Box<dyn PipelineStep>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn add_step(mut self, step: Box<dyn PipelineStep>) -> Self {
        self.steps.push(step);
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every step in order. The first failure aborts the run; skipped
    /// steps are logged and do not go through output validation.
    pub fn run(&self, ctx: &Context, state: &mut JobState) -> PipelineResult<()> {
        let total = self.steps.len();

        for (index, step) in self.steps.iter().enumerate() {
            if ctx.is_cancelled() {
                return Err(PipelineError::cancelled(&ctx.job_name));
            }

            let name = step.name();
            ctx.logger.phase(name);

            step.validate_input(ctx)
                .map_err(|e| PipelineError::step_failed(&ctx.job_name, name, e))?;

            let outcome = step
                .execute(ctx, state)
                .map_err(|e| PipelineError::step_failed(&ctx.job_name, name, e))?;

            match outcome {
                StepOutcome::Skipped(reason) => {
                    ctx.logger.info(&format!("Skipped: {}", reason));
                }
                StepOutcome::Success => {
                    step.validate_output(ctx, state)
                        .map_err(|e| PipelineError::step_failed(&ctx.job_name, name, e))?;
                }
            }

            let percent = ((index + 1) * 100 / total.max(1)) as u32;
            ctx.logger.progress(percent);
        }

        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
