//! Ordering, clear resolution and execution of a run's steps.

use crate::error::{HitError, StepError};
use crate::hit::Hit;
use crate::step::{Phase, Step};
use tracing::{debug, trace};

/// The ordered steps of one run.
///
/// A pipeline is consumed by [`Pipeline::run`]:
///
/// 1. the first usage error fails the run before anything executes;
/// 2. clear steps run in declaration order, each removing the matching
///    steps declared before it;
/// 3. clear steps are discarded and the rest is stably sorted by phase;
/// 4. steps execute in order and the first failure aborts the run.
#[derive(Debug, Default)]
pub struct Pipeline {
    steps: Vec<Step>,
}

impl Pipeline {
    /// Creates a pipeline without an exchange step, as used by nested runs.
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// Creates a top-level pipeline: `steps` followed by the exchange.
    pub fn with_exchange(mut steps: Vec<Step>) -> Self {
        steps.push(Step::new(Phase::Exchange, None, |hit: &mut Hit| hit.exchange()));
        Self { steps }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Applies usage checks and clear steps, returning the steps to execute
    /// in execution order.
    ///
    /// # Errors
    ///
    /// Returns the first step carrying a usage error together with it.
    pub fn resolve(self) -> Result<Vec<Step>, (Step, HitError)> {
        let usage_error = self
            .steps
            .iter()
            .find_map(|step| step.usage_message().map(|message| (step, message)));
        if let Some((step, message)) = usage_error {
            return Err((step.clone(), HitError::usage(message)));
        }

        let mut remaining: Vec<Step> = Vec::with_capacity(self.steps.len());
        for step in self.steps {
            let Some(pattern) = step.clear_pattern().cloned() else {
                remaining.push(step);
                continue;
            };
            let before = remaining.len();
            remaining.retain(|earlier| !earlier.path().is_some_and(|path| pattern.clears(path)));
            debug!(
                clear = step.call(),
                removed = before - remaining.len(),
                "resolved clear step"
            );
        }

        remaining.sort_by_key(Step::phase);
        Ok(remaining)
    }

    /// Executes the pipeline against `hit`.
    pub fn run(self, hit: &mut Hit) -> Result<(), StepError> {
        let steps = self
            .resolve()
            .map_err(|(step, err)| hit.trace().failure(step.call(), err))?;

        for step in &steps {
            trace!(phase = %step.phase(), call = step.call(), "executing step");
            hit.trace_mut().enter(step.call());
            let result = step.execute(hit);
            hit.trace_mut().leave();

            match result {
                Ok(()) => {}
                Err(HitError::Nested(inner)) => return Err(*inner),
                Err(err) => {
                    debug!(call = step.call(), error = %err, "step failed");
                    return Err(hit.trace().failure(step.call(), err));
                }
            }
        }
        Ok(())
    }
}
