//! Per-run diagnostic context.

use crate::error::{HitError, StepError};

/// Diagnostic state threaded through one run.
///
/// Holds the run description and the calls of the steps currently
/// executing, outermost first. A nested run pushes onto the same stack, so a
/// failure deep inside custom callbacks still reports how it was reached.
#[derive(Debug, Clone, Default)]
pub struct Trace {
    description: Option<String>,
    frames: Vec<String>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    pub(crate) fn enter(&mut self, call: &str) {
        self.frames.push(call.to_string());
    }

    pub(crate) fn leave(&mut self) {
        self.frames.pop();
    }

    /// Builds the run-aborting error for a step that failed with `source`.
    ///
    /// Must be called after the failing step has left the stack.
    pub(crate) fn failure(&self, call: &str, source: HitError) -> StepError {
        StepError::new(
            self.description.clone(),
            self.frames.clone(),
            call.to_string(),
            source,
        )
    }
}
