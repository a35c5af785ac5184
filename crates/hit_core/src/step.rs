//! Schedulable units of work.

use crate::error::HitError;
use crate::hit::Hit;
use crate::path::Path;
use std::fmt;
use std::rc::Rc;

/// Execution phase of a step. Steps run in phase order, declaration order
/// breaking ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    /// Clear steps. Resolved before anything executes.
    Clean,
    /// Method, url and run options.
    Setup,
    /// Request construction.
    Send,
    /// The transport call.
    Exchange,
    /// Response assertions.
    Expect,
    /// Callbacks after all assertions passed.
    Cleanup,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Phase::Clean => "clean",
            Phase::Setup => "setup",
            Phase::Send => "send",
            Phase::Exchange => "exchange",
            Phase::Expect => "expect",
            Phase::Cleanup => "cleanup",
        };
        f.write_str(label)
    }
}

/// Callback executed by a step against the run context.
pub type Callback = Rc<dyn Fn(&mut Hit) -> Result<(), HitError>>;

#[derive(Clone)]
pub(crate) enum Action {
    Run(Callback),
    /// Removes earlier steps whose path matches the pattern.
    Clear(Path),
    /// Declaration-time usage error.
    Fail(String),
}

/// One unit of work in a run.
///
/// Steps are produced by the builder chains; [`Step::new`] builds custom
/// ones.
#[derive(Clone)]
pub struct Step {
    phase: Phase,
    path: Option<Path>,
    call: String,
    action: Action,
}

impl Step {
    /// Creates a step running `f` in `phase`.
    ///
    /// Steps without a path can never be removed by a clear step.
    pub fn new<F>(phase: Phase, path: Option<Path>, f: F) -> Self
    where
        F: Fn(&mut Hit) -> Result<(), HitError> + 'static,
    {
        let call = match &path {
            Some(path) => path.to_string(),
            None => format!("{phase}()"),
        };
        Self {
            phase,
            path,
            call,
            action: Action::Run(Rc::new(f)),
        }
    }

    /// Creates a clear step from a full `clear()...` chain path.
    ///
    /// The leading `clear()` segment is dropped to form the pattern.
    pub(crate) fn clear(path: Path) -> Self {
        Self {
            phase: Phase::Clean,
            call: path.to_string(),
            action: Action::Clear(path.skip(1)),
            path: Some(path),
        }
    }

    /// Creates a step that fails the run with a usage error.
    pub(crate) fn usage_error(phase: Phase, path: Path, message: impl Into<String>) -> Self {
        Self {
            phase,
            call: path.to_string(),
            path: Some(path),
            action: Action::Fail(message.into()),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Path of the builder calls that produced the step.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }

    /// Rendering of the step used in diagnostics.
    pub fn call(&self) -> &str {
        &self.call
    }

    pub fn is_clear(&self) -> bool {
        matches!(self.action, Action::Clear(_))
    }

    /// Pattern of a clear step.
    pub fn clear_pattern(&self) -> Option<&Path> {
        match &self.action {
            Action::Clear(pattern) => Some(pattern),
            _ => None,
        }
    }

    /// Message of a step that can only fail.
    pub fn usage_message(&self) -> Option<&str> {
        match &self.action {
            Action::Fail(message) => Some(message),
            _ => None,
        }
    }

    pub(crate) fn execute(&self, hit: &mut Hit) -> Result<(), HitError> {
        match &self.action {
            Action::Run(f) => f(hit),
            Action::Fail(message) => Err(HitError::usage(message.clone())),
            Action::Clear(_) => Ok(()),
        }
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match &self.action {
            Action::Run(_) => "run",
            Action::Clear(_) => "clear",
            Action::Fail(_) => "fail",
        };
        f.debug_struct("Step")
            .field("phase", &self.phase)
            .field("call", &self.call)
            .field("action", &action)
            .finish()
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.call)
    }
}
