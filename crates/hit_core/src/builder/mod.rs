//! Fluent chains that declare steps.
//!
//! Every chain method pushes a segment named after itself onto the chain's
//! [`Path`], so the steps a chain produces can later be addressed by the
//! mirrored `clear()` chain.

mod clear;
mod expect;
mod expect_header;
mod request;
mod send;

pub use clear::{
    clear, ClearChain, ClearExpect, ClearExpectBody, ClearExpectBodyJson, ClearExpectHeader,
    ClearExpectHeaders, ClearExpectStatus, ClearSend, ClearSendBody,
};
pub use expect::{expect, expect_value, ExpectBody, ExpectBodyJson, ExpectChain, ExpectStatus};
pub use expect_header::{ExpectHeader, ExpectHeaders};
pub use request::{
    base_url, cleanup, delete, description, get, head, method, options, patch, post, put,
    transport,
};
pub use send::{send, send_value, SendBody, SendChain};

use crate::error::HitError;
use crate::hit::Hit;
use crate::path::Path;
use crate::step::{Phase, Step};
use crate::value::Value;

/// A chain stage: either still able to produce steps, or terminal.
///
/// A terminal stage was reached through a call that already consumed a
/// value where the chain expected none. Everything derived from it yields
/// the same failing step.
#[derive(Debug, Clone)]
pub(crate) enum Stage {
    Active(Path),
    Terminal { path: Path, message: &'static str },
}

impl Stage {
    pub(crate) fn root(name: &str, arguments: Vec<Value>) -> Self {
        Stage::Active(Path::new().push(name, arguments))
    }

    /// Extends the path, keeping the stage terminal if it was.
    pub(crate) fn push(&self, name: &str, arguments: Vec<Value>) -> Self {
        match self {
            Stage::Active(path) => Stage::Active(path.push(name, arguments)),
            Stage::Terminal { path, message } => Stage::Terminal {
                path: path.push(name, arguments),
                message: *message,
            },
        }
    }

    /// Makes the stage terminal unless an earlier stage already was.
    pub(crate) fn terminate(self, message: &'static str) -> Self {
        match self {
            Stage::Active(path) => Stage::Terminal { path, message },
            terminal => terminal,
        }
    }

    /// Builds a step running `f`, or the failing step of a terminal stage.
    pub(crate) fn step<F>(&self, phase: Phase, f: F) -> Step
    where
        F: Fn(&mut Hit) -> Result<(), HitError> + 'static,
    {
        match self {
            Stage::Active(path) => Step::new(phase, Some(path.clone()), f),
            Stage::Terminal { path, message } => Step::usage_error(phase, path.clone(), *message),
        }
    }

    /// Builds a failing step, preferring the terminal message if any.
    pub(crate) fn fail(&self, phase: Phase, message: &'static str) -> Step {
        match self {
            Stage::Active(path) => Step::usage_error(phase, path.clone(), message),
            Stage::Terminal { path, message } => Step::usage_error(phase, path.clone(), *message),
        }
    }

    /// Builds a clear step for this stage's path.
    pub(crate) fn clear_step(&self) -> Step {
        match self {
            Stage::Active(path) => Step::clear(path.clone()),
            Stage::Terminal { path, message } => {
                Step::usage_error(Phase::Clean, path.clone(), *message)
            }
        }
    }
}

/// Collects values passed to a variadic assertion such as `one_of`.
pub(crate) fn values<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Vec<Value> {
    items.into_iter().map(Into::into).collect()
}
