use super::server::ReceivedRequest;
use anyhow::{bail, Result};
use hit_core::{ErrorKind, StepError};

/// Declarative assertions on what a scenario did
pub enum Assertion {
    // Outcome
    Passed,
    Failed {
        kind: ErrorKind,
        call: String,
    },
    FailureContains(String),

    // Server side
    RequestCount(usize),
    ReceivedMethod(String),
    ReceivedPath(String),
    ReceivedHeader {
        name: String,
        value: String,
    },
    ReceivedBody(String),

    // Custom
    Custom(Box<dyn Fn(&[ReceivedRequest]) -> Result<()>>),
}

impl std::fmt::Debug for Assertion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Passed => write!(f, "Passed"),
            Self::Failed { kind, call } => write!(f, "Failed({kind:?}, {call})"),
            Self::FailureContains(text) => write!(f, "FailureContains({text:?})"),
            Self::RequestCount(n) => write!(f, "RequestCount({n})"),
            Self::ReceivedMethod(m) => write!(f, "ReceivedMethod({m})"),
            Self::ReceivedPath(p) => write!(f, "ReceivedPath({p})"),
            Self::ReceivedHeader { name, value } => write!(f, "ReceivedHeader({name}: {value})"),
            Self::ReceivedBody(b) => write!(f, "ReceivedBody({b:?})"),
            Self::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

impl Assertion {
    /// Check the assertion against the run outcome and the requests the
    /// server received
    pub fn check(
        &self,
        outcome: &std::result::Result<(), StepError>,
        received: &[ReceivedRequest],
    ) -> Result<()> {
        match self {
            Self::Passed => {
                if let Err(err) = outcome {
                    bail!("Expected the run to pass, but it failed:\n{err}");
                }
            }
            Self::Failed { kind, call } => match outcome {
                Ok(()) => bail!("Expected {call} to fail, but the run passed"),
                Err(err) => {
                    if err.kind() != *kind || err.call() != call {
                        bail!(
                            "Expected {kind:?} failure in {call}, got {:?} in {}:\n{err}",
                            err.kind(),
                            err.call()
                        );
                    }
                }
            },
            Self::FailureContains(text) => match outcome {
                Ok(()) => bail!("Expected a failure containing {text:?}, but the run passed"),
                Err(err) => {
                    let report = err.to_string();
                    if !report.contains(text.as_str()) {
                        bail!("Failure does not contain {text:?}:\n{report}");
                    }
                }
            },
            Self::RequestCount(count) => {
                if received.len() != *count {
                    bail!("Expected {count} request(s), server received {}", received.len());
                }
            }
            Self::ReceivedMethod(method) => {
                let request = last(received)?;
                if request.method != *method {
                    bail!("Expected method {method}, got {}", request.method);
                }
            }
            Self::ReceivedPath(path) => {
                let request = last(received)?;
                if request.path != *path {
                    bail!("Expected path {path}, got {}", request.path);
                }
            }
            Self::ReceivedHeader { name, value } => {
                let request = last(received)?;
                match request.header(name) {
                    Some(actual) if actual == value => {}
                    actual => bail!("Expected header {name}: {value}, got {actual:?}"),
                }
            }
            Self::ReceivedBody(body) => {
                let request = last(received)?;
                if request.body_string() != *body {
                    bail!("Expected body {body:?}, got {:?}", request.body_string());
                }
            }
            Self::Custom(f) => f(received)?,
        }
        Ok(())
    }
}

fn last(received: &[ReceivedRequest]) -> Result<&ReceivedRequest> {
    match received.last() {
        Some(request) => Ok(request),
        None => bail!("Server received no request"),
    }
}
