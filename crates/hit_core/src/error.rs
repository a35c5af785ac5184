//! Error types for hit_core operations.

use crate::compare::CompareError;
use crate::convert::ConvertError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single step.
#[derive(Error, Debug)]
pub enum HitError {
    /// The steps were declared in a way the builder does not support.
    #[error("{0}")]
    Usage(String),

    /// A comparison did not hold.
    #[error(transparent)]
    Assertion(CompareError),

    /// Expected and actual values could not be reconciled.
    #[error(transparent)]
    Conversion(ConvertError),

    /// The request could not be exchanged.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A body was expected to be JSON but was not.
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    /// Error raised by a custom callback.
    #[error("{0}")]
    Custom(String),

    /// A nested run started from inside a step failed.
    #[error(transparent)]
    Nested(Box<StepError>),
}

impl HitError {
    /// Creates a usage error.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }

    /// Creates an error for custom callbacks.
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }

    /// Classifies the error. Nested failures report the kind of their cause.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Usage(_) => ErrorKind::Usage,
            Self::Assertion(_) => ErrorKind::Assertion,
            Self::Conversion(_) | Self::Json(_) => ErrorKind::Conversion,
            Self::Transport(_) => ErrorKind::Transport,
            Self::Custom(_) => ErrorKind::Custom,
            Self::Nested(inner) => inner.kind(),
        }
    }
}

impl From<CompareError> for HitError {
    fn from(err: CompareError) -> Self {
        match err {
            CompareError::Conversion(err) => Self::Conversion(err),
            other => Self::Assertion(other),
        }
    }
}

impl From<ConvertError> for HitError {
    fn from(err: ConvertError) -> Self {
        Self::Conversion(err)
    }
}

impl From<StepError> for HitError {
    fn from(err: StepError) -> Self {
        Self::Nested(Box::new(err))
    }
}

/// Broad classes of step failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Usage,
    Assertion,
    Conversion,
    Transport,
    Custom,
}

/// The failure that aborted a run.
///
/// Carries the run description, the calls of the steps that were executing
/// when a nested run failed, the failing step's call chain and the cause.
#[derive(Debug)]
pub struct StepError {
    description: Option<String>,
    trace: Vec<String>,
    call: String,
    source: HitError,
}

impl StepError {
    pub(crate) fn new(
        description: Option<String>,
        trace: Vec<String>,
        call: String,
        source: HitError,
    ) -> Self {
        Self {
            description,
            trace,
            call,
            source,
        }
    }

    /// Description set with the `description` step, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Calls of the enclosing steps, outermost first.
    pub fn trace(&self) -> &[String] {
        &self.trace
    }

    /// Call chain of the failing step.
    pub fn call(&self) -> &str {
        &self.call
    }

    /// The underlying failure.
    pub fn error(&self) -> &HitError {
        &self.source
    }

    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(description) = &self.description {
            writeln!(f, "{description}")?;
        }
        for frame in &self.trace {
            writeln!(f, "in {frame}")?;
        }
        writeln!(f, "{}", self.call)?;
        write!(f, "{}", self.source)
    }
}

impl std::error::Error for StepError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Errors raised while exchanging a request.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("invalid url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid header {name}: {reason}")]
    InvalidHeader { name: String, reason: String },

    /// The HTTP client could not be constructed.
    #[error("failed to build http client: {0}")]
    Client(String),

    /// Connection-level failure.
    #[error("request failed: {0}")]
    Request(String),

    #[error("failed to read response: {0}")]
    Body(String),
}

/// Errors raised while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write config {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Convenience Result type for step callbacks.
pub type Result<T> = std::result::Result<T, HitError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    #[test]
    fn test_conversion_errors_are_not_assertions() {
        let err = HitError::from(CompareError::Conversion(
            crate::convert::convert(&Value::from("x"), &Value::from(1)).unwrap_err(),
        ));
        assert_eq!(err.kind(), ErrorKind::Conversion);

        let err = HitError::from(CompareError::Equal {
            value: Value::from(1),
        });
        assert_eq!(err.kind(), ErrorKind::Assertion);
    }

    #[test]
    fn test_step_error_display() {
        let err = StepError::new(
            Some("login works".into()),
            vec![],
            "expect().status(200)".into(),
            HitError::usage("boom"),
        );
        assert_eq!(err.to_string(), "login works\nexpect().status(200)\nboom");
        assert_eq!(err.kind(), ErrorKind::Usage);
    }

    #[test]
    fn test_step_error_display_lists_enclosing_steps() {
        let err = StepError::new(
            Some("nested".into()),
            vec!["send().custom()".into(), "expect().custom()".into()],
            r#"expect().body().equal("x")"#.into(),
            HitError::usage("boom"),
        );
        assert_eq!(
            err.to_string(),
            "nested\nin send().custom()\nin expect().custom()\nexpect().body().equal(\"x\")\nboom"
        );
    }

    #[test]
    fn test_nested_kind_is_inner_kind() {
        let inner = StepError::new(None, vec![], "send()".into(), HitError::usage("bad"));
        let outer = HitError::from(inner);
        assert_eq!(outer.kind(), ErrorKind::Usage);
        assert!(outer.to_string().contains("bad"));
    }
}
