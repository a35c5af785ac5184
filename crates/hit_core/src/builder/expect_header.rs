//! Header assertions: `expect().header(name)` and `expect().headers()`.

use super::{values, Stage};
use crate::compare::{self, CompareError};
use crate::exchange::{canonical_header_name, Response};
use crate::step::{Phase, Step};
use crate::value::Value;

pub(super) const GET_AFTER_GET: &str = "get() can only be used if no header was already specified";
const ONE_OF_WITHOUT_HEADER: &str = "one_of() can only be used if a header was already specified";
const NOT_ONE_OF_WITHOUT_HEADER: &str =
    "not_one_of() can only be used if a header was already specified";
const HEADER_WITHOUT_CHAIN: &str = "unable to run expect().header(name) without a chain. Please use expect().header(name).something";
const HEADERS_WITHOUT_CHAIN: &str = "unable to run expect().headers() without a chain. Please use expect().headers().something";

/// What a header chain inspects.
#[derive(Debug, Clone)]
enum Scope {
    /// Every header, as a map keyed by canonical name.
    All,
    /// The value of one header, the empty string if it is missing.
    One(String),
}

impl Scope {
    fn value(&self, response: &Response) -> Value {
        match self {
            Scope::All => response.headers_value(),
            Scope::One(name) => response.header_value(name),
        }
    }

    /// Header names are looked up in canonical form.
    fn needle(&self, value: Value) -> Value {
        match (self, value) {
            (Scope::All, Value::String(name)) => Value::String(canonical_header_name(&name)),
            (_, value) => value,
        }
    }
}

/// The assertions shared by both header chains.
#[derive(Debug, Clone)]
struct HeaderAssertions {
    stage: Stage,
    scope: Scope,
}

impl HeaderAssertions {
    fn step<C>(self, name: &str, arguments: Vec<Value>, check: C) -> Step
    where
        C: Fn(&[Value], &Value) -> Result<(), CompareError> + 'static,
    {
        let scope = self.scope;
        self.stage
            .push(name, arguments.clone())
            .step(Phase::Expect, move |hit| {
                let actual = scope.value(hit.response()?);
                check(&arguments, &actual)?;
                Ok(())
            })
    }

    fn contains(self, value: Value) -> Step {
        let needle = self.scope.needle(value.clone());
        self.step("contains", vec![value], move |_, actual| {
            compare::check_contains(actual, &needle)
        })
    }

    fn not_contains(self, value: Value) -> Step {
        let needle = self.scope.needle(value.clone());
        self.step("not_contains", vec![value], move |_, actual| {
            compare::check_not_contains(actual, &needle)
        })
    }

    fn one_of(self, candidates: Vec<Value>) -> Step {
        if let Scope::All = self.scope {
            return self.stage.push("one_of", candidates).fail(Phase::Expect, ONE_OF_WITHOUT_HEADER);
        }
        self.step("one_of", candidates, compare::check_one_of)
    }

    fn not_one_of(self, candidates: Vec<Value>) -> Step {
        if let Scope::All = self.scope {
            return self
                .stage
                .push("not_one_of", candidates)
                .fail(Phase::Expect, NOT_ONE_OF_WITHOUT_HEADER);
        }
        self.step("not_one_of", candidates, compare::check_not_one_of)
    }

    fn empty(self) -> Step {
        self.step("empty", vec![], |_, actual| compare::empty(actual))
    }

    fn not_empty(self) -> Step {
        self.step("not_empty", vec![], |_, actual| compare::not_empty(actual))
    }

    fn len(self, size: usize) -> Step {
        self.step("len", vec![Value::from(size)], move |_, actual| {
            compare::len(actual, size)
        })
    }

    fn equal(self, value: Value) -> Step {
        self.step("equal", vec![value], |expected, actual| {
            compare::equal(&expected[0], actual)
        })
    }

    fn not_equal(self, value: Value) -> Step {
        self.step("not_equal", vec![value], |expected, actual| {
            compare::not_equal(&expected[0], actual)
        })
    }
}

/// Assertions on one response header, matched case-insensitively. Repeated
/// headers are joined with `", "`.
#[derive(Debug, Clone)]
pub struct ExpectHeader {
    inner: HeaderAssertions,
}

impl ExpectHeader {
    pub(crate) fn new(stage: Stage, name: String) -> Self {
        Self {
            inner: HeaderAssertions {
                stage,
                scope: Scope::One(name),
            },
        }
    }

    pub fn contains(self, value: impl Into<Value>) -> Step {
        self.inner.contains(value.into())
    }

    pub fn not_contains(self, value: impl Into<Value>) -> Step {
        self.inner.not_contains(value.into())
    }

    /// Expects the header value to be one of `candidates`.
    pub fn one_of<T: Into<Value>>(self, candidates: impl IntoIterator<Item = T>) -> Step {
        self.inner.one_of(values(candidates))
    }

    pub fn not_one_of<T: Into<Value>>(self, candidates: impl IntoIterator<Item = T>) -> Step {
        self.inner.not_one_of(values(candidates))
    }

    /// Expects the header to be missing or empty.
    pub fn empty(self) -> Step {
        self.inner.empty()
    }

    pub fn not_empty(self) -> Step {
        self.inner.not_empty()
    }

    /// Expects the header value to have `size` characters.
    pub fn len(self, size: usize) -> Step {
        self.inner.len(size)
    }

    pub fn equal(self, value: impl Into<Value>) -> Step {
        self.inner.equal(value.into())
    }

    pub fn not_equal(self, value: impl Into<Value>) -> Step {
        self.inner.not_equal(value.into())
    }
}

impl From<ExpectHeader> for Step {
    fn from(header: ExpectHeader) -> Self {
        header.inner.stage.fail(Phase::Expect, HEADER_WITHOUT_CHAIN)
    }
}

/// Assertions on all response headers, or on one after [`ExpectHeaders::get`].
///
/// Without a bound header, `contains` looks for a header name, `len` and
/// `empty` count headers and `equal` compares the whole map.
#[derive(Debug, Clone)]
pub struct ExpectHeaders {
    inner: HeaderAssertions,
}

impl ExpectHeaders {
    pub(crate) fn new(stage: Stage) -> Self {
        Self {
            inner: HeaderAssertions {
                stage,
                scope: Scope::All,
            },
        }
    }

    /// Binds the chain to one header.
    pub fn get(self, name: impl Into<String>) -> ExpectHeaders {
        let name = name.into();
        let stage = self.inner.stage.push("get", vec![Value::from(name.as_str())]);
        let (stage, scope) = match self.inner.scope {
            Scope::All => (stage, Scope::One(name)),
            bound @ Scope::One(_) => (stage.terminate(GET_AFTER_GET), bound),
        };
        ExpectHeaders {
            inner: HeaderAssertions { stage, scope },
        }
    }

    pub fn contains(self, value: impl Into<Value>) -> Step {
        self.inner.contains(value.into())
    }

    pub fn not_contains(self, value: impl Into<Value>) -> Step {
        self.inner.not_contains(value.into())
    }

    /// Expects the bound header's value to be one of `candidates`.
    ///
    /// Fails with a usage error unless a header was bound with `get`.
    pub fn one_of<T: Into<Value>>(self, candidates: impl IntoIterator<Item = T>) -> Step {
        self.inner.one_of(values(candidates))
    }

    pub fn not_one_of<T: Into<Value>>(self, candidates: impl IntoIterator<Item = T>) -> Step {
        self.inner.not_one_of(values(candidates))
    }

    pub fn empty(self) -> Step {
        self.inner.empty()
    }

    pub fn not_empty(self) -> Step {
        self.inner.not_empty()
    }

    pub fn len(self, size: usize) -> Step {
        self.inner.len(size)
    }

    pub fn equal(self, value: impl Into<Value>) -> Step {
        self.inner.equal(value.into())
    }

    pub fn not_equal(self, value: impl Into<Value>) -> Step {
        self.inner.not_equal(value.into())
    }
}

impl From<ExpectHeaders> for Step {
    fn from(headers: ExpectHeaders) -> Self {
        headers.inner.stage.fail(Phase::Expect, HEADERS_WITHOUT_CHAIN)
    }
}
