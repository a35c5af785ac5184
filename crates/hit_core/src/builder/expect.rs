//! `expect()` chains: assertions on the response.

use super::expect_header::{ExpectHeader, ExpectHeaders};
use super::{values, Stage};
use crate::compare::{self, CompareError};
use crate::error::HitError;
use crate::exchange::Response;
use crate::hit::Hit;
use crate::step::{Phase, Step};
use crate::value::Value;

const EXPECT_VALUE: &str = "only usable with expect() not with expect_value(value)";
const EXPECT_BODY_VALUE: &str = "only usable with expect().body() not with expect().body_value(value)";
const EXPECT_BODY_JSON_VALUE: &str =
    "only usable with expect().body().json() not with expect().body().json_value(value)";
const EXPECT_STATUS_VALUE: &str =
    "only usable with expect().status() not with expect().status_value(value)";
const EXPECT_WITHOUT_ARGUMENT: &str = "unable to run expect() without an argument or without a chain. Please use expect_value(something) or expect().something";
const EXPECT_BODY_WITHOUT_ARGUMENT: &str = "unable to run expect().body() without an argument or without a chain. Please use expect().body_value(something) or expect().body().something";
const EXPECT_BODY_JSON_WITHOUT_ARGUMENT: &str = "unable to run expect().body().json() without an argument or without a chain. Please use expect().body().json_value(something) or expect().body().json().something";
const EXPECT_STATUS_WITHOUT_ARGUMENT: &str = "unable to run expect().status() without an argument or without a chain. Please use expect().status_value(something) or expect().status().something";

type Check = fn(&Value, &Value) -> Result<(), CompareError>;

/// Starts a chain of response assertions.
///
/// # Examples
///
/// ```
/// use hit_core::{expect, Step};
///
/// let step = expect().header("Content-Type").contains("json");
/// assert_eq!(step.call(), r#"expect().header("Content-Type").contains("json")"#);
/// ```
pub fn expect() -> ExpectChain {
    ExpectChain {
        stage: Stage::root("expect", vec![]),
        value: None,
    }
}

/// Expects the body to equal `value`. Composite values are compared against
/// the body decoded as JSON, scalars against the body text.
pub fn expect_value(value: impl Into<Value>) -> ExpectChain {
    let value = value.into();
    ExpectChain {
        stage: Stage::root("expect", vec![value.clone()]),
        value: Some(value),
    }
}

/// The body as the comparison operand for `expected`.
fn body_for(expected: &Value, response: &Response) -> Result<Value, HitError> {
    if expected.kind().is_composite() {
        Ok(response.body_json()?)
    } else {
        Ok(Value::String(response.body_string()))
    }
}

fn body_equal_step(stage: Stage, expected: Value) -> Step {
    stage.step(Phase::Expect, move |hit| {
        let actual = body_for(&expected, hit.response()?)?;
        compare::equal(&expected, &actual)?;
        Ok(())
    })
}

#[derive(Debug, Clone)]
pub struct ExpectChain {
    stage: Stage,
    value: Option<Value>,
}

impl ExpectChain {
    fn chained(self) -> Stage {
        match self.value {
            Some(_) => self.stage.terminate(EXPECT_VALUE),
            None => self.stage,
        }
    }

    /// Continues with the response body.
    pub fn body(self) -> ExpectBody {
        ExpectBody {
            stage: self.chained().push("body", vec![]),
            value: None,
        }
    }

    /// Expects the body to equal `value`, like [`expect_value`].
    pub fn body_value(self, value: impl Into<Value>) -> ExpectBody {
        let value = value.into();
        ExpectBody {
            stage: self.chained().push("body", vec![value.clone()]),
            value: Some(value),
        }
    }

    /// Expects the body to equal `value`.
    pub fn interface(self, value: impl Into<Value>) -> Step {
        let value = value.into();
        body_equal_step(self.chained().push("interface", vec![value.clone()]), value)
    }

    /// Continues with one response header.
    pub fn header(self, name: impl Into<String>) -> ExpectHeader {
        let name = name.into();
        let stage = self.chained().push("header", vec![Value::from(name.as_str())]);
        ExpectHeader::new(stage, name)
    }

    /// Continues with all response headers.
    pub fn headers(self) -> ExpectHeaders {
        ExpectHeaders::new(self.chained().push("headers", vec![]))
    }

    /// Continues with the status code.
    pub fn status(self) -> ExpectStatus {
        ExpectStatus {
            stage: self.chained().push("status", vec![]),
            value: None,
        }
    }

    /// Expects the status code to equal `code`.
    pub fn status_value(self, code: impl Into<Value>) -> ExpectStatus {
        let code = code.into();
        ExpectStatus {
            stage: self.chained().push("status", vec![code.clone()]),
            value: Some(code),
        }
    }

    /// Runs `f` in the expect phase.
    pub fn custom<F>(self, f: F) -> Step
    where
        F: Fn(&mut Hit) -> Result<(), HitError> + 'static,
    {
        self.chained().push("custom", vec![]).step(Phase::Expect, f)
    }
}

impl From<ExpectChain> for Step {
    fn from(chain: ExpectChain) -> Self {
        match chain.value {
            Some(value) => body_equal_step(chain.stage, value),
            None => chain.stage.fail(Phase::Expect, EXPECT_WITHOUT_ARGUMENT),
        }
    }
}

/// Assertions on the response body.
#[derive(Debug, Clone)]
pub struct ExpectBody {
    stage: Stage,
    value: Option<Value>,
}

impl ExpectBody {
    fn chained(self) -> Stage {
        match self.value {
            Some(_) => self.stage.terminate(EXPECT_BODY_VALUE),
            None => self.stage,
        }
    }

    pub fn equal(self, value: impl Into<Value>) -> Step {
        let value = value.into();
        body_equal_step(self.chained().push("equal", vec![value.clone()]), value)
    }

    pub fn not_equal(self, value: impl Into<Value>) -> Step {
        let expected = value.into();
        self.chained()
            .push("not_equal", vec![expected.clone()])
            .step(Phase::Expect, move |hit| {
                let actual = body_for(&expected, hit.response()?)?;
                compare::not_equal(&expected, &actual)?;
                Ok(())
            })
    }

    /// Expects the body text to contain `value`.
    pub fn contains(self, value: impl Into<Value>) -> Step {
        self.text_step("contains", value.into(), |needle, body| {
            compare::check_contains(body, needle)
        })
    }

    pub fn not_contains(self, value: impl Into<Value>) -> Step {
        self.text_step("not_contains", value.into(), |needle, body| {
            compare::check_not_contains(body, needle)
        })
    }

    /// Continues with the body decoded as JSON.
    pub fn json(self) -> ExpectBodyJson {
        ExpectBodyJson {
            stage: self.chained().push("json", vec![]),
            value: None,
        }
    }

    /// Expects the body decoded as JSON to equal `value`.
    pub fn json_value(self, value: impl Into<Value>) -> ExpectBodyJson {
        let value = value.into();
        ExpectBodyJson {
            stage: self.chained().push("json", vec![value.clone()]),
            value: Some(value),
        }
    }

    fn text_step(self, name: &str, expected: Value, check: Check) -> Step {
        self.chained()
            .push(name, vec![expected.clone()])
            .step(Phase::Expect, move |hit| {
                let body = Value::String(hit.response()?.body_string());
                check(&expected, &body)?;
                Ok(())
            })
    }
}

impl From<ExpectBody> for Step {
    fn from(body: ExpectBody) -> Self {
        match body.value {
            Some(value) => body_equal_step(body.stage, value),
            None => body.stage.fail(Phase::Expect, EXPECT_BODY_WITHOUT_ARGUMENT),
        }
    }
}

/// Assertions on the body decoded as JSON.
///
/// Values are addressed with dotted expressions (`"user.tags.0"`); the empty
/// expression addresses the whole document and a missing one is `null`.
#[derive(Debug, Clone)]
pub struct ExpectBodyJson {
    stage: Stage,
    value: Option<Value>,
}

impl ExpectBodyJson {
    fn chained(self) -> Stage {
        match self.value {
            Some(_) => self.stage.terminate(EXPECT_BODY_JSON_VALUE),
            None => self.stage,
        }
    }

    pub fn equal(self, expression: &str, value: impl Into<Value>) -> Step {
        self.lookup_step("equal", expression, value.into(), |expected, actual| {
            compare::equal(expected, actual)
        })
    }

    pub fn not_equal(self, expression: &str, value: impl Into<Value>) -> Step {
        self.lookup_step("not_equal", expression, value.into(), |expected, actual| {
            compare::not_equal(expected, actual)
        })
    }

    /// Expects the addressed value to contain `value`.
    pub fn contains(self, expression: &str, value: impl Into<Value>) -> Step {
        self.lookup_step("contains", expression, value.into(), |needle, haystack| {
            compare::check_contains(haystack, needle)
        })
    }

    pub fn not_contains(self, expression: &str, value: impl Into<Value>) -> Step {
        self.lookup_step("not_contains", expression, value.into(), |needle, haystack| {
            compare::check_not_contains(haystack, needle)
        })
    }

    fn lookup_step(self, name: &str, expression: &str, expected: Value, check: Check) -> Step {
        let expression = expression.to_string();
        self.chained()
            .push(name, vec![Value::from(expression.as_str()), expected.clone()])
            .step(Phase::Expect, move |hit| {
                let document = hit.response()?.body_json()?;
                let actual = document.lookup(&expression).cloned().unwrap_or(Value::Null);
                check(&expected, &actual)?;
                Ok(())
            })
    }
}

impl From<ExpectBodyJson> for Step {
    fn from(json: ExpectBodyJson) -> Self {
        match json.value {
            Some(expected) => json.stage.step(Phase::Expect, move |hit| {
                let actual = hit.response()?.body_json()?;
                compare::equal(&expected, &actual)?;
                Ok(())
            }),
            None => json.stage.fail(Phase::Expect, EXPECT_BODY_JSON_WITHOUT_ARGUMENT),
        }
    }
}

/// Assertions on the status code.
#[derive(Debug, Clone)]
pub struct ExpectStatus {
    stage: Stage,
    value: Option<Value>,
}

impl ExpectStatus {
    fn chained(self) -> Stage {
        match self.value {
            Some(_) => self.stage.terminate(EXPECT_STATUS_VALUE),
            None => self.stage,
        }
    }

    pub fn equal(self, code: impl Into<Value>) -> Step {
        self.status_step("equal", vec![code.into()], |expected, status| {
            compare::equal(&expected[0], status)
        })
    }

    pub fn not_equal(self, code: impl Into<Value>) -> Step {
        self.status_step("not_equal", vec![code.into()], |expected, status| {
            compare::not_equal(&expected[0], status)
        })
    }

    /// Expects the status code to be one of `codes`.
    pub fn one_of<T: Into<Value>>(self, codes: impl IntoIterator<Item = T>) -> Step {
        self.status_step("one_of", values(codes), compare::check_one_of)
    }

    pub fn not_one_of<T: Into<Value>>(self, codes: impl IntoIterator<Item = T>) -> Step {
        self.status_step("not_one_of", values(codes), compare::check_not_one_of)
    }

    fn status_step(
        self,
        name: &str,
        expected: Vec<Value>,
        check: fn(&[Value], &Value) -> Result<(), CompareError>,
    ) -> Step {
        self.chained()
            .push(name, expected.clone())
            .step(Phase::Expect, move |hit| {
                let status = Value::from(hit.response()?.status());
                check(&expected, &status)?;
                Ok(())
            })
    }
}

impl From<ExpectStatus> for Step {
    fn from(status: ExpectStatus) -> Self {
        match status.value {
            Some(expected) => status.stage.step(Phase::Expect, move |hit| {
                let actual = Value::from(hit.response()?.status());
                compare::equal(&expected, &actual)?;
                Ok(())
            }),
            None => status.stage.fail(Phase::Expect, EXPECT_STATUS_WITHOUT_ARGUMENT),
        }
    }
}
