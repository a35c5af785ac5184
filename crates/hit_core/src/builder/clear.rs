//! `clear()` chains: steps that remove earlier steps.
//!
//! A clear chain mirrors the chain it removes. `clear().send().body()`
//! removes every earlier step built through `send().body()`, whatever
//! arguments it received. Arguments narrow the match:
//! `clear().expect().body().json().equal("Name")` only removes
//! `expect().body().json().equal("Name", ..)` steps.
//!
//! Calls that take a value where a chain continues (`send_value`,
//! `body_value`, `json_value`, ...) cannot address removable steps; in a
//! clear chain they fail the run with a usage error.

use super::expect_header::GET_AFTER_GET;
use super::Stage;
use crate::path::IntoArgs;
use crate::step::{Phase, Step};
use crate::value::Value;

const CLEAR_WITHOUT_CHAIN: &str =
    "unable to run clear() without a chain. Please use clear().something";
const CLEAR_SEND_VALUE: &str = "only usable with clear().send() not with clear().send_value(value)";
const CLEAR_SEND_BODY_VALUE: &str =
    "only usable with clear().send().body() not with clear().send().body_value(value)";
const CLEAR_EXPECT_VALUE: &str =
    "only usable with clear().expect() not with clear().expect_value(value)";
const CLEAR_EXPECT_BODY_VALUE: &str =
    "only usable with clear().expect().body() not with clear().expect().body_value(value)";
const CLEAR_EXPECT_BODY_JSON_VALUE: &str = "only usable with clear().expect().body().json() not with clear().expect().body().json_value(value)";
const CLEAR_EXPECT_STATUS_VALUE: &str =
    "only usable with clear().expect().status() not with clear().expect().status_value(value)";

/// Starts a chain that removes earlier steps.
///
/// # Examples
///
/// ```
/// use hit_core::{clear, do_steps, expect, post, send, steps, transport, Request, Response, TransportError};
///
/// let echo = |request: &Request| -> Result<Response, TransportError> {
///     Ok(Response::new(200, vec![], request.body().to_vec()))
/// };
/// let result = do_steps(steps![
///     post("http://service.test/echo"),
///     transport(echo),
///     send().body_value("Hello Earth"),
///     clear().send().body(),
///     send().body_value("Hello World"),
///     expect().body().equal("Hello World"),
/// ]);
/// assert!(result.is_ok());
/// ```
pub fn clear() -> ClearChain {
    ClearChain {
        stage: Stage::root("clear", vec![]),
    }
}

fn clear_leaf(stage: &Stage, name: &str, arguments: impl IntoArgs) -> Step {
    stage.push(name, arguments.into_args()).clear_step()
}

#[derive(Debug, Clone)]
pub struct ClearChain {
    stage: Stage,
}

impl ClearChain {
    /// Addresses `send()` steps.
    pub fn send(self) -> ClearSend {
        ClearSend {
            stage: self.stage.push("send", vec![]),
        }
    }

    /// Always a usage error.
    pub fn send_value(self, value: impl Into<Value>) -> ClearSend {
        ClearSend {
            stage: self
                .stage
                .push("send", vec![value.into()])
                .terminate(CLEAR_SEND_VALUE),
        }
    }

    /// Addresses `expect()` steps.
    pub fn expect(self) -> ClearExpect {
        ClearExpect {
            stage: self.stage.push("expect", vec![]),
        }
    }

    /// Always a usage error.
    pub fn expect_value(self, value: impl Into<Value>) -> ClearExpect {
        ClearExpect {
            stage: self
                .stage
                .push("expect", vec![value.into()])
                .terminate(CLEAR_EXPECT_VALUE),
        }
    }
}

impl From<ClearChain> for Step {
    fn from(chain: ClearChain) -> Self {
        chain.stage.fail(Phase::Clean, CLEAR_WITHOUT_CHAIN)
    }
}

/// Removes `send()` steps. Used as a step, removes all of them.
#[derive(Debug, Clone)]
pub struct ClearSend {
    stage: Stage,
}

impl ClearSend {
    pub fn body(self) -> ClearSendBody {
        ClearSendBody {
            stage: self.stage.push("body", vec![]),
        }
    }

    /// Always a usage error.
    pub fn body_value(self, value: impl Into<Value>) -> ClearSendBody {
        ClearSendBody {
            stage: self
                .stage
                .push("body", vec![value.into()])
                .terminate(CLEAR_SEND_BODY_VALUE),
        }
    }

    pub fn interface(self, arguments: impl IntoArgs) -> Step {
        clear_leaf(&self.stage, "interface", arguments)
    }

    pub fn json(self, arguments: impl IntoArgs) -> Step {
        clear_leaf(&self.stage, "json", arguments)
    }

    /// `header("Content-Type")` removes every `send().header("Content-Type", ..)`.
    pub fn header(self, arguments: impl IntoArgs) -> Step {
        clear_leaf(&self.stage, "header", arguments)
    }

    pub fn custom(self) -> Step {
        clear_leaf(&self.stage, "custom", ())
    }
}

impl From<ClearSend> for Step {
    fn from(chain: ClearSend) -> Self {
        chain.stage.clear_step()
    }
}

#[derive(Debug, Clone)]
pub struct ClearSendBody {
    stage: Stage,
}

impl ClearSendBody {
    pub fn json(self, arguments: impl IntoArgs) -> Step {
        clear_leaf(&self.stage, "json", arguments)
    }

    pub fn interface(self, arguments: impl IntoArgs) -> Step {
        clear_leaf(&self.stage, "interface", arguments)
    }
}

impl From<ClearSendBody> for Step {
    fn from(chain: ClearSendBody) -> Self {
        chain.stage.clear_step()
    }
}

/// Removes `expect()` steps. Used as a step, removes all of them.
#[derive(Debug, Clone)]
pub struct ClearExpect {
    stage: Stage,
}

impl ClearExpect {
    pub fn body(self) -> ClearExpectBody {
        ClearExpectBody {
            stage: self.stage.push("body", vec![]),
        }
    }

    /// Always a usage error.
    pub fn body_value(self, value: impl Into<Value>) -> ClearExpectBody {
        ClearExpectBody {
            stage: self
                .stage
                .push("body", vec![value.into()])
                .terminate(CLEAR_EXPECT_BODY_VALUE),
        }
    }

    pub fn interface(self, arguments: impl IntoArgs) -> Step {
        clear_leaf(&self.stage, "interface", arguments)
    }

    /// `header(())` addresses every header chain, `header("X")` only the
    /// chains of header `X`.
    pub fn header(self, arguments: impl IntoArgs) -> ClearExpectHeader {
        ClearExpectHeader {
            stage: self.stage.push("header", arguments.into_args()),
        }
    }

    pub fn headers(self) -> ClearExpectHeaders {
        ClearExpectHeaders {
            stage: self.stage.push("headers", vec![]),
            bound: false,
        }
    }

    pub fn status(self) -> ClearExpectStatus {
        ClearExpectStatus {
            stage: self.stage.push("status", vec![]),
        }
    }

    /// Always a usage error.
    pub fn status_value(self, code: impl Into<Value>) -> ClearExpectStatus {
        ClearExpectStatus {
            stage: self
                .stage
                .push("status", vec![code.into()])
                .terminate(CLEAR_EXPECT_STATUS_VALUE),
        }
    }

    pub fn custom(self) -> Step {
        clear_leaf(&self.stage, "custom", ())
    }
}

impl From<ClearExpect> for Step {
    fn from(chain: ClearExpect) -> Self {
        chain.stage.clear_step()
    }
}

#[derive(Debug, Clone)]
pub struct ClearExpectBody {
    stage: Stage,
}

impl ClearExpectBody {
    pub fn equal(self, arguments: impl IntoArgs) -> Step {
        clear_leaf(&self.stage, "equal", arguments)
    }

    pub fn not_equal(self, arguments: impl IntoArgs) -> Step {
        clear_leaf(&self.stage, "not_equal", arguments)
    }

    pub fn contains(self, arguments: impl IntoArgs) -> Step {
        clear_leaf(&self.stage, "contains", arguments)
    }

    pub fn not_contains(self, arguments: impl IntoArgs) -> Step {
        clear_leaf(&self.stage, "not_contains", arguments)
    }

    pub fn json(self) -> ClearExpectBodyJson {
        ClearExpectBodyJson {
            stage: self.stage.push("json", vec![]),
        }
    }

    /// Always a usage error.
    pub fn json_value(self, value: impl Into<Value>) -> ClearExpectBodyJson {
        ClearExpectBodyJson {
            stage: self
                .stage
                .push("json", vec![value.into()])
                .terminate(CLEAR_EXPECT_BODY_JSON_VALUE),
        }
    }
}

impl From<ClearExpectBody> for Step {
    fn from(chain: ClearExpectBody) -> Self {
        chain.stage.clear_step()
    }
}

/// Removes `expect().body().json()` steps.
///
/// Leaf arguments are matched against the leading arguments of the removed
/// steps: `equal("Name")` removes `equal("Name", "Joe")` and
/// `equal("Name", "Alice")`, `equal("Name", "Joe")` only the former.
#[derive(Debug, Clone)]
pub struct ClearExpectBodyJson {
    stage: Stage,
}

impl ClearExpectBodyJson {
    pub fn equal(self, arguments: impl IntoArgs) -> Step {
        clear_leaf(&self.stage, "equal", arguments)
    }

    pub fn not_equal(self, arguments: impl IntoArgs) -> Step {
        clear_leaf(&self.stage, "not_equal", arguments)
    }

    pub fn contains(self, arguments: impl IntoArgs) -> Step {
        clear_leaf(&self.stage, "contains", arguments)
    }

    pub fn not_contains(self, arguments: impl IntoArgs) -> Step {
        clear_leaf(&self.stage, "not_contains", arguments)
    }
}

impl From<ClearExpectBodyJson> for Step {
    fn from(chain: ClearExpectBodyJson) -> Self {
        chain.stage.clear_step()
    }
}

#[derive(Debug, Clone)]
pub struct ClearExpectHeader {
    stage: Stage,
}

impl ClearExpectHeader {
    pub fn contains(self, arguments: impl IntoArgs) -> Step {
        clear_leaf(&self.stage, "contains", arguments)
    }

    pub fn not_contains(self, arguments: impl IntoArgs) -> Step {
        clear_leaf(&self.stage, "not_contains", arguments)
    }

    pub fn one_of(self, arguments: impl IntoArgs) -> Step {
        clear_leaf(&self.stage, "one_of", arguments)
    }

    pub fn not_one_of(self, arguments: impl IntoArgs) -> Step {
        clear_leaf(&self.stage, "not_one_of", arguments)
    }

    pub fn empty(self) -> Step {
        clear_leaf(&self.stage, "empty", ())
    }

    pub fn not_empty(self) -> Step {
        clear_leaf(&self.stage, "not_empty", ())
    }

    pub fn len(self, arguments: impl IntoArgs) -> Step {
        clear_leaf(&self.stage, "len", arguments)
    }

    pub fn equal(self, arguments: impl IntoArgs) -> Step {
        clear_leaf(&self.stage, "equal", arguments)
    }

    pub fn not_equal(self, arguments: impl IntoArgs) -> Step {
        clear_leaf(&self.stage, "not_equal", arguments)
    }
}

impl From<ClearExpectHeader> for Step {
    fn from(chain: ClearExpectHeader) -> Self {
        chain.stage.clear_step()
    }
}

#[derive(Debug, Clone)]
pub struct ClearExpectHeaders {
    stage: Stage,
    bound: bool,
}

impl ClearExpectHeaders {
    pub fn get(self, arguments: impl IntoArgs) -> ClearExpectHeaders {
        let stage = self.stage.push("get", arguments.into_args());
        ClearExpectHeaders {
            stage: if self.bound {
                stage.terminate(GET_AFTER_GET)
            } else {
                stage
            },
            bound: true,
        }
    }

    pub fn contains(self, arguments: impl IntoArgs) -> Step {
        clear_leaf(&self.stage, "contains", arguments)
    }

    pub fn not_contains(self, arguments: impl IntoArgs) -> Step {
        clear_leaf(&self.stage, "not_contains", arguments)
    }

    pub fn one_of(self, arguments: impl IntoArgs) -> Step {
        clear_leaf(&self.stage, "one_of", arguments)
    }

    pub fn not_one_of(self, arguments: impl IntoArgs) -> Step {
        clear_leaf(&self.stage, "not_one_of", arguments)
    }

    pub fn empty(self) -> Step {
        clear_leaf(&self.stage, "empty", ())
    }

    pub fn not_empty(self) -> Step {
        clear_leaf(&self.stage, "not_empty", ())
    }

    pub fn len(self, arguments: impl IntoArgs) -> Step {
        clear_leaf(&self.stage, "len", arguments)
    }

    pub fn equal(self, arguments: impl IntoArgs) -> Step {
        clear_leaf(&self.stage, "equal", arguments)
    }

    pub fn not_equal(self, arguments: impl IntoArgs) -> Step {
        clear_leaf(&self.stage, "not_equal", arguments)
    }
}

impl From<ClearExpectHeaders> for Step {
    fn from(chain: ClearExpectHeaders) -> Self {
        chain.stage.clear_step()
    }
}

#[derive(Debug, Clone)]
pub struct ClearExpectStatus {
    stage: Stage,
}

impl ClearExpectStatus {
    pub fn equal(self, arguments: impl IntoArgs) -> Step {
        clear_leaf(&self.stage, "equal", arguments)
    }

    pub fn not_equal(self, arguments: impl IntoArgs) -> Step {
        clear_leaf(&self.stage, "not_equal", arguments)
    }

    pub fn one_of(self, arguments: impl IntoArgs) -> Step {
        clear_leaf(&self.stage, "one_of", arguments)
    }

    pub fn not_one_of(self, arguments: impl IntoArgs) -> Step {
        clear_leaf(&self.stage, "not_one_of", arguments)
    }
}

impl From<ClearExpectStatus> for Step {
    fn from(chain: ClearExpectStatus) -> Self {
        chain.stage.clear_step()
    }
}
