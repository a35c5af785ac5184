//! `send()` chains: steps that build the request.

use super::Stage;
use crate::error::HitError;
use crate::hit::Hit;
use crate::step::{Phase, Step};
use crate::value::Value;

const SEND_VALUE: &str = "only usable with send() not with send_value(value)";
const SEND_BODY_VALUE: &str = "only usable with send().body() not with send().body_value(value)";
const SEND_WITHOUT_ARGUMENT: &str = "unable to run send() without an argument or without a chain. Please use send_value(something) or send().something";
const SEND_BODY_WITHOUT_ARGUMENT: &str = "unable to run send().body() without an argument or without a chain. Please use send().body_value(something) or send().body().something";

/// Starts a chain that modifies the request.
///
/// `send()` on its own is not a step; continue the chain or use
/// [`send_value`].
pub fn send() -> SendChain {
    SendChain {
        stage: Stage::root("send", vec![]),
        value: None,
    }
}

/// Sets the request body: strings verbatim, other values as JSON.
///
/// The result cannot be chained any further.
pub fn send_value(value: impl Into<Value>) -> SendChain {
    let value = value.into();
    SendChain {
        stage: Stage::root("send", vec![value.clone()]),
        value: Some(value),
    }
}

#[derive(Debug, Clone)]
pub struct SendChain {
    stage: Stage,
    value: Option<Value>,
}

impl SendChain {
    fn chained(self) -> Stage {
        match self.value {
            Some(_) => self.stage.terminate(SEND_VALUE),
            None => self.stage,
        }
    }

    /// Continues with the request body.
    pub fn body(self) -> SendBody {
        SendBody {
            stage: self.chained().push("body", vec![]),
            value: None,
        }
    }

    /// Sets the request body, like [`send_value`].
    pub fn body_value(self, value: impl Into<Value>) -> SendBody {
        let value = value.into();
        SendBody {
            stage: self.chained().push("body", vec![value.clone()]),
            value: Some(value),
        }
    }

    /// Sets the request body from a value.
    pub fn interface(self, value: impl Into<Value>) -> Step {
        let value = value.into();
        self.chained()
            .push("interface", vec![value.clone()])
            .step(Phase::Send, move |hit| hit.request_mut().set_body_value(&value))
    }

    /// Sets the request body to the JSON encoding of `value`.
    pub fn json(self, value: impl Into<Value>) -> Step {
        let value = value.into();
        self.chained()
            .push("json", vec![value.clone()])
            .step(Phase::Send, move |hit| hit.request_mut().set_body_json(&value))
    }

    /// Sets a request header, replacing earlier values of the same name.
    pub fn header(self, name: impl Into<String>, value: impl Into<String>) -> Step {
        let name = name.into();
        let value = value.into();
        self.chained()
            .push("header", vec![Value::from(name.as_str()), Value::from(value.as_str())])
            .step(Phase::Send, move |hit| {
                hit.request_mut().set_header(name.clone(), value.clone());
                Ok(())
            })
    }

    /// Runs `f` in the send phase.
    pub fn custom<F>(self, f: F) -> Step
    where
        F: Fn(&mut Hit) -> Result<(), HitError> + 'static,
    {
        self.chained().push("custom", vec![]).step(Phase::Send, f)
    }
}

impl From<SendChain> for Step {
    fn from(chain: SendChain) -> Self {
        match chain.value {
            Some(value) => chain
                .stage
                .step(Phase::Send, move |hit| hit.request_mut().set_body_value(&value)),
            None => chain.stage.fail(Phase::Send, SEND_WITHOUT_ARGUMENT),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SendBody {
    stage: Stage,
    value: Option<Value>,
}

impl SendBody {
    fn chained(self) -> Stage {
        match self.value {
            Some(_) => self.stage.terminate(SEND_BODY_VALUE),
            None => self.stage,
        }
    }

    /// Sets the request body to the JSON encoding of `value`.
    pub fn json(self, value: impl Into<Value>) -> Step {
        let value = value.into();
        self.chained()
            .push("json", vec![value.clone()])
            .step(Phase::Send, move |hit| hit.request_mut().set_body_json(&value))
    }

    /// Sets the request body from a value.
    pub fn interface(self, value: impl Into<Value>) -> Step {
        let value = value.into();
        self.chained()
            .push("interface", vec![value.clone()])
            .step(Phase::Send, move |hit| hit.request_mut().set_body_value(&value))
    }
}

impl From<SendBody> for Step {
    fn from(body: SendBody) -> Self {
        match body.value {
            Some(value) => body
                .stage
                .step(Phase::Send, move |hit| hit.request_mut().set_body_value(&value)),
            None => body.stage.fail(Phase::Send, SEND_BODY_WITHOUT_ARGUMENT),
        }
    }
}
