//! Hit Core Library
//!
//! Declarative HTTP tests: a run is an ordered list of steps that build a
//! request, exchange it once, and check the response.
//!
//! - Steps run in phases: clean, setup, send, exchange, expect, cleanup
//! - Every step remembers the builder calls that created it, so later
//!   `clear()` steps can remove earlier ones
//! - Assertions share one comparison engine working on [`Value`]s
//!
//! # Quick Start
//!
//! ```
//! use hit_core::{do_steps, expect, post, send, transport, Request, Response, TransportError};
//!
//! // Answer every request with its own body.
//! let echo = |request: &Request| -> Result<Response, TransportError> {
//!     let headers = vec![("Content-Type".to_string(), "application/json".to_string())];
//!     Ok(Response::new(200, headers, request.body().to_vec()))
//! };
//!
//! do_steps(vec![
//!     post("http://service.test/users"),
//!     transport(echo),
//!     send().json(serde_json::json!({"Name": "Joe", "Id": 10})),
//!     expect().status().equal(200),
//!     expect().header("Content-Type").contains("json"),
//!     expect().body().json().equal("Name", "Joe"),
//! ])
//! .unwrap();
//! ```
//!
//! # Clearing steps
//!
//! Shared step lists can be refined per test. A `clear()` chain removes the
//! steps declared before it that were built through the same calls:
//!
//! ```
//! use hit_core::{clear, do_steps, expect, get, steps, transport, Request, Response, TransportError};
//!
//! let not_found = |_: &Request| -> Result<Response, TransportError> {
//!     Ok(Response::new(404, vec![], "missing"))
//! };
//! let defaults = steps![expect().status().equal(200)];
//!
//! let mut run = steps![get("http://service.test/missing"), transport(not_found)];
//! run.extend(defaults);
//! run.extend(steps![clear().expect().status(), expect().status().equal(404)]);
//! do_steps(run).unwrap();
//! ```
//!
//! # Failures
//!
//! A failing run returns a [`StepError`] naming the failing call:
//!
//! ```
//! use hit_core::{do_steps, expect, get, transport, ErrorKind, Request, Response, TransportError};
//!
//! let ok = |_: &Request| -> Result<Response, TransportError> { Ok(Response::new(200, vec![], "")) };
//! let err = do_steps(vec![
//!     get("http://service.test"),
//!     transport(ok),
//!     expect().status().equal(201),
//! ])
//! .unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Assertion);
//! assert_eq!(err.call(), "expect().status().equal(201)");
//! ```

mod builder;
pub mod compare;
mod config;
mod convert;
mod error;
mod exchange;
mod hit;
mod path;
mod pipeline;
mod step;
mod trace;
mod transport;
mod value;

pub use builder::{
    base_url, cleanup, clear, delete, description, expect, expect_value, get, head, method,
    options, patch, post, put, send, send_value, transport, ClearChain, ClearExpect,
    ClearExpectBody, ClearExpectBodyJson, ClearExpectHeader, ClearExpectHeaders,
    ClearExpectStatus, ClearSend, ClearSendBody, ExpectBody, ExpectBodyJson, ExpectChain,
    ExpectHeader, ExpectHeaders, ExpectStatus, SendBody, SendChain,
};
pub use compare::CompareError;
pub use config::{Config, HttpConfig, CONFIG_FILE};
pub use convert::{convert, convert_to_kind, ConvertError};
pub use error::{ConfigError, ErrorKind, HitError, Result, StepError, TransportError};
pub use exchange::{canonical_header_name, Method, Request, Response};
pub use hit::Hit;
pub use path::{IntoArgs, Path, Segment};
pub use pipeline::Pipeline;
pub use step::{Callback, Phase, Step};
pub use trace::Trace;
pub use transport::{ReqwestTransport, Transport};
pub use value::{Kind, Record, Value};

/// Collects builder chains into a `Vec<Step>`.
///
/// Chains that are not yet steps (`send_value(..)`, `clear().send()`, ...)
/// are converted with [`Step::from`].
#[macro_export]
macro_rules! steps {
    ($($step:expr),* $(,)?) => {
        vec![$($crate::Step::from($step)),*]
    };
}

/// Runs `steps` with the default configuration.
pub fn do_steps(steps: Vec<Step>) -> std::result::Result<(), StepError> {
    do_steps_with(Config::default(), steps)
}

/// Runs `steps` with `config`.
pub fn do_steps_with(config: Config, steps: Vec<Step>) -> std::result::Result<(), StepError> {
    Hit::new(config).run(steps)
}

/// Runs `steps` and panics with the failure report if the run fails.
pub fn must_do(steps: Vec<Step>) {
    if let Err(err) = do_steps(steps) {
        panic!("{err}");
    }
}

/// Runs `steps` under `description`, panicking on failure.
///
/// Meant for `#[test]` functions: the description heads the failure report.
pub fn test(description: impl Into<String>, steps: Vec<Step>) {
    let mut all = Vec::with_capacity(steps.len() + 1);
    all.push(builder::description(description));
    all.extend(steps);
    must_do(all);
}
