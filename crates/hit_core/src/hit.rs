//! The run context shared by all steps of one run.

use crate::config::Config;
use crate::error::{HitError, StepError};
use crate::exchange::{Request, Response};
use crate::pipeline::Pipeline;
use crate::step::Step;
use crate::trace::Trace;
use crate::transport::{ReqwestTransport, Transport};
use std::rc::Rc;
use tracing::debug;

/// State of one run: the request under construction, the response once the
/// exchange happened, the transport and the diagnostic trace.
///
/// Custom callbacks receive `&mut Hit` and may start nested runs with
/// [`Hit::do_steps`].
pub struct Hit {
    config: Config,
    request: Request,
    response: Option<Response>,
    transport: Option<Rc<dyn Transport>>,
    base_url: Option<String>,
    trace: Trace,
}

impl Hit {
    /// Creates a run context. The configured default headers are applied to
    /// the request before any step runs.
    pub fn new(config: Config) -> Self {
        let mut request = Request::new();
        for (name, value) in &config.http.default_headers {
            request.set_header(name.clone(), value.clone());
        }
        Self {
            base_url: config.base_url.clone(),
            config,
            request,
            response: None,
            transport: None,
            trace: Trace::new(),
        }
    }

    /// Runs `steps` as a top-level run, exchanging the request once between
    /// the send and expect phases.
    pub fn run(&mut self, steps: Vec<Step>) -> Result<(), StepError> {
        Pipeline::with_exchange(steps).run(self)
    }

    /// Runs `steps` from inside a step.
    ///
    /// The nested steps are resolved and ordered on their own and never
    /// touch the steps of the enclosing run. No exchange is performed, so a
    /// nested send step only affects the request if it runs before the
    /// exchange of the enclosing run.
    pub fn do_steps(&mut self, steps: Vec<Step>) -> Result<(), StepError> {
        Pipeline::new(steps).run(self)
    }

    /// Like [`Hit::do_steps`] but panics on failure.
    pub fn must_do(&mut self, steps: Vec<Step>) {
        if let Err(err) = self.do_steps(steps) {
            panic!("{err}");
        }
    }

    /// Sends the request through the transport and stores the response.
    pub fn exchange(&mut self) -> Result<(), HitError> {
        let method = self.request.method().ok_or_else(|| {
            HitError::usage(
                "unable to create a request: did you call get(), post(), put(), patch(), delete(), head(), options() or method()?",
            )
        })?;
        if let Some(base_url) = &self.base_url {
            if !has_scheme(self.request.url()) {
                let url = format!("{base_url}{}", self.request.url());
                self.request.set_url(url);
            }
        }

        let transport = self.transport()?;
        debug!(%method, url = self.request.url(), "exchanging request");
        let response = transport.send(&self.request)?;
        debug!(status = response.status(), "exchange complete");
        self.response = Some(response);
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn request(&self) -> &Request {
        &self.request
    }

    pub fn request_mut(&mut self) -> &mut Request {
        &mut self.request
    }

    /// The received response.
    ///
    /// # Errors
    ///
    /// Returns a usage error before the exchange happened.
    pub fn response(&self) -> Result<&Response, HitError> {
        self.response
            .as_ref()
            .ok_or_else(|| HitError::usage("no response available: the request was not exchanged yet"))
    }

    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = Some(base_url.into());
    }

    pub fn set_transport(&mut self, transport: Rc<dyn Transport>) {
        self.transport = Some(transport);
    }

    /// Returns the transport, creating the reqwest one on first use.
    fn transport(&mut self) -> Result<Rc<dyn Transport>, HitError> {
        match &self.transport {
            Some(transport) => Ok(transport.clone()),
            None => {
                let transport: Rc<dyn Transport> = Rc::new(ReqwestTransport::new(&self.config.http)?);
                self.transport = Some(transport.clone());
                Ok(transport)
            }
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.trace.description()
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.trace.set_description(description);
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    pub(crate) fn trace_mut(&mut self) -> &mut Trace {
        &mut self.trace
    }
}

impl Default for Hit {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

/// Whether `url` is absolute, like `http://host/` or `svn+ssh://host`.
fn has_scheme(url: &str) -> bool {
    url.split_once("://").is_some_and(|(scheme, _)| {
        scheme.starts_with(|c: char| c.is_ascii_alphabetic())
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}
