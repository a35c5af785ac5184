use super::assertions::Assertion;
use super::server::{Reply, TestServer};
use hit_core::{base_url, description, do_steps_with, Config, ErrorKind, HttpConfig, Step};
use std::collections::BTreeMap;

enum Responder {
    Echo,
    Fixed(Reply),
}

/// Fluent DSL for building end-to-end scenarios.
///
/// Every scenario starts its own server and points the run at it with
/// `base_url`, so steps use plain paths such as `get("/users")`.
pub struct Scenario {
    name: String,
    responder: Responder,
    default_headers: BTreeMap<String, String>,
    steps: Vec<Step>,
    assertions: Vec<Assertion>,
}

impl Scenario {
    /// Create a new scenario against an echo server
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            responder: Responder::Echo,
            default_headers: BTreeMap::new(),
            steps: Vec::new(),
            assertions: Vec::new(),
        }
    }

    // ===== Server =====

    /// Answer every request with `reply`
    pub fn replying(mut self, reply: Reply) -> Self {
        self.responder = Responder::Fixed(reply);
        self
    }

    // ===== Run configuration =====

    /// Add a default request header to the run's config
    pub fn with_default_header(mut self, name: &str, value: &str) -> Self {
        self.default_headers
            .insert(name.to_string(), value.to_string());
        self
    }

    // ===== Steps =====

    pub fn step(mut self, step: impl Into<Step>) -> Self {
        self.steps.push(step.into());
        self
    }

    pub fn steps(mut self, steps: Vec<Step>) -> Self {
        self.steps.extend(steps);
        self
    }

    // ===== Assertions =====

    /// Add a general assertion
    pub fn assert(mut self, assertion: Assertion) -> Self {
        self.assertions.push(assertion);
        self
    }

    pub fn assert_passes(self) -> Self {
        self.assert(Assertion::Passed)
    }

    /// Assert the run failed in the step built by `call`
    pub fn assert_fails(self, kind: ErrorKind, call: &str) -> Self {
        self.assert(Assertion::Failed {
            kind,
            call: call.to_string(),
        })
    }

    pub fn assert_failure_contains(self, text: &str) -> Self {
        self.assert(Assertion::FailureContains(text.to_string()))
    }

    pub fn assert_request_count(self, count: usize) -> Self {
        self.assert(Assertion::RequestCount(count))
    }

    pub fn assert_received_method(self, method: &str) -> Self {
        self.assert(Assertion::ReceivedMethod(method.to_string()))
    }

    pub fn assert_received_path(self, path: &str) -> Self {
        self.assert(Assertion::ReceivedPath(path.to_string()))
    }

    pub fn assert_received_header(self, name: &str, value: &str) -> Self {
        self.assert(Assertion::ReceivedHeader {
            name: name.to_string(),
            value: value.to_string(),
        })
    }

    pub fn assert_received_body(self, body: &str) -> Self {
        self.assert(Assertion::ReceivedBody(body.to_string()))
    }

    // ===== Execution =====

    /// Execute the scenario and return results
    pub fn run(self) -> ScenarioResult {
        let server = match self.responder {
            Responder::Echo => TestServer::echo(),
            Responder::Fixed(reply) => TestServer::replying(reply),
        };
        let server = match server {
            Ok(server) => server,
            Err(e) => {
                return ScenarioResult {
                    name: self.name,
                    errors: vec![format!("Failed to start server: {e}")],
                }
            }
        };

        let config = Config {
            http: HttpConfig {
                default_headers: self.default_headers,
                ..HttpConfig::default()
            },
            ..Config::default()
        };
        let mut steps = vec![description(self.name.as_str()), base_url(server.url())];
        steps.extend(self.steps);
        let outcome = do_steps_with(config, steps);
        let received = server.received();

        let errors = self
            .assertions
            .iter()
            .filter_map(|assertion| {
                assertion
                    .check(&outcome, &received)
                    .err()
                    .map(|e| format!("{assertion:?}: {e}"))
            })
            .collect();

        ScenarioResult {
            name: self.name,
            errors,
        }
    }
}

/// Result of running a scenario
#[derive(Debug)]
pub struct ScenarioResult {
    pub name: String,
    pub errors: Vec<String>,
}

impl ScenarioResult {
    pub fn success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Unwrap the result, panicking if it failed
    pub fn unwrap(self) {
        if !self.success() {
            panic!("Scenario '{}' failed:\n{}", self.name, self.errors.join("\n"));
        }
    }
}
