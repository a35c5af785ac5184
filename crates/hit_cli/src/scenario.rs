//! Scenario files: declarative runs written in TOML.
//!
//! ```toml
//! base_url = "http://localhost:8080"
//!
//! [defaults]
//! headers = { Accept = "application/json" }
//!
//! [[defaults.expect]]
//! status = { equal = 200 }
//!
//! [[scenario]]
//! description = "unknown users are not found"
//! method = "GET"
//! url = "/users/404"
//! clear = ["status"]
//!
//! [[scenario.expect]]
//! status = { equal = 404 }
//! ```
//!
//! Defaults are declared before the scenario's own steps, so `clear`
//! removes them for that scenario only.

use anyhow::{anyhow, bail, Context, Result};
use hit_core::{base_url, clear, description, expect, method, send, Method, Step, Value};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioFile {
    /// Prefix for the url of every scenario in the file.
    pub base_url: Option<String>,
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default, rename = "scenario")]
    pub scenarios: Vec<Scenario>,
}

/// Headers and expectations shared by every scenario of a file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Defaults {
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub expect: Vec<Expectation>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    pub description: String,
    pub method: String,
    pub url: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Raw request body.
    pub body: Option<String>,
    /// Request body encoded as JSON.
    pub json: Option<toml::Value>,
    /// Default expectations this scenario does not want.
    #[serde(default)]
    pub clear: Vec<ClearTarget>,
    #[serde(default)]
    pub expect: Vec<Expectation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearTarget {
    Status,
    Headers,
    Body,
    Json,
    All,
}

impl ClearTarget {
    /// `headers` covers both the single-header and the header-map chains.
    fn steps(self) -> Vec<Step> {
        match self {
            ClearTarget::Status => vec![clear().expect().status().into()],
            ClearTarget::Headers => vec![
                clear().expect().header(()).into(),
                clear().expect().headers().into(),
            ],
            ClearTarget::Body => vec![clear().expect().body().into()],
            ClearTarget::Json => vec![clear().expect().body().json().into()],
            ClearTarget::All => vec![clear().expect().into()],
        }
    }
}

/// One assertion. Exactly one target must be set.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Expectation {
    pub status: Option<Check>,
    pub header: Option<Check>,
    pub headers: Option<Check>,
    pub body: Option<Check>,
    pub json: Option<Check>,
}

/// The operator of an assertion. Exactly one operator must be set.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Check {
    /// Header name for `header` checks.
    pub name: Option<String>,
    /// Dotted lookup expression for `json` checks; empty for the whole body.
    #[serde(default)]
    pub path: String,
    pub equal: Option<toml::Value>,
    pub not_equal: Option<toml::Value>,
    pub contains: Option<toml::Value>,
    pub not_contains: Option<toml::Value>,
    pub one_of: Option<Vec<toml::Value>>,
    pub not_one_of: Option<Vec<toml::Value>>,
    pub len: Option<usize>,
    #[serde(default)]
    pub empty: bool,
    #[serde(default)]
    pub not_empty: bool,
}

#[derive(Debug)]
enum Operator {
    Equal(Value),
    NotEqual(Value),
    Contains(Value),
    NotContains(Value),
    OneOf(Vec<Value>),
    NotOneOf(Vec<Value>),
    Len(usize),
    Empty,
    NotEmpty,
}

impl Operator {
    fn name(&self) -> &'static str {
        match self {
            Operator::Equal(_) => "equal",
            Operator::NotEqual(_) => "not_equal",
            Operator::Contains(_) => "contains",
            Operator::NotContains(_) => "not_contains",
            Operator::OneOf(_) => "one_of",
            Operator::NotOneOf(_) => "not_one_of",
            Operator::Len(_) => "len",
            Operator::Empty => "empty",
            Operator::NotEmpty => "not_empty",
        }
    }
}

fn value(raw: &toml::Value) -> Result<Value> {
    Value::from_serialize(raw).with_context(|| format!("unsupported value {raw}"))
}

fn values(raw: &[toml::Value]) -> Result<Vec<Value>> {
    raw.iter().map(value).collect()
}

impl Check {
    fn operator(&self) -> Result<Operator> {
        let mut found = Vec::new();
        if let Some(raw) = &self.equal {
            found.push(Operator::Equal(value(raw)?));
        }
        if let Some(raw) = &self.not_equal {
            found.push(Operator::NotEqual(value(raw)?));
        }
        if let Some(raw) = &self.contains {
            found.push(Operator::Contains(value(raw)?));
        }
        if let Some(raw) = &self.not_contains {
            found.push(Operator::NotContains(value(raw)?));
        }
        if let Some(raw) = &self.one_of {
            found.push(Operator::OneOf(values(raw)?));
        }
        if let Some(raw) = &self.not_one_of {
            found.push(Operator::NotOneOf(values(raw)?));
        }
        if let Some(size) = self.len {
            found.push(Operator::Len(size));
        }
        if self.empty {
            found.push(Operator::Empty);
        }
        if self.not_empty {
            found.push(Operator::NotEmpty);
        }
        match found.len() {
            1 => Ok(found.remove(0)),
            0 => bail!("a check needs one of equal, not_equal, contains, not_contains, one_of, not_one_of, len, empty or not_empty"),
            _ => bail!("a check takes a single operator, found {}", found.len()),
        }
    }
}

fn unsupported(target: &str, operator: &Operator) -> anyhow::Error {
    anyhow!("{target} does not support {}", operator.name())
}

fn status_step(check: &Check) -> Result<Step> {
    let status = expect().status();
    Ok(match check.operator()? {
        Operator::Equal(v) => status.equal(v),
        Operator::NotEqual(v) => status.not_equal(v),
        Operator::OneOf(v) => status.one_of(v),
        Operator::NotOneOf(v) => status.not_one_of(v),
        other => return Err(unsupported("status", &other)),
    })
}

fn body_step(check: &Check) -> Result<Step> {
    let body = expect().body();
    Ok(match check.operator()? {
        Operator::Equal(v) => body.equal(v),
        Operator::NotEqual(v) => body.not_equal(v),
        Operator::Contains(v) => body.contains(v),
        Operator::NotContains(v) => body.not_contains(v),
        other => return Err(unsupported("body", &other)),
    })
}

fn json_step(check: &Check) -> Result<Step> {
    let json = expect().body().json();
    let path = check.path.as_str();
    Ok(match check.operator()? {
        Operator::Equal(v) => json.equal(path, v),
        Operator::NotEqual(v) => json.not_equal(path, v),
        Operator::Contains(v) => json.contains(path, v),
        Operator::NotContains(v) => json.not_contains(path, v),
        other => return Err(unsupported("json", &other)),
    })
}

fn header_step(check: &Check) -> Result<Step> {
    let name = check
        .name
        .as_deref()
        .ok_or_else(|| anyhow!("header checks need a name"))?;
    let header = expect().header(name);
    Ok(match check.operator()? {
        Operator::Equal(v) => header.equal(v),
        Operator::NotEqual(v) => header.not_equal(v),
        Operator::Contains(v) => header.contains(v),
        Operator::NotContains(v) => header.not_contains(v),
        Operator::OneOf(v) => header.one_of(v),
        Operator::NotOneOf(v) => header.not_one_of(v),
        Operator::Len(size) => header.len(size),
        Operator::Empty => header.empty(),
        Operator::NotEmpty => header.not_empty(),
    })
}

fn headers_step(check: &Check) -> Result<Step> {
    let mut headers = expect().headers();
    if let Some(name) = &check.name {
        headers = headers.get(name.as_str());
    }
    Ok(match check.operator()? {
        Operator::Equal(v) => headers.equal(v),
        Operator::NotEqual(v) => headers.not_equal(v),
        Operator::Contains(v) => headers.contains(v),
        Operator::NotContains(v) => headers.not_contains(v),
        Operator::OneOf(v) => headers.one_of(v),
        Operator::NotOneOf(v) => headers.not_one_of(v),
        Operator::Len(size) => headers.len(size),
        Operator::Empty => headers.empty(),
        Operator::NotEmpty => headers.not_empty(),
    })
}

impl Expectation {
    pub fn step(&self) -> Result<Step> {
        let targets: Vec<(&str, &Check)> = [
            ("status", self.status.as_ref()),
            ("header", self.header.as_ref()),
            ("headers", self.headers.as_ref()),
            ("body", self.body.as_ref()),
            ("json", self.json.as_ref()),
        ]
        .into_iter()
        .filter_map(|(name, check)| check.map(|check| (name, check)))
        .collect();

        match targets.as_slice() {
            [("status", check)] => status_step(check),
            [("header", check)] => header_step(check),
            [("headers", check)] => headers_step(check),
            [("body", check)] => body_step(check),
            [("json", check)] => json_step(check),
            _ => bail!("an expectation needs exactly one of status, header, headers, body or json"),
        }
    }
}

impl ScenarioFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("invalid scenario file {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// The steps of one scenario, defaults first.
    pub fn steps(&self, scenario: &Scenario) -> Result<Vec<Step>> {
        let verb: Method = scenario
            .method
            .parse()
            .map_err(|err| anyhow!("{}: {err}", scenario.description))?;

        let mut steps = vec![description(scenario.description.as_str())];
        if let Some(url) = &self.base_url {
            steps.push(base_url(url.as_str()));
        }
        steps.push(method(verb, scenario.url.as_str()));

        for (name, value) in &self.defaults.headers {
            steps.push(send().header(name.as_str(), value.as_str()));
        }
        for expectation in &self.defaults.expect {
            steps.push(expectation.step().context("invalid default expectation")?);
        }

        steps.extend(scenario.clear.iter().flat_map(|target| target.steps()));

        for (name, value) in &scenario.headers {
            steps.push(send().header(name.as_str(), value.as_str()));
        }
        match (&scenario.body, &scenario.json) {
            (Some(_), Some(_)) => bail!("{}: body and json are exclusive", scenario.description),
            (Some(body), None) => steps.push(send().body_value(body.as_str()).into()),
            (None, Some(json)) => steps.push(send().json(value(json)?)),
            (None, None) => {}
        }
        for expectation in &scenario.expect {
            steps.push(
                expectation
                    .step()
                    .with_context(|| format!("{}: invalid expectation", scenario.description))?,
            );
        }
        Ok(steps)
    }
}
