//! Request under construction and the response it produced.

use crate::error::HitError;
use crate::value::Value;
use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl Method {
    pub const ALL: [Method; 7] = [
        Method::Get,
        Method::Post,
        Method::Put,
        Method::Patch,
        Method::Delete,
        Method::Head,
        Method::Options,
    ];
}

impl Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
        };
        write!(f, "{label}")
    }
}

impl FromStr for Method {
    type Err = HitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|method| method.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| HitError::usage(format!("unknown http method {s:?}")))
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
            Method::Head => reqwest::Method::HEAD,
            Method::Options => reqwest::Method::OPTIONS,
        }
    }
}

/// The request assembled by setup and send steps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Request {
    method: Option<Method>,
    url: String,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl Request {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(&self) -> Option<Method> {
        self.method
    }

    pub fn set_method(&mut self, method: Method) {
        self.method = Some(method);
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Returns the first value of the named header, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Sets a header, replacing every previous value of the same name.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn body_string(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn set_body(&mut self, body: impl Into<Vec<u8>>) {
        self.body = body.into();
    }

    /// Sets the body from a value: strings are sent verbatim, `Null` clears
    /// the body and everything else is encoded as JSON.
    pub fn set_body_value(&mut self, value: &Value) -> Result<(), HitError> {
        match value {
            Value::String(s) => self.body = s.clone().into_bytes(),
            Value::Null => self.body.clear(),
            other => self.body = serde_json::to_vec(&other.to_json())?,
        }
        Ok(())
    }

    /// Encodes the value as JSON, strings included, and marks the body as
    /// `application/json` unless a content type was already set.
    pub fn set_body_json(&mut self, value: &Value) -> Result<(), HitError> {
        self.body = serde_json::to_vec(&value.to_json())?;
        if self.header("Content-Type").is_none() {
            self.set_header("Content-Type", "application/json");
        }
        Ok(())
    }
}

/// A received response.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    status: u16,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16, headers: Vec<(String, String)>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Returns the first value of the named header, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// The named header as a string value. A missing header is the empty
    /// string; repeated headers are joined with `", "`.
    pub fn header_value(&self, name: &str) -> Value {
        let values: Vec<&str> = self
            .headers
            .iter()
            .filter(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
            .collect();
        Value::String(values.join(", "))
    }

    /// All headers as a map keyed by canonical header name.
    pub fn headers_value(&self) -> Value {
        let mut map: BTreeMap<String, Value> = BTreeMap::new();
        for (name, value) in &self.headers {
            let name = canonical_header_name(name);
            match map.get_mut(&name) {
                Some(Value::String(existing)) => {
                    existing.push_str(", ");
                    existing.push_str(value);
                }
                _ => {
                    map.insert(name, Value::String(value.clone()));
                }
            }
        }
        Value::Map(map)
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn body_string(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decodes the body as JSON.
    pub fn body_json(&self) -> Result<Value, serde_json::Error> {
        let json: serde_json::Value = serde_json::from_slice(&self.body)?;
        Ok(Value::from(json))
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// Canonical form of a header name: `content-type` becomes `Content-Type`.
pub fn canonical_header_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => {
                    first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}
