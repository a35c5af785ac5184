//! The seam between a run and the network.

use crate::config::HttpConfig;
use crate::error::TransportError;
use crate::exchange::{Method, Request, Response};
use reqwest::header::{HeaderName, HeaderValue};
use tracing::trace;

/// Issues a built request and returns the response.
///
/// The call blocks until the response is complete. Implemented for closures
/// so tests can answer requests without a network.
pub trait Transport {
    fn send(&self, request: &Request) -> Result<Response, TransportError>;
}

impl<F> Transport for F
where
    F: Fn(&Request) -> Result<Response, TransportError>,
{
    fn send(&self, request: &Request) -> Result<Response, TransportError> {
        self(request)
    }
}

/// Blocking HTTP transport backed by reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Builds a client with the configured timeout and user agent.
    pub fn new(config: &HttpConfig) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: &Request) -> Result<Response, TransportError> {
        let method: reqwest::Method = request.method().unwrap_or(Method::Get).into();
        let url = reqwest::Url::parse(request.url()).map_err(|e| TransportError::InvalidUrl {
            url: request.url().to_string(),
            reason: e.to_string(),
        })?;

        trace!(%method, %url, body_len = request.body().len(), "sending request");

        let mut builder = self.client.request(method, url);
        for (name, value) in request.headers() {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| TransportError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            let header_value =
                HeaderValue::from_str(value).map_err(|e| TransportError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            builder = builder.header(header_name, header_value);
        }
        if !request.body().is_empty() {
            builder = builder.body(request.body().to_vec());
        }

        let response = builder
            .send()
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
                (name.as_str().to_string(), value)
            })
            .collect();
        let body = response
            .bytes()
            .map_err(|e| TransportError::Body(e.to_string()))?;

        trace!(status, body_len = body.len(), "received response");

        Ok(Response::new(status, headers, body.to_vec()))
    }
}
