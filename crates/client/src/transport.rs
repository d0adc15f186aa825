use std::collections::HashMap;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;
use vau_tunnel_common::headers_to_map;

/// A transient failure of the outer HTTP exchange. Subject to the retry
/// contract; never carries application-level meaning.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError(err.to_string())
    }
}

/// Outcome of one outer HTTP exchange, flattened to the parts the
/// session client consumes.
#[derive(Debug, Clone)]
pub struct OuterResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

/// Seam for the outer HTTP transport. The production implementation is
/// [`ReqwestTransport`]; tests substitute scripted fakes.
pub trait OuterTransport: Send + Sync {
    fn get(
        &self,
        url: &str,
        headers: &[(String, String)],
    ) -> Result<OuterResponse, TransportError>;

    fn post(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &[u8],
    ) -> Result<OuterResponse, TransportError>;
}

/// Blocking reqwest-backed outer transport.
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Build a transport with the given connect/read timeout. Timeouts are
    /// configuration of the outer transport, not of the tunnel protocol.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    fn flatten(response: reqwest::blocking::Response) -> Result<OuterResponse, TransportError> {
        let status = response.status().as_u16();
        let headers = headers_to_map(response.headers());
        let body = response.bytes()?.to_vec();
        Ok(OuterResponse {
            status,
            headers,
            body,
        })
    }
}

impl OuterTransport for ReqwestTransport {
    fn get(
        &self,
        url: &str,
        headers: &[(String, String)],
    ) -> Result<OuterResponse, TransportError> {
        debug!("GET {url}");
        let mut req = self.client.get(url);
        for (name, value) in headers {
            req = req.header(name, value);
        }
        Self::flatten(req.send()?)
    }

    fn post(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &[u8],
    ) -> Result<OuterResponse, TransportError> {
        debug!("POST {url} ({} body bytes)", body.len());
        let mut req = self.client.post(url);
        for (name, value) in headers {
            req = req.header(name, value);
        }
        Self::flatten(req.body(body.to_vec()).send()?)
    }
}
