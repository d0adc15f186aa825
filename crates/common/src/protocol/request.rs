use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{CRLF, HTTP_VERSION};

/// HTTP verbs supported by the inner request line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A plaintext request framed for transport inside the tunnel ciphertext.
///
/// Headers keep their insertion order on the wire. The `content-length`
/// header is always computed during encoding and must not be supplied by
/// the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InnerRequest {
    pub method: Method,

    /// Request path, e.g. "/Task/4711"
    pub path: String,

    /// Headers in insertion order
    pub headers: Vec<(String, String)>,

    /// Request body, empty for body-less requests
    #[serde(default)]
    pub body: String,
}

impl InnerRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Vec::new(),
            body: String::new(),
        }
    }

    /// Append a header, preserving insertion order
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Stack the standard content-negotiation headers a backend request
    /// carries: bearer token, accept, accept-charset and content type.
    pub fn negotiated(
        self,
        access_token: &str,
        accept: &str,
        accept_charset: &str,
        content_type: &str,
    ) -> Self {
        self.header("Authorization", format!("Bearer {access_token}"))
            .header("Accept", accept)
            .header("Accept-Charset", accept_charset)
            .header("Content-Type", content_type)
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Flatten into the textual inner-HTTP wire representation.
    ///
    /// Produces the request line, the headers in insertion order, a
    /// computed `content-length` header, the blank separator line and the
    /// body if non-empty.
    pub fn encode(&self) -> String {
        let mut out = format!("{} {} {HTTP_VERSION}{CRLF}", self.method, self.path);
        for (key, value) in &self.headers {
            out.push_str(&format!("{key}: {value}{CRLF}"));
        }
        out.push_str(&format!("content-length: {}{CRLF}{CRLF}", self.body.len()));
        if !self.body.is_empty() {
            out.push_str(&self.body);
        }
        out
    }
}

/// Encode an inner request from its parts. Convenience wrapper used by
/// callers that assemble headers externally.
pub fn encode(method: Method, path: &str, headers: &[(String, String)], body: &str) -> String {
    InnerRequest {
        method,
        path: path.to_string(),
        headers: headers.to_vec(),
        body: body.to_string(),
    }
    .encode()
}
