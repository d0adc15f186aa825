use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

use crate::constants::{CRLF, HEAD_BODY_SEPARATOR, HTTP_VERSION};
use crate::error::{Result, VauError};

/// A plaintext response recovered from the tunnel ciphertext, or built
/// directly from an outer response that bypassed the tunnel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InnerResponse {
    /// Protocol token of the status line, e.g. "HTTP/1.1"
    pub protocol: String,

    /// HTTP status code (200, 404, 500, etc.)
    pub status_code: u16,

    /// Response headers; duplicate keys are last-write-wins
    pub headers: HashMap<String, String>,

    /// Response body, empty when the frame carried none
    #[serde(default)]
    pub body: String,
}

impl InnerResponse {
    /// Look up a header by exact name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Check if the response is successful (2xx status code)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Parse the textual inner-HTTP wire format.
    ///
    /// The status line may carry a tunnel-protocol prefix before the
    /// `HTTP/1.1` marker (version tag and request id), so the scan for
    /// the marker starts anywhere in the line. Header lines without a
    /// colon separator are skipped with a warning instead of failing
    /// the whole decode.
    pub fn decode(raw: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(raw).map_err(|_| VauError::MalformedResponse)?;
        if text.trim().is_empty() {
            return Err(VauError::MalformedResponse);
        }

        let (head, body) = match text.split_once(HEAD_BODY_SEPARATOR) {
            Some((head, body)) => (head, body),
            None => (text, ""),
        };

        let mut lines = head.split(CRLF);
        let status_line = lines.next().unwrap_or_default();

        let marker_at = status_line
            .find(HTTP_VERSION)
            .ok_or(VauError::MissingProtocolMarker)?;

        let mut status_tokens = status_line[marker_at..].split(' ');
        let protocol = status_tokens.next().unwrap_or_default();
        let code_token = status_tokens
            .next()
            .ok_or(VauError::IncompleteStatusLine)?;
        let status_code = code_token
            .parse::<u16>()
            .map_err(|_| VauError::InvalidStatusCode(code_token.to_string()))?;

        let mut headers = HashMap::new();
        for line in lines {
            match line.split_once(':') {
                Some((key, value)) => {
                    headers.insert(key.to_string(), value.trim_start().to_string());
                }
                None => warn!("skipping inner header line without separator: {line}"),
            }
        }

        Ok(Self {
            protocol: protocol.to_string(),
            status_code,
            headers,
            body: body.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_fixed_vector() {
        let raw = b"HTTP/1.1 200 OK\r\ncontent-type: application/fhir+json\r\n\r\n{\"x\":1}";
        let response = InnerResponse::decode(raw).unwrap();

        assert_eq!(response.protocol, "HTTP/1.1");
        assert_eq!(response.status_code, 200);
        assert_eq!(response.header("content-type"), Some("application/fhir+json"));
        assert_eq!(response.body, r#"{"x":1}"#);
        assert!(response.is_success());
    }

    #[test]
    fn test_decode_prefixed_status_line() {
        // Backends prepend a tunnel version and request id to the status line
        let raw = b"1 d225470e5f37dc6b1c3f95fbd651bc5b HTTP/1.1 201 Created\r\n\
                    Content-Type: application/fhir+xml;charset=utf-8\r\n\
                    Content-Length: 1167\r\n\r\n\
                    <?xml version=\"1.0\" encoding=\"utf-8\"?>";
        let response = InnerResponse::decode(raw).unwrap();

        assert_eq!(response.protocol, "HTTP/1.1");
        assert_eq!(response.status_code, 201);
        assert_eq!(
            response.header("Content-Type"),
            Some("application/fhir+xml;charset=utf-8")
        );
        assert!(response.body.contains("<?xml version"));
    }

    #[test]
    fn test_decode_without_body() {
        let raw = b"HTTP/1.1 204 No Content\r\nContent-Length: 0\r\n\r\n";
        let response = InnerResponse::decode(raw).unwrap();

        assert_eq!(response.status_code, 204);
        assert!(response.body.is_empty());
    }

    #[test]
    fn test_decode_without_head_body_separator() {
        let raw = b"HTTP/1.1 200 OK\r\nContent-Length: 0";
        let response = InnerResponse::decode(raw).unwrap();

        assert_eq!(response.status_code, 200);
        assert!(response.body.is_empty());
        assert_eq!(response.header("Content-Length"), Some("0"));
    }

    #[test]
    fn test_decode_empty_input() {
        assert!(matches!(
            InnerResponse::decode(&[]),
            Err(VauError::MalformedResponse)
        ));
        assert!(matches!(
            InnerResponse::decode(b"  \r\n "),
            Err(VauError::MalformedResponse)
        ));
    }

    #[test]
    fn test_decode_non_utf8_input() {
        assert!(matches!(
            InnerResponse::decode(&[0xFF, 0xFE, 0x00]),
            Err(VauError::MalformedResponse)
        ));
    }

    #[test]
    fn test_decode_missing_protocol_marker() {
        assert!(matches!(
            InnerResponse::decode(b"NOTHTTP 200 OK\r\n\r\n"),
            Err(VauError::MissingProtocolMarker)
        ));
    }

    #[test]
    fn test_decode_incomplete_status_line() {
        assert!(matches!(
            InnerResponse::decode(b"HTTP/1.1\r\n\r\n"),
            Err(VauError::IncompleteStatusLine)
        ));
    }

    #[test]
    fn test_decode_invalid_status_code() {
        match InnerResponse::decode(b"HTTP/1.1 abc OK\r\n\r\n") {
            Err(VauError::InvalidStatusCode(token)) => assert_eq!(token, "abc"),
            other => panic!("expected InvalidStatusCode, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_skips_separator_less_header_line() {
        let raw = b"HTTP/1.1 200 OK\r\ngarbage-line\r\ncontent-type: text/plain\r\n\r\nok";
        let response = InnerResponse::decode(raw).unwrap();

        assert_eq!(response.headers.len(), 1);
        assert_eq!(response.header("content-type"), Some("text/plain"));
        assert_eq!(response.body, "ok");
    }

    #[test]
    fn test_decode_duplicate_headers_last_write_wins() {
        let raw = b"HTTP/1.1 200 OK\r\nx-a: first\r\nx-a: second\r\n\r\n";
        let response = InnerResponse::decode(raw).unwrap();

        assert_eq!(response.header("x-a"), Some("second"));
    }

    #[test]
    fn test_response_serialization() {
        let raw = b"HTTP/1.1 200 OK\r\ncontent-type: text/plain\r\n\r\nhello";
        let response = InnerResponse::decode(raw).unwrap();

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""status_code":200"#));

        let parsed: InnerResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.body, "hello");
    }
}
