/// Protocol marker expected in every inner-HTTP status line
pub const HTTP_VERSION: &str = "HTTP/1.1";

/// Line separator of the inner-HTTP wire format
pub const CRLF: &str = "\r\n";

/// Separator between the inner-HTTP head section and the body
pub const HEAD_BODY_SEPARATOR: &str = "\r\n\r\n";

/// URL segment of the tunnel endpoint: `{base_url}/VAU/{pseudonym}`
pub const VAU_PATH_SEGMENT: &str = "VAU";

/// URL segment of the certificate endpoint: `{base_url}/VAUCertificate`
pub const VAU_CERTIFICATE_PATH_SEGMENT: &str = "VAUCertificate";

/// Pseudonym every session starts with, and resets to when the backend
/// omits the `Userpseudonym` response header
pub const INITIAL_USER_PSEUDONYM: &str = "0";

/// Response header carrying the rotating session pseudonym
pub const HEADER_USER_PSEUDONYM: &str = "Userpseudonym";

/// Response header carrying the backend-side request id (logged only)
pub const HEADER_REQUEST_ID: &str = "X-Request-Id";

/// Request header distinguishing the caller role (single-character flag)
pub const HEADER_ERP_USER: &str = "X-erp-user";

/// Request header carrying the resource-path hint for gateway diagnostics
pub const HEADER_ERP_RESOURCE: &str = "X-erp-resource";

/// Request header carrying the configured user agent
pub const HEADER_ERP_USER_AGENT: &str = "X-erp-user-agent";

/// Request header carrying the static API key (End-User-App role only)
pub const HEADER_API_KEY: &str = "X-api-key";

/// Content type of every outer tunnel request, and the marker that
/// classifies an outer response as encrypted
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Default attempt bound for the outer-call retry contract
pub const DEFAULT_MAX_ATTEMPTS: usize = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_values() {
        // Compile-time check documenting the retry contract lower bound
        const _: () = assert!(DEFAULT_MAX_ATTEMPTS >= 1);

        assert_eq!(HEAD_BODY_SEPARATOR, concat!("\r\n", "\r\n"));
        assert!(OCTET_STREAM.contains("octet-stream"));
        assert_eq!(INITIAL_USER_PSEUDONYM, "0");
    }
}
