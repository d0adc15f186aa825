use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use url::Url;

use vau_tunnel_common::constants::{
    DEFAULT_MAX_ATTEMPTS, HEADER_API_KEY, HEADER_ERP_RESOURCE, HEADER_ERP_USER,
    HEADER_ERP_USER_AGENT, HEADER_REQUEST_ID, HEADER_USER_PSEUDONYM, HTTP_VERSION,
    INITIAL_USER_PSEUDONYM, OCTET_STREAM, VAU_PATH_SEGMENT,
};
use vau_tunnel_common::{InnerResponse, Result, VauError, encode_base64, header_value};

use crate::cipher::CipherTransform;
use crate::retry::with_retry;
use crate::transport::{OuterResponse, OuterTransport};

/// Caller role, distinguished on the wire by a single-character flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClientRole {
    /// Practitioner/pharmacy systems ("l" on the wire)
    ProviderSide,
    /// End-user app ("v" on the wire); the only role that sends an API key
    EndUserApp,
}

impl ClientRole {
    pub fn marker(&self) -> &'static str {
        match self {
            ClientRole::ProviderSide => "l",
            ClientRole::EndUserApp => "v",
        }
    }
}

/// Static configuration of one tunnel session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Backend base URL, e.g. "https://erp.example.de"
    pub base_url: String,

    pub role: ClientRole,

    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default)]
    pub user_agent: Option<String>,

    /// Attempt bound of the outer-call retry contract
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
}

fn default_max_attempts() -> usize {
    DEFAULT_MAX_ATTEMPTS
}

impl SessionConfig {
    pub fn new(base_url: impl Into<String>, role: ClientRole) -> Self {
        Self {
            base_url: base_url.into(),
            role,
            api_key: None,
            user_agent: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// One logical tunnel connection.
///
/// Owns the rotating session pseudonym: every response either replaces
/// it (`Userpseudonym` header) or resets it to "0". Not synchronized;
/// each session belongs to one caller at a time.
pub struct VauSession {
    config: SessionConfig,
    cipher: Box<dyn CipherTransform>,
    transport: Arc<dyn OuterTransport>,
    pseudonym: String,
}

impl VauSession {
    pub fn new(
        config: SessionConfig,
        cipher: Box<dyn CipherTransform>,
        transport: Arc<dyn OuterTransport>,
    ) -> Result<Self> {
        Url::parse(&config.base_url)
            .map_err(|err| VauError::InvalidBaseUrl(format!("{}: {err}", config.base_url)))?;

        Ok(Self {
            config,
            cipher,
            transport,
            pseudonym: INITIAL_USER_PSEUDONYM.to_string(),
        })
    }

    /// Pseudonym the next outer request will target
    pub fn pseudonym(&self) -> &str {
        &self.pseudonym
    }

    /// Carry one already-encoded inner HTTP request through the tunnel.
    ///
    /// Performs a single outer POST (subject to the retry contract),
    /// rotates the session pseudonym from the outer response, and either
    /// decrypts and decodes the inner response or passes a plaintext
    /// gateway response through unchanged.
    pub fn send(
        &mut self,
        inner_request: &str,
        access_token: &str,
        resource_hint: Option<&str>,
    ) -> Result<InnerResponse> {
        let url = self.request_url();
        let headers = self.outbound_headers(resource_hint);
        let ciphertext = self.cipher.encrypt(access_token, inner_request.as_bytes());

        info!("Sending VAU request to {url}");
        let outer = with_retry(self.config.max_attempts, || {
            self.transport.post(&url, &headers, &ciphertext)
        })?;

        self.accept(outer)
    }

    fn outbound_headers(&self, resource_hint: Option<&str>) -> Vec<(String, String)> {
        let mut headers = vec![
            ("Content-Type".to_string(), OCTET_STREAM.to_string()),
            (
                HEADER_ERP_USER.to_string(),
                self.config.role.marker().to_string(),
            ),
        ];

        match resource_hint {
            Some(resource) => {
                let trimmed = resource.strip_prefix('/').unwrap_or(resource);
                headers.push((HEADER_ERP_RESOURCE.to_string(), trimmed.to_string()));
            }
            None => warn!("Resource hint isn't set"),
        }
        if let Some(user_agent) = &self.config.user_agent {
            debug!("Set header {HEADER_ERP_USER_AGENT} to {user_agent}");
            headers.push((HEADER_ERP_USER_AGENT.to_string(), user_agent.clone()));
        }
        if self.config.role == ClientRole::EndUserApp {
            if let Some(api_key) = &self.config.api_key {
                headers.push((HEADER_API_KEY.to_string(), api_key.clone()));
            }
        }

        headers
    }

    /// Rotate the pseudonym and classify the outer response.
    ///
    /// The pseudonym update happens exactly once per call, from the outer
    /// response, regardless of which classification branch is taken.
    fn accept(&mut self, outer: OuterResponse) -> Result<InnerResponse> {
        self.pseudonym = header_value(&outer.headers, HEADER_USER_PSEUDONYM)
            .unwrap_or(INITIAL_USER_PSEUDONYM)
            .to_string();

        let request_id = header_value(&outer.headers, HEADER_REQUEST_ID).unwrap_or("-");
        info!(
            "Received VAU response with status {} (X-Request-Id {request_id}) and pseudonym {}",
            outer.status, self.pseudonym
        );

        let encrypted = header_value(&outer.headers, "content-type")
            .is_some_and(|content_type| content_type.contains("octet-stream"));

        if encrypted {
            let plaintext = self.cipher.decrypt(&outer.body).map_err(|_| {
                // The token and any plaintext stay out of the log; the
                // ciphertext itself is safe to dump for diagnosis.
                error!(
                    "Failed to decrypt VAU response of length {}\n{}",
                    outer.body.len(),
                    encode_base64(&outer.body)
                );
                VauError::Decryption {
                    length: outer.body.len(),
                }
            })?;
            InnerResponse::decode(&plaintext)
        } else {
            // An intermediary answered before the tunnel: pass it through
            Ok(InnerResponse {
                protocol: HTTP_VERSION.to_string(),
                status_code: outer.status,
                headers: outer.headers,
                body: String::from_utf8_lossy(&outer.body).into_owned(),
            })
        }
    }

    fn request_url(&self) -> String {
        format!(
            "{}/{VAU_PATH_SEGMENT}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.pseudonym
        )
    }
}
