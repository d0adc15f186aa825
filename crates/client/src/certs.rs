use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::{debug, info};
use x509_parser::pem::parse_x509_pem;
use x509_parser::prelude::{FromDer, X509Certificate};

use vau_tunnel_common::constants::{
    HEADER_API_KEY, HEADER_ERP_USER_AGENT, VAU_CERTIFICATE_PATH_SEGMENT,
};
use vau_tunnel_common::{Result, VauError};

use crate::retry::with_retry;
use crate::session::{ClientRole, SessionConfig};
use crate::transport::OuterTransport;

/// The backend's VAU public-key certificate, validated as X.509 at
/// construction. Keeps the raw DER so a cipher scheme can pick the key
/// material it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VauCertificate {
    der: Vec<u8>,
}

impl VauCertificate {
    /// Accepts DER directly or a PEM-wrapped certificate body.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let der = if data.trim_ascii_start().starts_with(b"-----BEGIN") {
            let (_, pem) =
                parse_x509_pem(data).map_err(|err| VauError::Certificate(err.to_string()))?;
            pem.contents
        } else {
            data.to_vec()
        };

        // Validate eagerly so a garbage endpoint body fails at fetch time
        X509Certificate::from_der(&der).map_err(|err| VauError::Certificate(err.to_string()))?;

        Ok(Self { der })
    }

    pub fn der(&self) -> &[u8] {
        &self.der
    }

    /// Raw subject-public-key bits, the input for cipher construction
    pub fn public_key(&self) -> Result<Vec<u8>> {
        let (_, cert) = X509Certificate::from_der(&self.der)
            .map_err(|err| VauError::Certificate(err.to_string()))?;
        Ok(cert.public_key().subject_public_key.data.to_vec())
    }
}

/// One-shot certificate store shared between sessions.
///
/// Population is guarded so at most one fetch runs under concurrent
/// first use; a failed fetch leaves the cell empty so a later call can
/// retry from scratch. Owned by whoever constructs sessions, not hidden
/// in process-global state.
#[derive(Debug, Default)]
pub struct CertificateCache {
    cell: OnceCell<VauCertificate>,
}

impl CertificateCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<&VauCertificate> {
        self.cell.get()
    }

    pub fn get_or_fetch<F>(&self, fetch: F) -> Result<&VauCertificate>
    where
        F: FnOnce() -> Result<VauCertificate>,
    {
        self.cell.get_or_try_init(fetch)
    }
}

/// Fetches the backend certificate from `{base_url}/VAUCertificate`
/// once and serves it from the shared cache afterwards.
pub struct CertificateProvider {
    config: SessionConfig,
    transport: Arc<dyn OuterTransport>,
    cache: Arc<CertificateCache>,
}

impl CertificateProvider {
    pub fn new(
        config: SessionConfig,
        transport: Arc<dyn OuterTransport>,
        cache: Arc<CertificateCache>,
    ) -> Self {
        Self {
            config,
            transport,
            cache,
        }
    }

    /// Get the cached certificate, fetching it on first use.
    pub fn get(&self) -> Result<&VauCertificate> {
        self.cache.get_or_fetch(|| self.fetch())
    }

    fn fetch(&self) -> Result<VauCertificate> {
        let url = self.certificate_url();
        info!("Requesting VAU certificate from {url}");

        let mut headers = Vec::new();
        if self.config.role == ClientRole::EndUserApp {
            if let Some(api_key) = &self.config.api_key {
                headers.push((HEADER_API_KEY.to_string(), api_key.clone()));
            }
        }
        if let Some(user_agent) = &self.config.user_agent {
            headers.push((HEADER_ERP_USER_AGENT.to_string(), user_agent.clone()));
        }

        let response = with_retry(self.config.max_attempts, || {
            self.transport.get(&url, &headers)
        })?;

        let certificate = VauCertificate::from_bytes(&response.body)?;
        debug!(
            "Received VAU certificate ({} DER bytes)",
            certificate.der().len()
        );
        Ok(certificate)
    }

    fn certificate_url(&self) -> String {
        format!(
            "{}/{VAU_CERTIFICATE_PATH_SEGMENT}",
            self.config.base_url.trim_end_matches('/')
        )
    }
}
