//! Confidential transport-tunnel (VAU) session client
//!
//! Carries ordinary request/response HTTP exchanges inside an outer,
//! encrypted channel toward a backend that only accepts opaque
//! ciphertext on its public endpoint. The inner-HTTP framing lives in
//! `vau-tunnel-common`; this crate adds the stateful pieces: the
//! session client with its rotating pseudonym, the certificate
//! provider, the retry contract and the seams for the cipher scheme
//! and the outer HTTP transport.
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use vau_tunnel_client::{
//!     CertificateCache, CertificateProvider, ClientRole, ReqwestTransport, SessionConfig,
//!     VauSession,
//! };
//! # use vau_tunnel_client::{CipherTransform, IntegrityError};
//! # struct MyCipher;
//! # impl CipherTransform for MyCipher {
//! #     fn encrypt(&self, _: &str, p: &[u8]) -> Vec<u8> { p.to_vec() }
//! #     fn decrypt(&self, c: &[u8]) -> Result<Vec<u8>, IntegrityError> { Ok(c.to_vec()) }
//! # }
//! use vau_tunnel_common::{InnerRequest, Method};
//!
//! # fn main() -> vau_tunnel_common::Result<()> {
//! let config = SessionConfig::new("https://erp.example.de", ClientRole::ProviderSide);
//! let transport = Arc::new(
//!     ReqwestTransport::new(Duration::from_secs(10))
//!         .map_err(|e| vau_tunnel_common::VauError::Transport(e.to_string()))?,
//! );
//!
//! let provider = CertificateProvider::new(
//!     config.clone(),
//!     transport.clone(),
//!     Arc::new(CertificateCache::new()),
//! );
//! let _public_key = provider.get()?.public_key()?;
//! // ... hand the key material to the concrete cipher scheme ...
//!
//! let mut session = VauSession::new(config, Box::new(MyCipher), transport)?;
//! let inner = InnerRequest::new(Method::Get, "/Task/4711")
//!     .header("accept", "application/fhir+json")
//!     .encode();
//! let response = session.send(&inner, "access-token", Some("/Task"))?;
//! assert!(response.is_success());
//! # Ok(())
//! # }
//! ```

pub mod certs;
pub mod cipher;
pub mod retry;
pub mod session;
pub mod transport;

// Re-export commonly used types for convenience
pub use certs::{CertificateCache, CertificateProvider, VauCertificate};
pub use cipher::{CipherTransform, IntegrityError};
pub use retry::with_retry;
pub use session::{ClientRole, SessionConfig, VauSession};
pub use transport::{OuterResponse, OuterTransport, ReqwestTransport, TransportError};
