//! Common types for the VAU tunnel client
//!
//! This crate provides the inner-HTTP wire codec, the shared error
//! taxonomy and small utilities used by the session client crate.

pub mod constants;
pub mod error;
pub mod protocol;
pub mod utils;

// Re-export commonly used types for convenience
pub use error::{Result, VauError};
pub use protocol::{InnerRequest, InnerResponse, Method};
pub use utils::{decode_base64, encode_base64, header_value, headers_to_map};
