use thiserror::Error;

/// Error types for the VAU tunnel client
#[derive(Error, Debug)]
pub enum VauError {
    #[error("Malformed tunnel response: empty or non-textual payload")]
    MalformedResponse,

    #[error("Inner status line is missing the HTTP/1.1 protocol marker")]
    MissingProtocolMarker,

    #[error("Inner status line ended before a status code")]
    IncompleteStatusLine,

    #[error("Inner status code is not numeric: {0}")]
    InvalidStatusCode(String),

    #[error("Failed to decrypt tunnel response of {length} bytes")]
    Decryption { length: usize },

    #[error("Failed to acquire VAU certificate: {0}")]
    Certificate(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Outer request failed after {attempts} attempts, last error: {last}")]
    AttemptsExhausted { attempts: usize, last: String },

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Type alias for Results using VauError
pub type Result<T> = std::result::Result<T, VauError>;
