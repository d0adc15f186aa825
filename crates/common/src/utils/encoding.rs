use base64::{Engine as _, engine::general_purpose::STANDARD};

/// Encode bytes to Base64 string, used for ciphertext diagnostics
pub fn encode_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decode Base64 string to bytes
pub fn decode_base64(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(encoded)
}
