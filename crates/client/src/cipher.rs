use thiserror::Error;

/// Raised when ciphertext fails its authenticity check during decryption,
/// e.g. on an authentication-tag mismatch. Never retried: a tampered or
/// mismatched payload stays tampered.
#[derive(Debug, Error)]
#[error("Ciphertext failed its integrity check")]
pub struct IntegrityError;

/// The encryption capability the tunnel consumes.
///
/// The session client never looks inside the ciphertext; any concrete,
/// version-tagged scheme can stand behind this trait as long as it turns
/// inner-HTTP bytes into an opaque payload and back.
pub trait CipherTransform: Send + Sync {
    /// Encrypt the inner request bytes, binding the caller's access token
    /// into the payload.
    fn encrypt(&self, access_token: &str, plaintext: &[u8]) -> Vec<u8>;

    /// Decrypt an outer response body. Fails with [`IntegrityError`] when
    /// the payload does not authenticate.
    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, IntegrityError>;
}


#[cfg(test)]
mod tests {
    use super::testing::TaggingCipher;
    use super::*;
    use std::sync::atomic::Ordering;

    #[test]
    fn test_tagging_cipher_roundtrip() {
        let cipher = TaggingCipher::default();
        let ciphertext = cipher.encrypt("token", b"GET /Task HTTP/1.1\r\n\r\n");
        let plaintext = cipher.decrypt(&ciphertext).unwrap();

        assert_eq!(plaintext, b"GET /Task HTTP/1.1\r\n\r\n");
        assert_eq!(cipher.encrypt_calls.load(Ordering::SeqCst), 1);
        assert_eq!(cipher.decrypt_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_tampered_ciphertext_fails_integrity() {
        let cipher = TaggingCipher::default();
        assert!(cipher.decrypt(b"not a sealed payload").is_err());
    }

    #[test]
    fn test_integrity_error_display() {
        assert_eq!(
            IntegrityError.to_string(),
            "Ciphertext failed its integrity check"
        );
    }
}
