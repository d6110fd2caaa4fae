//! Data Cipher
//!
//! AES-256-GCM string encryption keyed from deploy-time configuration.
//!
//! ## Format
//! `base64(nonce[12] || ciphertext || tag[16])`
//!
//! ## Limitation
//! The key material ships with the client build. Anyone who can inspect the
//! client can recover it, so this gives no confidentiality against the client
//! holder. It only keeps values unreadable at rest in places the key is not.

use std::fmt;

use aes_gcm::{
    Aes256Gcm, Nonce,
    aead::{Aead, KeyInit, OsRng},
};
use rand::RngCore;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::{from_base64, sha256, to_base64};

/// Size of encryption key in bytes (256 bits)
pub const KEY_SIZE: usize = 32;

/// Size of nonce in bytes (96 bits for AES-GCM)
pub const NONCE_SIZE: usize = 12;

/// Cipher errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CipherError {
    #[error("Encryption key is not configured")]
    MissingKey,

    #[error("Failed to encrypt data")]
    EncryptFailed,

    #[error("Failed to decrypt data: {0}")]
    DecryptFailed(&'static str),
}

/// Symmetric cipher built from configured key material
///
/// The key material is hashed with SHA-256 to obtain the AES-256 key, so any
/// non-empty string is accepted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DataCipher {
    key: [u8; KEY_SIZE],
}

impl DataCipher {
    /// Build a cipher from key material (e.g. `ENCRYPTION_KEY`)
    pub fn new(key_material: &str) -> Result<Self, CipherError> {
        if key_material.is_empty() {
            return Err(CipherError::MissingKey);
        }
        Ok(Self {
            key: sha256(key_material.as_bytes()),
        })
    }

    /// Encrypt a string; every call uses a fresh random nonce
    pub fn encrypt(&self, plaintext: &str) -> Result<String, CipherError> {
        let cipher = Aes256Gcm::new((&self.key).into());

        let mut nonce_bytes = [0u8; NONCE_SIZE];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|_| CipherError::EncryptFailed)?;

        let mut combined = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        combined.extend_from_slice(&nonce_bytes);
        combined.extend_from_slice(&ciphertext);

        Ok(to_base64(&combined))
    }

    /// Decrypt a string produced by [`DataCipher::encrypt`]
    pub fn decrypt(&self, encrypted: &str) -> Result<String, CipherError> {
        let combined = from_base64(encrypted.trim())
            .map_err(|_| CipherError::DecryptFailed("invalid base64"))?;

        if combined.len() < NONCE_SIZE {
            return Err(CipherError::DecryptFailed("ciphertext too short"));
        }

        let cipher = Aes256Gcm::new((&self.key).into());
        let (nonce_bytes, ciphertext) = combined.split_at(NONCE_SIZE);

        let plaintext = cipher
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|_| CipherError::DecryptFailed("authentication failed"))?;

        String::from_utf8(plaintext).map_err(|_| CipherError::DecryptFailed("invalid UTF-8"))
    }
}

impl fmt::Debug for DataCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataCipher")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encryption_decryption() {
        let cipher = DataCipher::new("deploy-time-key").unwrap();
        let encrypted = cipher.encrypt("Quarterly numbers").unwrap();

        assert_ne!(encrypted, "Quarterly numbers");
        assert_eq!(cipher.decrypt(&encrypted).unwrap(), "Quarterly numbers");
    }

    #[test]
    fn test_nonce_is_fresh() {
        let cipher = DataCipher::new("deploy-time-key").unwrap();
        assert_ne!(cipher.encrypt("same").unwrap(), cipher.encrypt("same").unwrap());
    }

    #[test]
    fn test_wrong_key_fails() {
        let encrypted = DataCipher::new("key-a").unwrap().encrypt("secret").unwrap();
        let result = DataCipher::new("key-b").unwrap().decrypt(&encrypted);
        assert_eq!(
            result,
            Err(CipherError::DecryptFailed("authentication failed"))
        );
    }

    #[test]
    fn test_malformed_ciphertext_fails() {
        let cipher = DataCipher::new("deploy-time-key").unwrap();
        assert!(cipher.decrypt("not base64 !!").is_err());
        assert_eq!(
            cipher.decrypt(&to_base64(b"short")),
            Err(CipherError::DecryptFailed("ciphertext too short"))
        );

        let mut tampered = from_base64(&cipher.encrypt("data").unwrap()).unwrap();
        let last = tampered.len() - 1;
        tampered[last] ^= 0x01;
        assert!(cipher.decrypt(&to_base64(&tampered)).is_err());
    }

    #[test]
    fn test_empty_key_rejected() {
        assert_eq!(DataCipher::new("").unwrap_err(), CipherError::MissingKey);
    }

    #[test]
    fn test_debug_redaction() {
        let cipher = DataCipher::new("deploy-time-key").unwrap();
        assert!(format!("{:?}", cipher).contains("REDACTED"));
    }
}
