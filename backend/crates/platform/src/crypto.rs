//! Cryptographic Utilities
//!
//! Random identifiers, API keys and digests. Every generator draws from the
//! operating system CSPRNG.
//!
//! ## Formats
//! - Secure token: `length` random bytes, lowercase hex
//! - API key: `ddc_` + 32 random bytes as hex (68 characters)
//! - Session correlation id: `{unix_millis}-{9 base36 characters}`
//!
//! The validators here are syntactic only. Nothing is looked up in a registry
//! and nothing expires.

use base64::{Engine, engine::general_purpose};
use chrono::{DateTime, Utc};
use rand::{Rng, RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};

/// Default number of random bytes in a secure token
pub const DEFAULT_TOKEN_BYTES: usize = 32;

/// Minimum accepted token length in hex characters
pub const MIN_TOKEN_LENGTH: usize = 32;

/// Literal prefix of every workspace API key
pub const API_KEY_PREFIX: &str = "ddc_";

/// Random bytes behind an API key
pub const API_KEY_BYTES: usize = 32;

/// Total API key length: prefix + two hex characters per byte
pub const API_KEY_LENGTH: usize = API_KEY_PREFIX.len() + API_KEY_BYTES * 2;

/// Number of base36 characters after the timestamp in a session id
pub const SESSION_ID_SUFFIX_LENGTH: usize = 9;

const BASE36_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Compute SHA-256 hash
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// SHA-256 of a string, lowercase hex
pub fn generate_hash(data: &str) -> String {
    hex::encode(sha256(data.as_bytes()))
}

/// Encode bytes as base64
pub fn to_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// Decode base64 to bytes
pub fn from_base64(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::STANDARD.decode(s)
}

// ============================================================================
// Tokens
// ============================================================================

/// Generate `length` random bytes as lowercase hex (`2 * length` characters)
pub fn generate_secure_token(length: usize) -> String {
    hex::encode(random_bytes(length))
}

/// Generate a token of [`DEFAULT_TOKEN_BYTES`] bytes
pub fn generate_token() -> String {
    generate_secure_token(DEFAULT_TOKEN_BYTES)
}

/// Check that a token is at least [`MIN_TOKEN_LENGTH`] lowercase hex digits
pub fn validate_token(token: &str) -> bool {
    token.len() >= MIN_TOKEN_LENGTH && token.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

// ============================================================================
// Session correlation ids
// ============================================================================

/// Generate a session correlation id stamped with the current time
///
/// The timestamp is public and the random part is narrow, so this is a
/// correlation id for logs and never a credential.
pub fn generate_session_id() -> String {
    generate_session_id_at(Utc::now())
}

/// Generate a session correlation id stamped with `at`
pub fn generate_session_id_at(at: DateTime<Utc>) -> String {
    let mut rng = OsRng;
    let suffix: String = (0..SESSION_ID_SUFFIX_LENGTH)
        .map(|_| BASE36_ALPHABET[rng.gen_range(0..BASE36_ALPHABET.len())] as char)
        .collect();
    format!("{}-{}", at.timestamp_millis(), suffix)
}

/// Syntactic session id check: non-empty and contains a `-`
pub fn validate_session(session_id: &str) -> bool {
    !session_id.is_empty() && session_id.contains('-')
}

// ============================================================================
// API keys
// ============================================================================

/// Generate a workspace API key (`ddc_` + 64 hex characters)
pub fn generate_api_key() -> String {
    format!("{}{}", API_KEY_PREFIX, generate_secure_token(API_KEY_BYTES))
}

/// Check prefix and length (in characters) of an API key
///
/// The remainder is not checked for hex digits.
pub fn validate_api_key(api_key: &str) -> bool {
    api_key.starts_with(API_KEY_PREFIX) && api_key.chars().count() == API_KEY_LENGTH
}
