//! File Name and Upload Checks
//!
//! Pre-upload validation run on the client before a document is sent to
//! object storage.

use thiserror::Error;

use crate::watermark::generate_watermark;

/// Bytes per megabyte, for user-facing size messages
const BYTES_PER_MB: u64 = 1024 * 1024;

/// Upload rejection reasons
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("Invalid file type. Allowed types: {}", allowed.join(", "))]
    InvalidType { allowed: Vec<String> },

    #[error("File too large. Maximum size: {}MB", format_megabytes(*max_size))]
    TooLarge { size: u64, max_size: u64 },
}

/// Whole megabytes print without decimals, anything else with two
fn format_megabytes(bytes: u64) -> String {
    if bytes % BYTES_PER_MB == 0 {
        (bytes / BYTES_PER_MB).to_string()
    } else {
        format!("{:.2}", bytes as f64 / BYTES_PER_MB as f64)
    }
}

/// Replace every character outside `[A-Za-z0-9.-]` with `_`
///
/// Character count and order are preserved, and the function is idempotent.
/// Dots are kept, so `..` survives: callers joining paths must not treat the
/// result as a safe relative path on its own.
pub fn sanitize_file_name(file_name: &str) -> String {
    file_name
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '.' || ch == '-' {
                ch
            } else {
                '_'
            }
        })
        .collect()
}

/// Lower-cased text after the last `.`, if any
pub fn file_extension(file_name: &str) -> Option<String> {
    let (_, extension) = file_name.rsplit_once('.')?;
    if extension.is_empty() {
        return None;
    }
    Some(extension.to_lowercase())
}

/// `true` iff the file's extension is one of `allowed_types` (lowercase)
pub fn validate_file_type<S: AsRef<str>>(file_name: &str, allowed_types: &[S]) -> bool {
    match file_extension(file_name) {
        Some(extension) => allowed_types.iter().any(|t| t.as_ref() == extension),
        None => false,
    }
}

/// `true` iff `size <= limit`
pub fn validate_file_size(size: u64, limit: u64) -> bool {
    size <= limit
}

/// A file accepted for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedUpload {
    /// Name to store the object under
    pub sanitized_name: String,
    /// Informational watermark for the object metadata
    pub watermark: String,
}

/// Allowed extensions and size limit for document uploads
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub allowed_types: Vec<String>,
    pub max_file_size: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            allowed_types: ["pdf", "doc", "docx", "txt", "md"]
                .into_iter()
                .map(String::from)
                .collect(),
            max_file_size: 10 * BYTES_PER_MB,
        }
    }
}

impl UploadPolicy {
    pub fn new(allowed_types: Vec<String>, max_file_size: u64) -> Self {
        Self {
            allowed_types: allowed_types
                .into_iter()
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
            max_file_size,
        }
    }

    /// Check type then size
    pub fn check(&self, file_name: &str, size: u64) -> Result<(), UploadError> {
        if !validate_file_type(file_name, &self.allowed_types) {
            return Err(UploadError::InvalidType {
                allowed: self.allowed_types.clone(),
            });
        }
        if !validate_file_size(size, self.max_file_size) {
            return Err(UploadError::TooLarge {
                size,
                max_size: self.max_file_size,
            });
        }
        Ok(())
    }

    /// Check a file and produce its storage name and watermark
    pub fn prepare(
        &self,
        file_name: &str,
        size: u64,
        uploader: &str,
    ) -> Result<PreparedUpload, UploadError> {
        self.check(file_name, size)?;

        let sanitized_name = sanitize_file_name(file_name);
        let watermark = generate_watermark(&sanitized_name, uploader);

        Ok(PreparedUpload {
            sanitized_name,
            watermark,
        })
    }
}
