//! Platform Crate - Client Security Utilities
//!
//! This crate provides the stateless building blocks of the DDCursor client:
//! - Password policy checks
//! - File name sanitization and upload pre-checks
//! - Sensitive data masking and upload watermarks
//! - Random tokens, session correlation ids and API keys
//! - AES-256-GCM data cipher and SHA-256 hashing
//! - Login lockout policy and environment configuration
//!
//! Nothing in here performs network I/O.

pub mod cipher;
pub mod config;
pub mod crypto;
pub mod file;
pub mod lockout;
pub mod mask;
pub mod password;
pub mod watermark;
