//! Sensitive Data Masking
//!
//! Display-only redaction for emails, phone numbers and SSNs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of value being masked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensitiveKind {
    Email,
    Phone,
    Ssn,
}

impl SensitiveKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SensitiveKind::Email => "email",
            SensitiveKind::Phone => "phone",
            SensitiveKind::Ssn => "ssn",
        }
    }
}

impl fmt::Display for SensitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SensitiveKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(SensitiveKind::Email),
            "phone" => Ok(SensitiveKind::Phone),
            "ssn" => Ok(SensitiveKind::Ssn),
            other => Err(format!("unknown sensitive data kind: {}", other)),
        }
    }
}

/// Mask `data` for display
///
/// - email: first and last character of the local part kept, interior replaced
///   by `*` (at least one, so a two-character local part is still masked),
///   domain unchanged. A one-character local part is replaced entirely.
///   Input without `@` is masked as a bare local part.
/// - phone: `***-***-` + last four characters
/// - ssn: `***-**-` + last four characters
pub fn mask_sensitive_data(data: &str, kind: SensitiveKind) -> String {
    match kind {
        SensitiveKind::Email => mask_email(data),
        SensitiveKind::Phone => format!("***-***-{}", last_chars(data, 4)),
        SensitiveKind::Ssn => format!("***-**-{}", last_chars(data, 4)),
    }
}

fn mask_email(data: &str) -> String {
    match data.split_once('@') {
        Some((local, domain)) => format!("{}@{}", mask_local_part(local), domain),
        None => mask_local_part(data),
    }
}

fn mask_local_part(local: &str) -> String {
    let chars: Vec<char> = local.chars().collect();
    match chars.as_slice() {
        [first, interior @ .., last] => {
            let mut masked = String::with_capacity(local.len());
            masked.push(*first);
            masked.extend(std::iter::repeat_n('*', interior.len().max(1)));
            masked.push(*last);
            masked
        }
        short => "*".repeat(short.len()),
    }
}

/// Last `n` characters, or the whole string when shorter
fn last_chars(data: &str, n: usize) -> &str {
    let count = data.chars().count();
    if count <= n {
        return data;
    }
    match data.char_indices().nth(count - n) {
        Some((idx, _)) => &data[idx..],
        None => data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_email() {
        assert_eq!(
            mask_sensitive_data("ab@example.com", SensitiveKind::Email),
            "a*b@example.com"
        );
        assert_eq!(
            mask_sensitive_data("abc@example.com", SensitiveKind::Email),
            "a*c@example.com"
        );
        assert_eq!(
            mask_sensitive_data("jonathan@example.com", SensitiveKind::Email),
            "j******n@example.com"
        );
    }

    #[test]
    fn test_mask_email_short_local_part() {
        assert_eq!(
            mask_sensitive_data("a@example.com", SensitiveKind::Email),
            "*@example.com"
        );
        assert_eq!(
            mask_sensitive_data("@example.com", SensitiveKind::Email),
            "@example.com"
        );
    }

    #[test]
    fn test_mask_email_without_domain() {
        assert_eq!(mask_sensitive_data("someone", SensitiveKind::Email), "s*****e");
    }

    #[test]
    fn test_mask_phone() {
        assert_eq!(
            mask_sensitive_data("5551234567", SensitiveKind::Phone),
            "***-***-4567"
        );
        assert_eq!(
            mask_sensitive_data("(555) 123-4567", SensitiveKind::Phone),
            "***-***-4567"
        );
        assert_eq!(mask_sensitive_data("12", SensitiveKind::Phone), "***-***-12");
    }

    #[test]
    fn test_mask_ssn() {
        assert_eq!(
            mask_sensitive_data("123-45-6789", SensitiveKind::Ssn),
            "***-**-6789"
        );
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("email".parse::<SensitiveKind>(), Ok(SensitiveKind::Email));
        assert!("iban".parse::<SensitiveKind>().is_err());

        let kind: SensitiveKind = serde_json::from_str(r#""ssn""#).unwrap();
        assert_eq!(kind, SensitiveKind::Ssn);
        assert_eq!(SensitiveKind::Phone.to_string(), "phone");
    }
}
