//! Upload Watermarks
//!
//! Informational metadata naming the uploader and time. Not bound to the file
//! contents in any cryptographic way.

use chrono::{DateTime, SecondsFormat, Utc};

/// `CONFIDENTIAL - {text} - {user} - {now as ISO-8601}`
pub fn generate_watermark(text: &str, user: &str) -> String {
    generate_watermark_at(text, user, Utc::now())
}

/// Watermark stamped with an explicit instant
pub fn generate_watermark_at(text: &str, user: &str, at: DateTime<Utc>) -> String {
    format!(
        "CONFIDENTIAL - {} - {} - {}",
        text,
        user,
        at.to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watermark_format() {
        let at = DateTime::parse_from_rfc3339("2024-03-01T12:30:45.123Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(
            generate_watermark_at("plan.pdf", "bob@example.com", at),
            "CONFIDENTIAL - plan.pdf - bob@example.com - 2024-03-01T12:30:45.123Z"
        );
    }

    #[test]
    fn test_watermark_uses_current_time() {
        let before = Utc::now();
        let watermark = generate_watermark("a", "b");
        let stamp = watermark.rsplit(" - ").next().unwrap();
        let parsed = DateTime::parse_from_rfc3339(stamp).unwrap();
        assert!(parsed.timestamp_millis() >= before.timestamp_millis());
        assert!(stamp.ends_with('Z'));
    }
}
