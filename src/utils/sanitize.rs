//! Utilities for sanitizing user-supplied text.
//!
//! Removes control characters from titles, descriptions, and messages before
//! storing them, and provides length capping to prevent database bloat.

/// Sanitizes a string by removing control characters.
///
/// Control characters (0x00-0x1F, except newline/tab/carriage return) can
/// cause issues when stored in databases or displayed in logs. Non-ASCII
/// (UTF-8) content is preserved.
pub fn sanitize_text(message: &str) -> String {
    message
        .chars()
        .filter(|c| {
            let code = *c as u32;
            code >= 0x20 // Printable ASCII starts at 0x20 (space)
                || code == 0x09 // Tab
                || code == 0x0A // Newline
                || code == 0x0D // Carriage return
                || code > 0x7F // Allow non-ASCII (UTF-8)
        })
        .collect()
}

/// Sanitizes a string and truncates it to `max_len` characters.
///
/// Truncation is by character count, not bytes, so multi-byte content is
/// never split mid-codepoint.
pub fn sanitize_and_truncate(message: &str, max_len: usize) -> String {
    let sanitized = sanitize_text(message);
    if sanitized.chars().count() > max_len {
        sanitized.chars().take(max_len).collect()
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_removes_control_characters() {
        assert_eq!(sanitize_text("pot\x00hole\x07!"), "pothole!");
    }

    #[test]
    fn test_sanitize_preserves_whitespace_and_utf8() {
        assert_eq!(
            sanitize_text("line1\nline2\tcité"),
            "line1\nline2\tcité"
        );
    }

    #[test]
    fn test_truncate_by_characters() {
        assert_eq!(sanitize_and_truncate("abcdef", 4), "abcd");
        // Multi-byte characters count as one
        assert_eq!(sanitize_and_truncate("ééééé", 3), "ééé");
        assert_eq!(sanitize_and_truncate("short", 10), "short");
    }
}
