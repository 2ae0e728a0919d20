//! Supported target languages and their display names.

/// Target languages offered by the built-in selector, as
/// `(code, display name)` pairs.
pub const SUPPORTED: &[(&str, &str)] = &[
    ("en", "English"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
];

/// Display name for a language code.
///
/// Unknown codes pass through unchanged, so an unlisted-but-valid code still
/// renders as something rather than an error.
pub fn display_name(code: &str) -> &str {
    SUPPORTED
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
        .unwrap_or(code)
}

/// Whether `code` is in the built-in selector list.
pub fn is_supported(code: &str) -> bool {
    SUPPORTED.iter().any(|(c, _)| *c == code)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_resolve_to_names() {
        assert_eq!(display_name("en"), "English");
        assert_eq!(display_name("fr"), "French");
        assert_eq!(display_name("de"), "German");
        assert_eq!(display_name("it"), "Italian");
        assert_eq!(display_name("pt"), "Portuguese");
    }

    #[test]
    fn unknown_code_passes_through() {
        assert_eq!(display_name("nl"), "nl");
        assert_eq!(display_name(""), "");
    }

    #[test]
    fn supported_matches_the_table() {
        assert!(is_supported("en"));
        assert!(is_supported("pt"));
        assert!(!is_supported("es"));
        assert!(!is_supported("EN"));
    }
}
