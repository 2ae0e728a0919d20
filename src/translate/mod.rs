//! Translation module for voice-translate.
//!
//! This module provides:
//! * [`Translator`] — async trait implemented by translation backends.
//! * [`GoogleTranslator`] — unauthenticated `translate_a/single` client.
//! * [`TranslationResult`] — a transcript paired with its translation.
//! * [`TranslateError`] — error variants for translation calls.

pub mod client;

pub use client::{GoogleTranslator, TranslateError, Translator};

#[cfg(test)]
pub use client::MockTranslator;

// ---------------------------------------------------------------------------
// TranslationResult
// ---------------------------------------------------------------------------

/// A completed translation: the transcript it was derived from, the target
/// language it was requested for, and the translated text.
///
/// Recomputed in full whenever the transcript or the selected target language
/// changes — translations are never patched incrementally.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationResult {
    /// The transcript that was translated.
    pub source_text: String,
    /// Target language code the translation was requested for.
    pub target_lang: String,
    /// The translated text.
    pub translated_text: String,
}
