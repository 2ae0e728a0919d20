//! Speech-synthesis capability seam.
//!
//! [`Synthesizer`] is deliberately small: one fire-and-forget `speak` call
//! with no retry and no recovery.  A backend may be entirely absent, in which
//! case the application carries `Capability::Unavailable` and the `speak`
//! command is reported as unsupported.

use thiserror::Error;

// ---------------------------------------------------------------------------
// SynthError
// ---------------------------------------------------------------------------

/// Errors that can occur when speaking a translation.
#[derive(Debug, Error)]
pub enum SynthError {
    /// The backend accepted the request but failed to render speech.
    #[error("speech synthesis failed: {0}")]
    Failed(String),
}

// ---------------------------------------------------------------------------
// Synthesizer trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface for speech-synthesis backends.
pub trait Synthesizer: Send + Sync {
    /// Speak `text` in the voice for `lang` (a target-language code).
    fn speak(&self, text: &str, lang: &str) -> Result<(), SynthError>;
}

// Compile-time assertion: Box<dyn Synthesizer> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn Synthesizer>) {}
};

// ---------------------------------------------------------------------------
// MockSynthesizer  (test-only)
// ---------------------------------------------------------------------------

/// A test double that records every `(text, lang)` pair spoken.
#[cfg(test)]
pub struct MockSynthesizer {
    spoken: std::sync::Mutex<Vec<(String, String)>>,
}

#[cfg(test)]
impl MockSynthesizer {
    pub fn new() -> Self {
        Self {
            spoken: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// All `(text, lang)` pairs seen so far.
    pub fn spoken(&self) -> Vec<(String, String)> {
        self.spoken.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl Synthesizer for MockSynthesizer {
    fn speak(&self, text: &str, lang: &str) -> Result<(), SynthError> {
        self.spoken
            .lock()
            .unwrap()
            .push((text.to_string(), lang.to_string()));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
