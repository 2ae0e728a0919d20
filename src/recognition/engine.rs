//! Recognition-engine capability seam.
//!
//! # Overview
//!
//! [`RecognitionEngine`] is the command half of the seam: the session
//! controller asks the engine to `open()` or `close()`.  The event half —
//! [`EngineEvent`] — flows back into the controller's event channel from
//! whatever backend implements the trait (a platform speech API, a network
//! recognizer, or the CLI's typed-input stand-in).
//!
//! Engines are configured for continuous mode with interim results off and a
//! fixed source language (see `RecognitionConfig`); only settled, final
//! results reach the controller.
//!
//! [`MockEngine`] (available under `#[cfg(test)]`) records `open`/`close`
//! calls so controller tests can assert on restart behaviour without a real
//! backend.

use thiserror::Error;

// ---------------------------------------------------------------------------
// EngineError
// ---------------------------------------------------------------------------

/// Errors that can arise when commanding the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine could not be started.  The controller treats this exactly
    /// like a network-class recognition error and enters the backoff path.
    #[error("recognition engine failed to start: {0}")]
    Start(String),
}

// ---------------------------------------------------------------------------
// EngineErrorKind
// ---------------------------------------------------------------------------

/// Classification of a recognition error reported by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineErrorKind {
    /// Connectivity loss between the engine and its backing service.
    /// Triggers the exponential-backoff retry path.
    Network,
    /// Anything else (no speech, audio capture hiccup, aborted request).
    /// Triggers a fixed-delay restart while the user still wants the session
    /// running; consumes no retry budget.
    Other(String),
}

impl std::fmt::Display for EngineErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineErrorKind::Network => write!(f, "network"),
            EngineErrorKind::Other(detail) => write!(f, "{detail}"),
        }
    }
}

// ---------------------------------------------------------------------------
// EngineEvent
// ---------------------------------------------------------------------------

/// Lifecycle and result events emitted by a recognition engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// The engine confirmed the session is open and capturing.
    Opened,
    /// A settled (non-interim) transcript for the most recent utterance.
    FinalResult(String),
    /// Recognition failed; the session may or may not still be open — a
    /// `Closed` event follows when it is not.
    Error(EngineErrorKind),
    /// The session is no longer open, whether by request or by failure.
    Closed,
}

// ---------------------------------------------------------------------------
// RecognitionEngine trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe command interface for recognition engines.
///
/// # Contract
///
/// - `open()` on an already-open engine is a no-op returning `Ok(())`.
/// - `close()` on a closed engine is a no-op.
/// - Every successfully opened session eventually emits [`EngineEvent::Opened`],
///   and every session — however it ends — eventually emits
///   [`EngineEvent::Closed`].  The controller's `Stopping` state relies on
///   that confirmation.
pub trait RecognitionEngine: Send + Sync {
    /// Ask the engine to open a recognition session.
    fn open(&self) -> Result<(), EngineError>;

    /// Ask the engine to close the current session.
    fn close(&self);
}

// Compile-time assertion: Box<dyn RecognitionEngine> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn RecognitionEngine>) {}
};

// ---------------------------------------------------------------------------
// MockEngine  (test-only)
// ---------------------------------------------------------------------------

/// A test double that records commands and optionally fails to open.
#[cfg(test)]
pub struct MockEngine {
    opens: std::sync::atomic::AtomicUsize,
    closes: std::sync::atomic::AtomicUsize,
    fail_open: Option<String>,
}

#[cfg(test)]
impl MockEngine {
    /// Create a mock whose `open()` always succeeds.
    pub fn ok() -> Self {
        Self {
            opens: std::sync::atomic::AtomicUsize::new(0),
            closes: std::sync::atomic::AtomicUsize::new(0),
            fail_open: None,
        }
    }

    /// Create a mock whose `open()` always fails with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            opens: std::sync::atomic::AtomicUsize::new(0),
            closes: std::sync::atomic::AtomicUsize::new(0),
            fail_open: Some(reason.into()),
        }
    }

    /// Number of `open()` calls seen so far.
    pub fn open_count(&self) -> usize {
        self.opens.load(std::sync::atomic::Ordering::SeqCst)
    }

    /// Number of `close()` calls seen so far.
    pub fn close_count(&self) -> usize {
        self.closes.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
impl RecognitionEngine for MockEngine {
    fn open(&self) -> Result<(), EngineError> {
        self.opens.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        match &self.fail_open {
            Some(reason) => Err(EngineError::Start(reason.clone())),
            None => Ok(()),
        }
    }

    fn close(&self) {
        self.closes.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_counts_commands() {
        let engine = MockEngine::ok();
        assert!(engine.open().is_ok());
        assert!(engine.open().is_ok());
        engine.close();
        assert_eq!(engine.open_count(), 2);
        assert_eq!(engine.close_count(), 1);
    }

    #[test]
    fn mock_failing_returns_start_error() {
        let engine = MockEngine::failing("microphone denied");
        let err = engine.open().unwrap_err();
        assert!(err.to_string().contains("microphone denied"));
        assert_eq!(engine.open_count(), 1);
    }

    #[test]
    fn error_kind_display() {
        assert_eq!(EngineErrorKind::Network.to_string(), "network");
        assert_eq!(
            EngineErrorKind::Other("no-speech".into()).to_string(),
            "no-speech"
        );
    }

    #[test]
    fn box_dyn_engine_compiles() {
        // If this test compiles, the trait is object-safe.
        let engine: Box<dyn RecognitionEngine> = Box::new(MockEngine::ok());
        let _ = engine.open();
    }
}
