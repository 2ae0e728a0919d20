//! Recognition capability seam for voice-translate.
//!
//! This module provides:
//! * [`RecognitionEngine`] — command interface (`open` / `close`).
//! * [`EngineEvent`] / [`EngineErrorKind`] — events flowing back into the
//!   session controller.
//! * [`EngineError`] — synchronous command failures.

pub mod engine;

pub use engine::{EngineError, EngineErrorKind, EngineEvent, RecognitionEngine};

#[cfg(test)]
pub use engine::MockEngine;
