//! Speech-session module for voice-translate.
//!
//! This module provides:
//! * [`SessionController`] — the recognition-lifecycle state machine.
//! * [`SessionState`] / [`RetryState`] — session and retry-budget state.
//! * [`SessionCommand`] / [`SessionEvent`] / [`UiEvent`] — the message types
//!   flowing in and out of the controller.

pub mod controller;
pub mod events;
pub mod state;

pub use controller::SessionController;
pub use events::{SessionCommand, SessionEvent, UiEvent};
pub use state::{RetryState, SessionState};
