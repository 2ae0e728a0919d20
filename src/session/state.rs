//! Session state machine types.
//!
//! [`SessionState`] tracks whether a recognition session is actually open;
//! user intent (whether the user *wants* it open) lives separately in the
//! controller, since the two diverge briefly during restarts and errors.
//!
//! [`RetryState`] is the network-error retry budget: incremented per network
//! failure, reset on any successful final transcript or explicit start/retry.

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// States of the speech-recognition session.
///
/// The state machine transitions are:
///
/// ```text
/// Idle ──start/retry──▶ Starting ──engine opened──▶ Listening
/// Listening ──stop──▶ Stopping ──engine closed──▶ Idle
/// Listening / Starting ──engine closed──▶ Idle (restart scheduled while
///                                         intent holds)
/// any state ──retry budget exhausted──▶ Errored
/// Errored ──start / retry──▶ Starting
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No recognition session open; nothing scheduled unless intent holds.
    Idle,

    /// The engine has been asked to open; waiting for its confirmation.
    Starting,

    /// The engine reports itself active and is capturing speech.
    Listening,

    /// The engine has been asked to close; waiting for its confirmation.
    Stopping,

    /// The retry budget is exhausted.  No automatic restart will be
    /// scheduled until an explicit start or retry command.
    Errored,
}

impl SessionState {
    /// Returns `true` while a recognition session is open or opening.
    ///
    /// Restart attempts are suppressed in these states so two sessions can
    /// never overlap.
    ///
    /// ```
    /// use voice_translate::session::SessionState;
    ///
    /// assert!(!SessionState::Idle.is_open());
    /// assert!(SessionState::Starting.is_open());
    /// assert!(SessionState::Listening.is_open());
    /// assert!(!SessionState::Errored.is_open());
    /// ```
    pub fn is_open(&self) -> bool {
        matches!(self, SessionState::Starting | SessionState::Listening)
    }

    /// A short human-readable label suitable for display in a status line.
    pub fn label(&self) -> &'static str {
        match self {
            SessionState::Idle => "Idle",
            SessionState::Starting => "Starting",
            SessionState::Listening => "Listening",
            SessionState::Stopping => "Stopping",
            SessionState::Errored => "Error",
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::Idle
    }
}

// ---------------------------------------------------------------------------
// RetryState
// ---------------------------------------------------------------------------

/// Network-error retry budget.
///
/// `attempts` never exceeds `max_attempts`; hitting the ceiling is what moves
/// the session to [`SessionState::Errored`].
#[derive(Debug, Clone)]
pub struct RetryState {
    attempts: u32,
    max_attempts: u32,
}

impl RetryState {
    /// A fresh budget of `max_attempts` retries.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            attempts: 0,
            max_attempts,
        }
    }

    /// Current attempt count.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Record one more failed attempt and return the new count.
    ///
    /// Saturates at `max_attempts`.
    pub fn record_failure(&mut self) -> u32 {
        self.attempts = (self.attempts + 1).min(self.max_attempts);
        self.attempts
    }

    /// Whether the budget is used up.
    pub fn exhausted(&self) -> bool {
        self.attempts >= self.max_attempts
    }

    /// Reset the count to zero (successful transcript or explicit
    /// start/retry).
    pub fn reset(&mut self) {
        self.attempts = 0;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ---- SessionState::is_open ---

    #[test]
    fn idle_is_not_open() {
        assert!(!SessionState::Idle.is_open());
    }

    #[test]
    fn starting_is_open() {
        assert!(SessionState::Starting.is_open());
    }

    #[test]
    fn listening_is_open() {
        assert!(SessionState::Listening.is_open());
    }

    #[test]
    fn stopping_is_not_open() {
        assert!(!SessionState::Stopping.is_open());
    }

    #[test]
    fn errored_is_not_open() {
        assert!(!SessionState::Errored.is_open());
    }

    // ---- SessionState::label / Default ---

    #[test]
    fn labels_are_stable() {
        assert_eq!(SessionState::Idle.label(), "Idle");
        assert_eq!(SessionState::Listening.label(), "Listening");
        assert_eq!(SessionState::Errored.label(), "Error");
    }

    #[test]
    fn default_state_is_idle() {
        assert_eq!(SessionState::default(), SessionState::Idle);
    }

    // ---- RetryState ---

    #[test]
    fn fresh_budget_is_zero_and_not_exhausted() {
        let retry = RetryState::new(5);
        assert_eq!(retry.attempts(), 0);
        assert!(!retry.exhausted());
    }

    #[test]
    fn record_failure_counts_up_to_max() {
        let mut retry = RetryState::new(5);
        for expected in 1..=5 {
            assert_eq!(retry.record_failure(), expected);
        }
        assert!(retry.exhausted());
    }

    #[test]
    fn record_failure_saturates_at_max() {
        let mut retry = RetryState::new(2);
        retry.record_failure();
        retry.record_failure();
        assert_eq!(retry.record_failure(), 2);
        assert!(retry.exhausted());
    }

    #[test]
    fn reset_clears_the_count() {
        let mut retry = RetryState::new(5);
        retry.record_failure();
        retry.record_failure();
        retry.reset();
        assert_eq!(retry.attempts(), 0);
        assert!(!retry.exhausted());
    }

    #[test]
    fn zero_budget_is_exhausted_immediately() {
        let retry = RetryState::new(0);
        assert!(retry.exhausted());
    }
}
