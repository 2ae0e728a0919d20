//! Retry-delay policy for network recognition errors.
//!
//! A pure function of the attempt count: the delay doubles per attempt from
//! a 1 s base and is capped at 30 s.  The caller owns the attempt counter
//! (see `session::RetryState`); this module only maps a count to a wait.

use std::time::Duration;

/// Base delay applied at attempt zero, in milliseconds.
pub const BASE_DELAY_MS: u64 = 1_000;

/// Ceiling for the computed delay, in milliseconds.
pub const MAX_DELAY_MS: u64 = 30_000;

/// Delay before the restart that follows network-error `attempt`.
///
/// Computed as `min(1000ms * 2^attempt, 30s)`.  The first recorded failure
/// is attempt 1, so the first wait is 2 s.
///
/// ```
/// use std::time::Duration;
/// use voice_translate::backoff::compute_delay;
///
/// assert_eq!(compute_delay(1), Duration::from_secs(2));
/// assert_eq!(compute_delay(4), Duration::from_secs(16));
/// assert_eq!(compute_delay(5), Duration::from_secs(30));
/// ```
pub fn compute_delay(attempt: u32) -> Duration {
    let ms = BASE_DELAY_MS
        .saturating_mul(2u64.saturating_pow(attempt))
        .min(MAX_DELAY_MS);
    Duration::from_millis(ms)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
