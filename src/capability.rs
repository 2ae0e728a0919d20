//! Available/Unavailable wrapper for optional platform backends.
//!
//! Capabilities are resolved once at startup and injected; consumers branch
//! on availability instead of probing the platform themselves.  A missing
//! capability is an expected configuration, not an error.

/// An optional backend, resolved at startup.
///
/// Like `Option`, but named for the intent: `Unavailable` means the platform
/// cannot provide the backend at all, and the feature it powers should be
/// reported as unsupported rather than retried.
#[derive(Debug, Clone)]
pub enum Capability<T> {
    /// The backend exists and can be used.
    Available(T),
    /// The platform does not provide this backend.
    Unavailable,
}

impl<T> Capability<T> {
    /// Whether the backend is present.
    pub fn is_available(&self) -> bool {
        matches!(self, Capability::Available(_))
    }

    /// Borrow the backend, if present.
    pub fn as_ref(&self) -> Capability<&T> {
        match self {
            Capability::Available(value) => Capability::Available(value),
            Capability::Unavailable => Capability::Unavailable,
        }
    }
}

impl<T> From<Option<T>> for Capability<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Capability::Available(value),
            None => Capability::Unavailable,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn availability_predicate() {
        assert!(Capability::Available(1).is_available());
        assert!(!Capability::<i32>::Unavailable.is_available());
    }

    #[test]
    fn as_ref_preserves_the_variant() {
        let cap = Capability::Available(String::from("backend"));
        match cap.as_ref() {
            Capability::Available(s) => assert_eq!(s, "backend"),
            Capability::Unavailable => panic!("expected Available"),
        }
    }

    #[test]
    fn from_option_maps_both_ways() {
        assert!(Capability::from(Some(1)).is_available());
        assert!(!Capability::<i32>::from(None).is_available());
    }
}
