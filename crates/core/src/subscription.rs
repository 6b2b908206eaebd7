//! Disposal tokens for registered handlers.
//!
//! Every command and event handler the engine registers with the host
//! is paired with a [`Subscription`]. Releasing is idempotent, so
//! deactivation can sweep every slot without tracking which ones
//! already fired.

/// A releasable registration handle.
///
/// The host supplies the release action when it hands out the token;
/// the engine releases it on teardown (or earlier, for the
/// typed-character capture that only lives while a session is active).
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Wrap a host-side release action.
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A token with no release action, for hosts that do not need one.
    pub fn noop() -> Self {
        Self { release: None }
    }

    /// Release the registration. Safe to call more than once.
    pub fn release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }

    /// Returns true if the registration has already been released.
    pub fn is_released(&self) -> bool {
        self.release.is_none()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("released", &self.is_released())
            .finish()
    }
}
