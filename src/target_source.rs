//! Hot-swappable target slot
//!
//! A thread-safe single-slot holder for the current target instance,
//! similar to Spring's HotSwappableTargetSource.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

/// The mutable holder of the current target reference.
///
/// Readers clone the current `Arc` under the read lock, so a read that
/// races with a `swap` observes either the old or the new target, never a
/// partially installed one. Exactly one target is live at a time.
pub struct HotSwappableTargetSource<T: ?Sized> {
    target: RwLock<Arc<T>>,
}

impl<T: ?Sized> HotSwappableTargetSource<T> {
    /// Creates a new target source holding the given initial target.
    pub fn new(initial: Arc<T>) -> Self {
        Self {
            target: RwLock::new(initial),
        }
    }

    /// Returns the current target. Potentially a different one on every call.
    pub fn target(&self) -> Arc<T> {
        Arc::clone(&self.target.read())
    }

    /// Installs a new target and returns the previous one.
    pub fn swap(&self, new_target: Arc<T>) -> Arc<T> {
        std::mem::replace(&mut *self.target.write(), new_target)
    }
}

impl<T: ?Sized> fmt::Debug for HotSwappableTargetSource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HotSwappableTargetSource")
            .finish_non_exhaustive()
    }
}
