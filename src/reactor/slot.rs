//! Single-occupancy storage for the installed reactor.

use std::sync::{Arc, PoisonError, RwLock};

use crate::error::{ReactorAlreadyInstalledError, ReactorNotInstalledError};

/// Holds at most one installed reactor.
///
/// The slot starts empty and moves to installed exactly once. Readers get
/// the same `Arc` that was installed, so identity is preserved across
/// lookups.
pub struct ReactorSlot<R: ?Sized> {
    installed: RwLock<Option<Arc<R>>>,
}

impl<R: ?Sized> ReactorSlot<R> {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self {
            installed: RwLock::new(None),
        }
    }

    /// Install `reactor` if the slot is empty.
    ///
    /// # Errors
    ///
    /// Returns [`ReactorAlreadyInstalledError`] if a reactor is already
    /// installed. The installed reactor is kept and `reactor` is dropped.
    pub fn install(&self, reactor: Arc<R>) -> Result<(), ReactorAlreadyInstalledError> {
        let mut installed = self
            .installed
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        if installed.is_some() {
            tracing::debug!("Rejected reactor install: slot already occupied");
            return Err(ReactorAlreadyInstalledError);
        }

        *installed = Some(reactor);
        tracing::debug!("Reactor installed");
        Ok(())
    }

    /// Get the installed reactor.
    ///
    /// # Errors
    ///
    /// Returns [`ReactorNotInstalledError`] if the slot is empty.
    pub fn current(&self) -> Result<Arc<R>, ReactorNotInstalledError> {
        self.installed
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(ReactorNotInstalledError)
    }

    /// Whether a reactor is installed.
    pub fn is_installed(&self) -> bool {
        self.installed
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Empty the slot without tearing down the previous reactor.
    ///
    /// Handles obtained from [`current`](Self::current) stay valid.
    #[cfg(any(test, feature = "test-support"))]
    pub fn reset(&self) {
        self.installed
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }
}

impl<R: ?Sized> Default for ReactorSlot<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ?Sized> std::fmt::Debug for ReactorSlot<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReactorSlot")
            .field("installed", &self.is_installed())
            .finish()
    }
}
