//! # Lifecycle Guard
//!
//! Environment hook that asks for confirmation before unsaved state is
//! discarded (the "leaving page" event of a hosting shell).
//!
//! The guard closure is registered once at session construction and
//! unregistered once at teardown; it consults the dirty flag at fire time,
//! so registration is never re-evaluated per mutation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Confirmation message returned while unsaved changes exist.
pub const UNSAVED_CHANGES_MESSAGE: &str =
    "Leave this page? The system may not save your changes.";

/// Shared view of the document's dirty flag, readable at guard fire time.
#[derive(Debug, Clone, Default)]
pub struct DirtyFlag(Arc<AtomicBool>);

impl DirtyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, dirty: bool) {
        self.0.store(dirty, Ordering::Relaxed);
    }

    pub fn get(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Closure the environment invokes when it is about to discard state.
///
/// Returns a confirmation message while unsaved changes exist, `None` when
/// no confirmation is needed.
pub type ConfirmGuard = Arc<dyn Fn() -> Option<String> + Send + Sync>;

/// Environment-level "leaving page" hook.
pub trait LifecycleHook: Send {
    fn register(&mut self, guard: ConfirmGuard);
    fn unregister(&mut self);
}

/// Hook for hosts without an unload event (headless embedders, tests).
#[derive(Debug, Default)]
pub struct NullLifecycleHook;

impl LifecycleHook for NullLifecycleHook {
    fn register(&mut self, _guard: ConfirmGuard) {}

    fn unregister(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirty_flag_is_shared() {
        let flag = DirtyFlag::new();
        let view = flag.clone();

        assert!(!view.get());
        flag.set(true);
        assert!(view.get());
        flag.set(false);
        assert!(!view.get());
    }
}
