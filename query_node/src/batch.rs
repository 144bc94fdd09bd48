//! Batch context
//!
//! A thread-local flag tells every query node whether it is being evaluated
//! inside a batch. While the flag is set, terminal calls return pending nodes
//! instead of invoking their callback.
//!
//! The flag is only ever changed through [`BatchScope`], which restores the
//! previous value when dropped. Nested scopes, early returns and panics all
//! leave the flag exactly as the enclosing scope found it.

use std::{cell::Cell, marker::PhantomData};

thread_local! {
    static IN_BATCH: Cell<bool> = const { Cell::new(false) };
}

/// Whether the current thread is collecting a batch
pub fn is_batching() -> bool {
    IN_BATCH.with(Cell::get)
}

///
/// BatchScope
/// RAII guard that sets the batch flag and restores the previous value on drop.
///

#[must_use = "the batch flag is reset as soon as the scope is dropped"]
pub struct BatchScope {
    previous: bool,
    // Bound to the thread whose flag it changed.
    _not_send: PhantomData<*const ()>,
}

impl BatchScope {
    /// Set the batch flag until the returned scope is dropped
    pub fn enter() -> Self {
        let previous = IN_BATCH.with(|flag| flag.replace(true));
        crate::trace_log!("entering batch scope (previous: {})", previous);

        Self {
            previous,
            _not_send: PhantomData,
        }
    }
}

impl Drop for BatchScope {
    fn drop(&mut self) {
        IN_BATCH.with(|flag| flag.set(self.previous));
        crate::trace_log!("leaving batch scope (restored: {})", self.previous);
    }
}

/// Run `operations` with the batch flag set
pub fn with_batching<T>(operations: impl FnOnce() -> T) -> T {
    let _scope = BatchScope::enter();
    operations()
}
