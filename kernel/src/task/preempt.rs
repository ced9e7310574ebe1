// SPDX-License-Identifier: MPL-2.0

//! Preemption control.
//!
//! The register-frame swap of a fiber switch must not be interrupted between
//! saving the outgoing context and loading the incoming one; the switch path
//! holds a [`DisablePreemptGuard`] for the duration of the swap. The counter
//! maps to the host scheduler's preempt count at this seam.

use core::{
    marker::PhantomData,
    sync::atomic::{AtomicUsize, Ordering::Relaxed},
};

/// The number of preemption-disabled scopes held by the current CPU.
static PREEMPT_COUNT: AtomicUsize = AtomicUsize::new(0);

/// A guard to disable preempt.
#[must_use]
pub struct DisablePreemptGuard {
    // This private field prevents user from constructing values of this type directly.
    _private: PhantomData<*mut ()>,
}

impl DisablePreemptGuard {
    fn new() -> Self {
        PREEMPT_COUNT.fetch_add(1, Relaxed);
        Self {
            _private: PhantomData,
        }
    }
}

impl Drop for DisablePreemptGuard {
    fn drop(&mut self) {
        PREEMPT_COUNT.fetch_sub(1, Relaxed);
    }
}

/// Disables preemption until the returned guard is dropped.
pub fn disable_preempt() -> DisablePreemptGuard {
    DisablePreemptGuard::new()
}

/// Whether the current CPU is in atomic context.
pub fn in_atomic() -> bool {
    PREEMPT_COUNT.load(Relaxed) != 0
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn guard_keeps_the_cpu_atomic() {
        let _guard = disable_preempt();
        assert!(in_atomic());
        let nested = disable_preempt();
        assert!(in_atomic());
        drop(nested);
        assert!(in_atomic());
    }
}
