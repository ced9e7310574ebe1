// SPDX-License-Identifier: MPL-2.0

//! Task-level primitives at the scheduler seam.

pub mod preempt;

pub use preempt::{DisablePreemptGuard, disable_preempt, in_atomic};
