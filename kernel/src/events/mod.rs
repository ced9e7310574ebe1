// SPDX-License-Identifier: MPL-2.0

//! Events and their observers.

mod observer;
mod subject;

pub use observer::Observer;
pub use subject::Subject;

/// A trait to represent any events.
pub trait Events: Copy + Clone + Send + Sync + 'static {}
