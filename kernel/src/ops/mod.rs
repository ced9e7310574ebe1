// SPDX-License-Identifier: MPL-2.0

//! The lifecycle controller: one file per exposed operation.
//!
//! Every operation acquires the global fiber lock on entry and releases it on
//! every return path; error paths leave no partial mutation behind.

mod convert;
mod create;
mod exit;
mod fls;
mod switch;

pub use convert::convert_to_fiber;
pub use create::create_fiber;
pub use exit::exit_fibered;
pub use fls::{fls_alloc, fls_free, fls_get, fls_set};
pub use switch::switch_to_fiber;
