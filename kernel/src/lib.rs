// SPDX-License-Identifier: MPL-2.0

//! Windows-style user-mode cooperative fibers for a POSIX-like kernel.
//!
//! A fiber is a user-space unit of execution whose scheduling is driven
//! entirely by the application: many fibers share one kernel thread, and any
//! thread of a process may dispatch any fiber created in that process by
//! issuing an explicit switch through the fiber character device.
//!
//! The subsystem keeps, per fibered process, an ordered table of fiber
//! control blocks. Each control block owns the fiber's saved general-purpose
//! register frame, its x87/SSE state, activation and running-time accounting,
//! and a fixed-capacity fiber-local storage. A single global mutex guards the
//! registry, every fiber table and every control block; operations run in the
//! context of the calling user thread and never spawn kernel workers.
//!
//! The host kernel plugs in at three seams:
//! - the character device glue forwards ioctl requests to [`FiberDevice`],
//! - the user-memory access routines implement [`UserSpace`],
//! - the process-exit path reports terminations via [`notify_thread_exit`].

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod context;
pub mod cpu;
pub mod device;
pub mod error;
pub mod events;
pub mod fiber;
pub mod fs;
pub mod ops;
pub mod process;
pub mod task;
pub mod time;

mod prelude;


pub use crate::{
    context::{Context, UserSpace},
    device::FiberDevice,
    error::{Errno, Error, Result},
    process::exit::notify_thread_exit,
};

/// Virtual address in the user address space.
pub type Vaddr = usize;

/// Initializes the fiber subsystem.
///
/// Registers the clock source used for fiber running-time accounting and
/// installs the process-exit hook. The host kernel calls this once at load.
pub fn init(clock: alloc::sync::Arc<dyn time::Clock>) {
    time::init(clock);
    process::exit::init();
}
