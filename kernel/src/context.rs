// SPDX-License-Identifier: MPL-2.0

//! The context that can be accessed from the calling user thread.

use crate::prelude::*;

/// The identity of the thread that trapped into the subsystem, plus its view
/// of user memory.
///
/// Operations run in the context of the calling user thread; the host kernel
/// builds one of these per trap and passes it down the dispatch path.
pub struct Context<'a> {
    pub pid: Pid,
    pub tid: Tid,
    pub user_space: &'a dyn UserSpace,
}

/// The user memory access seam.
///
/// Implemented by the host kernel's copy-in/copy-out routines. Either method
/// fails with `EFAULT` when the user pointer is inaccessible; both may sleep
/// on a page fault, which is the only suspension point of the subsystem.
pub trait UserSpace {
    /// Reads `dest.len()` bytes from the user address `src`.
    fn read_bytes(&self, src: Vaddr, dest: &mut [u8]) -> Result<()>;

    /// Writes `src.len()` bytes to the user address `dest`.
    fn write_bytes(&self, dest: Vaddr, src: &[u8]) -> Result<()>;
}

impl<'a> Context<'a> {
    pub fn new(pid: Pid, tid: Tid, user_space: &'a dyn UserSpace) -> Self {
        Self {
            pid,
            tid,
            user_space,
        }
    }

    /// Reads a POD value from the user space of the current process.
    pub fn read_val<T: Pod>(&self, src: Vaddr) -> Result<T> {
        let mut buf = vec![0u8; size_of::<T>()];
        self.user_space.read_bytes(src, &mut buf)?;
        Ok(T::from_bytes(&buf))
    }

    /// Writes a POD value to the user space of the current process.
    pub fn write_val<T: Pod>(&self, dest: Vaddr, val: &T) -> Result<()> {
        self.user_space.write_bytes(dest, val.as_bytes())
    }
}
