// SPDX-License-Identifier: MPL-2.0

//! Data rendering of the per-process fiber view.
//!
//! The host's procfs glue mounts one directory per fibered process at
//! `/proc/<pid>/fibers` with one file per fiber; this module renders the
//! directory listing and the file contents. Hooking the pseudo-filesystem
//! itself is the host's business.

use alloc::format;

use crate::{
    fiber::{FiberState, registry},
    prelude::*,
    time,
};

/// Renders the contents of `/proc/<pid>/fibers/<fid>`.
pub fn fiber_stat(pid: Pid, fid: Fid) -> Result<Vec<u8>> {
    let now = time::read_time();
    let processes = registry::lock();
    let Some(process) = processes.get(&pid) else {
        return_errno_with_message!(Errno::ENOTFIBERED, "the process is not fibered");
    };
    let Some(fiber) = process.fibers().get(fid) else {
        return_errno_with_message!(Errno::EFIBERNOTEXISTS, "no such fiber in this process");
    };

    let runner_tid = match (fiber.state(), fiber.runner_tid()) {
        (FiberState::Running, Some(tid)) => tid as i64,
        _ => -1,
    };
    let output = format!(
        "id:\t\t\t{}\n\
         entry point:\t\t{:#x}\n\
         state:\t\t\t{}\n\
         runner tid:\t\t{}\n\
         creator tid:\t\t{}\n\
         total time:\t\t{} ms\n\
         success activations:\t{}\n\
         failed activations:\t{}\n",
        fiber.id(),
        fiber.entry_point(),
        fiber.state(),
        runner_tid,
        fiber.creator_tid(),
        fiber.live_total_time(now).as_millis(),
        fiber.success_activations(),
        fiber.failed_activations(),
    );
    Ok(output.into_bytes())
}

/// Lists the fiber ids of a fibered process, in creation order.
pub fn fiber_dir(pid: Pid) -> Result<Vec<Fid>> {
    let processes = registry::lock();
    let Some(process) = processes.get(&pid) else {
        return_errno_with_message!(Errno::ENOTFIBERED, "the process is not fibered");
    };
    Ok(process.fibers().iter().map(|fiber| fiber.id()).collect())
}
