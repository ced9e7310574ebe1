// SPDX-License-Identifier: MPL-2.0

use crate::{fiber::registry, prelude::*};

/// Tears down all fiber state of a process.
///
/// Drains the process's fiber table and detaches the registry entry; a
/// process relaunched under the same pid starts over with fiber id 0.
/// Reached both from the EXIT operation and from the process-exit hook.
pub fn exit_fibered(pid: Pid) -> Result<()> {
    let mut processes = registry::lock();
    let Some(process) = processes.get_mut(&pid) else {
        return_errno_with_message!(Errno::ENOTFIBERED, "the process is not fibered");
    };
    let drained = process.fibers_mut().drain();
    debug!("exit_fibered: pid {} reclaimed {} fibers", pid, drained.len());
    drop(drained);
    processes.remove(&pid);
    Ok(())
}
