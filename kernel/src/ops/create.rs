// SPDX-License-Identifier: MPL-2.0

use crate::{
    context::Context,
    cpu::UserContext,
    device::FiberParams,
    fiber::{Fiber, registry},
    prelude::*,
};

/// Creates a new fiber in the calling thread's process.
///
/// Only a thread that has converted itself to a fiber can create fibers. The
/// new fiber is born idle with a fabricated frame; the supplied stack is
/// owned by the user-space shim and only its address is recorded.
pub fn create_fiber(params: &FiberParams, ctx: &Context, user_ctx: &UserContext) -> Result<Fid> {
    let mut processes = registry::lock();
    let Some(process) = processes.get_mut(&ctx.pid) else {
        return_errno_with_message!(Errno::ENOTFIBERED, "the process is not fibered");
    };
    if process.fibers().find_by_runner_tid(ctx.tid).is_none() {
        return_errno_with_message!(Errno::ENOTFIBERED, "the calling thread is not a fiber");
    }

    let fid = process.fibers_mut().next_fid();
    let fiber = Fiber::new_created(
        fid,
        ctx.tid,
        params.stack_addr as Vaddr,
        params.function as Vaddr,
        params.function_args as usize,
        user_ctx,
    );
    let fid = process.fibers_mut().append(fiber);
    debug!(
        "create_fiber: pid {} tid {} created fiber {} at {:#x}",
        ctx.pid,
        ctx.tid,
        fid,
        params.function
    );
    Ok(fid)
}
