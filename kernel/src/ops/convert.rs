// SPDX-License-Identifier: MPL-2.0

use crate::{
    context::Context,
    cpu::UserContext,
    fiber::{Fiber, registry, registry::FiberedProcess},
    prelude::*,
    time,
};

/// Converts the calling thread to a fiber.
///
/// The first successful conversion of any thread makes the process fibered.
/// The caller's live frame is captured so that a later switch back to this
/// fiber resumes right after the conversion call; the new fiber is born
/// running on the calling thread.
pub fn convert_to_fiber(ctx: &Context, user_ctx: &UserContext) -> Result<Fid> {
    let now = time::read_time();
    let mut processes = registry::lock();
    let process = processes
        .entry(ctx.pid)
        .or_insert_with(|| FiberedProcess::new(ctx.pid));

    if process.fibers().find_by_runner_tid(ctx.tid).is_some() {
        return_errno_with_message!(
            Errno::ETHREADALREADYFIBER,
            "the calling thread is already a fiber"
        );
    }

    let fid = process.fibers_mut().next_fid();
    let fiber = Fiber::new_converted(fid, ctx.tid, user_ctx, now);
    let fid = process.fibers_mut().append(fiber);
    debug!(
        "convert_to_fiber: pid {} tid {} becomes fiber {}",
        ctx.pid, ctx.tid, fid
    );
    Ok(fid)
}
