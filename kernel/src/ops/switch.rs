// SPDX-License-Identifier: MPL-2.0

use crate::{
    context::Context,
    cpu::UserContext,
    fiber::{FiberState, registry},
    prelude::*,
    task::disable_preempt,
    time,
};

/// Switches the calling thread from its current fiber to the target fiber.
///
/// On success the outgoing fiber's running interval is closed and its context
/// captured, and the target's context is loaded into the caller's trap frame:
/// upon kernel return the thread resumes as the target fiber. A target that
/// is already running on some thread rejects the switch and counts a failed
/// activation; switching to the caller's own fiber fails the same way.
pub fn switch_to_fiber(fid: Fid, ctx: &Context, user_ctx: &mut UserContext) -> Result<()> {
    let now = time::read_time();
    let mut processes = registry::lock();
    let Some(process) = processes.get_mut(&ctx.pid) else {
        return_errno_with_message!(Errno::ENOTFIBERED, "the process is not fibered");
    };
    let table = process.fibers_mut();
    let Some(current) = table.find_by_runner_tid(ctx.tid) else {
        return_errno_with_message!(Errno::ENOTFIBERED, "the calling thread is not a fiber");
    };
    let current_fid = current.id();

    let Some(target) = table.get(fid) else {
        return_errno_with_message!(Errno::EFIBERNOTEXISTS, "no such fiber in this process");
    };
    if target.state() == FiberState::Running {
        table.get_mut(fid).unwrap().count_failed_activation();
        return_errno_with_message!(
            Errno::EFIBERALREADYRUNNING,
            "the target fiber is already running"
        );
    }

    // The swap must stay on this CPU and may not be interrupted between
    // saving the outgoing frame and loading the incoming one.
    let _preempt_guard = disable_preempt();

    let outgoing = table.get_mut(current_fid).unwrap();
    outgoing.switch_away(now);
    outgoing.save_user_context(user_ctx);

    let incoming = table.get_mut(fid).unwrap();
    incoming.switch_in(ctx.tid, now);
    incoming.load_user_context(user_ctx);

    debug!(
        "switch_to_fiber: pid {} tid {} switched fiber {} -> {}",
        ctx.pid, ctx.tid, current_fid, fid
    );
    Ok(())
}
