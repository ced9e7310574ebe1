// SPDX-License-Identifier: MPL-2.0

use hashbrown::HashMap;

use crate::{
    context::Context,
    fiber::{Fiber, registry, registry::FiberedProcess},
    prelude::*,
};

/// Allocates a fiber-local storage index for the calling fiber.
pub fn fls_alloc(ctx: &Context) -> Result<usize> {
    let mut processes = registry::lock();
    let fiber = current_fiber_mut(&mut processes, ctx)?;
    fiber.fls_mut().alloc()
}

/// Releases a fiber-local storage index of the calling fiber.
pub fn fls_free(index: u64, ctx: &Context) -> Result<()> {
    let mut processes = registry::lock();
    let fiber = current_fiber_mut(&mut processes, ctx)?;
    fiber.fls_mut().free(to_index(index)?)
}

/// Reads a fiber-local storage cell of the calling fiber.
pub fn fls_get(index: u64, ctx: &Context) -> Result<i64> {
    let mut processes = registry::lock();
    let fiber = current_fiber_mut(&mut processes, ctx)?;
    fiber.fls().get(to_index(index)?)
}

/// Writes a fiber-local storage cell of the calling fiber.
pub fn fls_set(index: u64, value: i64, ctx: &Context) -> Result<()> {
    let mut processes = registry::lock();
    let fiber = current_fiber_mut(&mut processes, ctx)?;
    fiber.fls_mut().set(to_index(index)?, value)
}

fn to_index(raw: u64) -> Result<usize> {
    let Ok(index) = usize::try_from(raw) else {
        return_errno_with_message!(Errno::EFLSINVALIDIDX, "storage index out of range");
    };
    Ok(index)
}

fn current_fiber_mut<'a>(
    processes: &'a mut HashMap<Pid, FiberedProcess>,
    ctx: &Context,
) -> Result<&'a mut Fiber> {
    let Some(process) = processes.get_mut(&ctx.pid) else {
        return_errno_with_message!(Errno::ENOTFIBERED, "the process is not fibered");
    };
    let Some(fiber) = process.fibers_mut().find_by_runner_tid_mut(ctx.tid) else {
        return_errno_with_message!(Errno::ENOTFIBERED, "the calling thread is not a fiber");
    };
    Ok(fiber)
}
