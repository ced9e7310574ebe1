// SPDX-License-Identifier: MPL-2.0

//! The fiber character device: the user/kernel boundary of the subsystem.
//!
//! The host kernel registers the device under `/dev` and forwards every
//! unlocked-ioctl call here. The dispatcher validates the command word,
//! copies declared parameters in, invokes the lifecycle controller and
//! copies results out. User pointers are only touched through the caller's
//! [`Context`]; an inaccessible pointer surfaces as `EFAULT` at copy time.

mod ioctl_defs;

pub use ioctl_defs::{
    FIBER_IOC_CONVERT_TO_FIBER, FIBER_IOC_CREATE_FIBER, FIBER_IOC_EXIT, FIBER_IOC_FLS_ALLOC,
    FIBER_IOC_FLS_FREE, FIBER_IOC_FLS_GET, FIBER_IOC_FLS_SET, FIBER_IOC_MAGIC, FIBER_IOC_MAXNR,
    FIBER_IOC_RESET, FIBER_IOC_SWITCH_TO_FIBER, FiberOp, FiberParams, FlsParams, IocDir, ioc_dir,
    ioc_nr, ioc_size, ioc_type,
};

use crate::{context::Context, cpu::UserContext, ops, prelude::*};

/// Name the host registers the device under.
pub const FIBER_DEVICE_NAME: &str = "fiber";

/// Dispatcher of all the exposed capabilities of the subsystem.
pub struct FiberDevice;

impl FiberDevice {
    /// Handles one ioctl request issued by the calling user thread.
    ///
    /// Returns the raw ioctl return value: non-negative on success (a fiber
    /// id, a storage index or zero), the negated error number otherwise.
    pub fn ioctl(&self, cmd: u32, arg: Vaddr, ctx: &Context, user_ctx: &mut UserContext) -> isize {
        let retval = match self.dispatch(cmd, arg, ctx, user_ctx) {
            Ok(retval) => retval,
            Err(e) => e.as_retval(),
        };
        debug!(
            "ioctl nr {} from pid {} tid {} => {}",
            ioc_nr(cmd),
            ctx.pid,
            ctx.tid,
            retval
        );
        retval
    }

    fn dispatch(
        &self,
        cmd: u32,
        arg: Vaddr,
        ctx: &Context,
        user_ctx: &mut UserContext,
    ) -> Result<isize> {
        if ioc_type(cmd) != FIBER_IOC_MAGIC {
            return_errno_with_message!(Errno::ENOTTY, "not a fiber ioctl");
        }
        let nr = ioc_nr(cmd);
        if nr > FIBER_IOC_MAXNR {
            return_errno_with_message!(Errno::ENOTTY, "command number out of range");
        }
        // The direction and size bits must match the contract for this
        // command number.
        if cmd != ioctl_defs::COMMANDS[nr as usize] {
            return_errno_with_message!(Errno::ENOTTY, "malformed command word");
        }
        let Ok(op) = FiberOp::try_from(nr) else {
            return_errno_with_message!(Errno::ENOTTY, "unknown fiber command");
        };

        match op {
            FiberOp::Reset => Ok(0),
            FiberOp::ConvertToFiber => {
                ops::convert_to_fiber(ctx, user_ctx).map(|fid| fid as isize)
            }
            FiberOp::CreateFiber => {
                let params: FiberParams = ctx.read_val(arg)?;
                ops::create_fiber(&params, ctx, user_ctx).map(|fid| fid as isize)
            }
            FiberOp::SwitchToFiber => {
                ops::switch_to_fiber(arg as Fid, ctx, user_ctx).map(|_| 0)
            }
            FiberOp::FlsAlloc => ops::fls_alloc(ctx).map(|index| index as isize),
            FiberOp::FlsFree => ops::fls_free(arg as u64, ctx).map(|_| 0),
            FiberOp::FlsGet => {
                let mut params: FlsParams = ctx.read_val(arg)?;
                params.value = ops::fls_get(params.idx, ctx)?;
                ctx.write_val(arg, &params)?;
                Ok(0)
            }
            FiberOp::FlsSet => {
                let params: FlsParams = ctx.read_val(arg)?;
                ops::fls_set(params.idx, params.value, ctx).map(|_| 0)
            }
            FiberOp::Exit => ops::exit_fibered(ctx.pid).map(|_| 0),
        }
    }
}
