// SPDX-License-Identifier: MPL-2.0

//! Fiber control blocks.

use core::fmt;

use crate::{
    cpu::{FpuRegs, GeneralRegs, UserContext},
    fiber::fls::FiberLocalStorage,
    prelude::*,
};

pub mod fls;
pub mod registry;
pub mod table;

/// Fiber identifier: dense, zero-based, unique only within the owning process.
pub type Fid = u32;

/// The scheduling state of a fiber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FiberState {
    /// Created or switched away from; no thread is executing it.
    Idle,
    /// A thread is executing it since the last switch to it.
    Running,
}

impl fmt::Display for FiberState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FiberState::Idle => write!(f, "IDLE"),
            FiberState::Running => write!(f, "RUNNING"),
        }
    }
}

/// A fiber control block: the kernel-side record of one fiber.
///
/// The block exclusively owns the fiber's register snapshots, accounting and
/// local storage. The user stack is *not* owned here; only its address is
/// recorded, and the shim that allocated it controls its lifetime.
pub struct Fiber {
    id: Fid,
    entry_point: Vaddr,
    base_user_stack: Vaddr,
    state: FiberState,
    creator_tid: Tid,
    runner_tid: Option<Tid>,
    regs: GeneralRegs,
    fpu_regs: FpuRegs,
    success_activations: u64,
    failed_activations: u64,
    total_time: Duration,
    last_switch_time: Duration,
    fls: FiberLocalStorage,
}

impl Fiber {
    /// Builds the block for a thread that converts itself to a fiber.
    ///
    /// The caller's live frame is captured verbatim so that a later switch
    /// back resumes right after the conversion call. The conversion itself
    /// counts as the first successful activation.
    pub(crate) fn new_converted(id: Fid, tid: Tid, user_ctx: &UserContext, now: Duration) -> Self {
        let mut fpu_regs = FpuRegs::new();
        fpu_regs.init();
        Self {
            id,
            entry_point: user_ctx.rip(),
            // Converted threads keep running on their own stack.
            base_user_stack: 0,
            state: FiberState::Running,
            creator_tid: tid,
            runner_tid: Some(tid),
            regs: *user_ctx.general_regs(),
            fpu_regs,
            success_activations: 1,
            failed_activations: 0,
            total_time: Duration::ZERO,
            last_switch_time: now,
            fls: FiberLocalStorage::new(),
        }
    }

    /// Builds the block for a newly created fiber.
    ///
    /// The first activation frame is fabricated: the fiber starts at
    /// `function` on the shim-supplied stack with `function_args` in the
    /// first argument register. All other registers are copied from the
    /// caller's live frame so that segment selectors and flags remain valid
    /// for the user-mode return; the floating-point state starts fresh.
    pub(crate) fn new_created(
        id: Fid,
        tid: Tid,
        stack_addr: Vaddr,
        function: Vaddr,
        function_args: usize,
        user_ctx: &UserContext,
    ) -> Self {
        let mut regs = *user_ctx.general_regs();
        regs.rip = function;
        regs.rsp = stack_addr;
        regs.rbp = stack_addr;
        regs.rdi = function_args;
        let mut fpu_regs = FpuRegs::new();
        fpu_regs.init();
        Self {
            id,
            entry_point: function,
            base_user_stack: stack_addr,
            state: FiberState::Idle,
            creator_tid: tid,
            runner_tid: None,
            regs,
            fpu_regs,
            success_activations: 0,
            failed_activations: 0,
            total_time: Duration::ZERO,
            last_switch_time: Duration::ZERO,
            fls: FiberLocalStorage::new(),
        }
    }

    pub fn id(&self) -> Fid {
        self.id
    }

    pub fn entry_point(&self) -> Vaddr {
        self.entry_point
    }

    pub fn base_user_stack(&self) -> Vaddr {
        self.base_user_stack
    }

    pub fn state(&self) -> FiberState {
        self.state
    }

    pub fn creator_tid(&self) -> Tid {
        self.creator_tid
    }

    /// The thread executing this fiber, if it is running.
    pub fn runner_tid(&self) -> Option<Tid> {
        self.runner_tid
    }

    pub fn success_activations(&self) -> u64 {
        self.success_activations
    }

    pub fn failed_activations(&self) -> u64 {
        self.failed_activations
    }

    /// Cumulative time this fiber has spent running, closed intervals only.
    pub fn total_time(&self) -> Duration {
        self.total_time
    }

    /// Total running time including the currently open interval, if any.
    pub fn live_total_time(&self, now: Duration) -> Duration {
        match self.state {
            FiberState::Running => self.total_time + now.saturating_sub(self.last_switch_time),
            FiberState::Idle => self.total_time,
        }
    }

    pub(crate) fn fls(&self) -> &FiberLocalStorage {
        &self.fls
    }

    pub(crate) fn fls_mut(&mut self) -> &mut FiberLocalStorage {
        &mut self.fls
    }

    /// The saved general-purpose register snapshot.
    pub fn general_regs(&self) -> &GeneralRegs {
        &self.regs
    }

    /// The saved x87/SSE state snapshot.
    pub fn fpu_regs(&self) -> &FpuRegs {
        &self.fpu_regs
    }

    /// Captures the calling thread's trap frame and FPU state into this block.
    pub(crate) fn save_user_context(&mut self, user_ctx: &UserContext) {
        self.regs = *user_ctx.general_regs();
        self.fpu_regs = *user_ctx.fpu_regs();
    }

    /// Restores this block's snapshots into the calling thread's trap frame,
    /// so that the thread resumes as this fiber upon kernel return.
    pub(crate) fn load_user_context(&self, user_ctx: &mut UserContext) {
        *user_ctx.general_regs_mut() = self.regs;
        *user_ctx.fpu_regs_mut() = self.fpu_regs;
    }

    /// Closes the current running interval and parks the fiber.
    pub(crate) fn switch_away(&mut self, now: Duration) {
        self.total_time += now.saturating_sub(self.last_switch_time);
        self.last_switch_time = now;
        self.state = FiberState::Idle;
        self.runner_tid = None;
    }

    /// Opens a running interval on the given thread.
    pub(crate) fn switch_in(&mut self, tid: Tid, now: Duration) {
        self.state = FiberState::Running;
        self.runner_tid = Some(tid);
        self.success_activations += 1;
        self.last_switch_time = now;
    }

    pub(crate) fn count_failed_activation(&mut self) {
        self.failed_activations += 1;
    }
}
