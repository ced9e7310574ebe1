// SPDX-License-Identifier: MPL-2.0

//! Deterministic reclamation of fiber state on process exit.
//!
//! The host kernel's exit path reports every thread termination through
//! [`notify_thread_exit`], the pre-handler seam on its `do_exit`-equivalent
//! entry point. The hook installed at subsystem init reacts only to the main
//! thread of a process (`tid == pid`), coalescing per-thread notifications
//! into a single process teardown.

use crate::{
    events::{Events, Observer, Subject},
    ops,
    prelude::*,
};

/// A thread-termination event published by the host kernel's exit path.
#[derive(Copy, Clone, Debug)]
pub struct ThreadExitEvent {
    pub pid: Pid,
    pub tid: Tid,
}

impl Events for ThreadExitEvent {}

static EXIT_SUBJECT: Subject<ThreadExitEvent> = Subject::new();
static EXIT_HOOK: Once<Arc<ExitHook>> = Once::new();

struct ExitHook;

impl Observer<ThreadExitEvent> for ExitHook {
    fn on_events(&self, events: &ThreadExitEvent) {
        if events.tid != events.pid {
            // Individual thread exits do not tear the process down.
            return;
        }
        match ops::exit_fibered(events.pid) {
            Ok(()) => debug!("exit hook: reclaimed fibered process {}", events.pid),
            // Most exiting processes never converted a thread.
            Err(e) if e.error() == Errno::ENOTFIBERED => (),
            Err(e) => warn!("exit hook: teardown of pid {} failed: {:?}", events.pid, e),
        }
    }
}

/// Installs the exit hook. Called once by [`crate::init`].
pub(crate) fn init() {
    EXIT_HOOK.call_once(|| {
        let hook = Arc::new(ExitHook);
        let hook_dyn: Arc<dyn Observer<ThreadExitEvent>> = hook.clone();
        EXIT_SUBJECT.register_observer(Arc::downgrade(&hook_dyn));
        hook
    });
}

/// Reports a thread termination to the fiber subsystem.
///
/// Called by the host kernel's exit pre-handler in the context of the
/// exiting thread. Non-fibered processes pass through unaffected.
pub fn notify_thread_exit(pid: Pid, tid: Tid) {
    EXIT_SUBJECT.notify_observers(&ThreadExitEvent { pid, tid });
}
