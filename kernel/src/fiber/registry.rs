// SPDX-License-Identifier: MPL-2.0

//! The global directory of fibered processes.
//!
//! A process becomes fibered when one of its threads first converts itself
//! to a fiber; the entry lives until the process exits. One global mutex
//! guards the directory, every fiber table and every control block: all
//! public operations of the subsystem acquire it on entry and hold it until
//! they return. Fiber traffic is low frequency relative to user-space work,
//! so the coarse discipline costs little and keeps the invariants simple.

use hashbrown::HashMap;

use crate::{fiber::table::FiberTable, prelude::*};

/// Initial capacity of the directory: 2^5 buckets comfortably hold the tens
/// to low hundreds of concurrently fibered processes of a typical host.
const REGISTRY_CAPACITY: usize = 32;

/// A fiber-enabled process: its pid and the fibers created within it.
pub struct FiberedProcess {
    pid: Pid,
    fibers: FiberTable,
}

impl FiberedProcess {
    pub(crate) fn new(pid: Pid) -> Self {
        Self {
            pid,
            fibers: FiberTable::new(),
        }
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub(crate) fn fibers(&self) -> &FiberTable {
        &self.fibers
    }

    pub(crate) fn fibers_mut(&mut self) -> &mut FiberTable {
        &mut self.fibers
    }
}

static FIBERED_PROCESSES: Lazy<Mutex<HashMap<Pid, FiberedProcess>>> =
    Lazy::new(|| Mutex::new(HashMap::with_capacity(REGISTRY_CAPACITY)));

/// Acquires the global fiber lock and returns the guarded directory.
pub(crate) fn lock() -> MutexGuard<'static, HashMap<Pid, FiberedProcess>> {
    FIBERED_PROCESSES.lock()
}

/// Number of fiber-enabled processes.
pub fn processes_count() -> usize {
    FIBERED_PROCESSES.lock().len()
}
