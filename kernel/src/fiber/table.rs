// SPDX-License-Identifier: MPL-2.0

//! The per-process fiber table.

use crate::{fiber::Fiber, prelude::*};

/// An ordered collection of fiber control blocks.
///
/// Fiber ids are handed out monotonically from `count`; blocks are never
/// renumbered and never removed individually. The whole table is reclaimed
/// at process exit.
pub struct FiberTable {
    fibers: Vec<Fiber>,
    count: Fid,
}

impl FiberTable {
    pub(crate) const fn new() -> Self {
        Self {
            fibers: Vec::new(),
            count: 0,
        }
    }

    /// The id the next appended fiber will get.
    pub(crate) fn next_fid(&self) -> Fid {
        self.count
    }

    /// Appends a block built with [`Self::next_fid`] and returns its id.
    pub(crate) fn append(&mut self, fiber: Fiber) -> Fid {
        debug_assert_eq!(fiber.id(), self.count);
        let fid = fiber.id();
        self.fibers.push(fiber);
        self.count += 1;
        fid
    }

    pub(crate) fn get(&self, fid: Fid) -> Option<&Fiber> {
        self.fibers.iter().find(|fiber| fiber.id() == fid)
    }

    pub(crate) fn get_mut(&mut self, fid: Fid) -> Option<&mut Fiber> {
        self.fibers.iter_mut().find(|fiber| fiber.id() == fid)
    }

    /// The fiber currently running on the given thread, if any.
    pub(crate) fn find_by_runner_tid(&self, tid: Tid) -> Option<&Fiber> {
        self.fibers
            .iter()
            .find(|fiber| fiber.runner_tid() == Some(tid))
    }

    pub(crate) fn find_by_runner_tid_mut(&mut self, tid: Tid) -> Option<&mut Fiber> {
        self.fibers
            .iter_mut()
            .find(|fiber| fiber.runner_tid() == Some(tid))
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Fiber> {
        self.fibers.iter()
    }

    /// Removes every block from the table, leaving `count` untouched.
    pub(crate) fn drain(&mut self) -> Vec<Fiber> {
        core::mem::take(&mut self.fibers)
    }
}
