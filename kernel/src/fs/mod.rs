// SPDX-License-Identifier: MPL-2.0

//! Pseudo-filesystem views exposed by the subsystem.

pub mod proc;
