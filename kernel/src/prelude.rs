// SPDX-License-Identifier: MPL-2.0

#![allow(unused)]

pub(crate) use alloc::{
    boxed::Box,
    string::{String, ToString},
    sync::{Arc, Weak},
    vec,
    vec::Vec,
};
pub(crate) use core::{fmt::Debug, time::Duration};

pub(crate) use bitflags::bitflags;
pub(crate) use log::{debug, error, info, trace, warn};
pub(crate) use ostd_pod::Pod;
pub(crate) use spin::{Lazy, Mutex, MutexGuard, Once};

pub(crate) use crate::{
    Vaddr,
    error::{Errno, Error, Result},
    fiber::Fid,
    process::{Pid, Tid},
    return_errno, return_errno_with_message,
};
