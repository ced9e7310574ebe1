// SPDX-License-Identifier: MPL-2.0

#![allow(dead_code)]

/// Error number.
///
/// The generic codes keep their Linux values; the fiber-specific taxonomy
/// occupies the hundred series so that the two families cannot collide.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Errno {
    EFAULT = 14, /* Bad address */
    EINVAL = 22, /* Invalid argument */
    ENOTTY = 25, /* Inappropriate ioctl for device */

    ETHREADALREADYFIBER = 100,  /* Calling thread is already a fiber */
    ENOTFIBERED = 200,          /* Process is not fibered, or the thread never converted */
    EFIBERNOTEXISTS = 300,      /* No fiber with the requested id in this process */
    EFIBERALREADYRUNNING = 400, /* Target fiber is running on some thread */
    EFLSFULL = 500,             /* No free fiber-local storage index */
    EFLSINVALIDIDX = 600,       /* Storage index out of range or not allocated */
}

/// Error used in this crate.
#[derive(Debug, Clone, Copy)]
pub struct Error {
    errno: Errno,
    msg: Option<&'static str>,
}

impl Error {
    pub const fn new(errno: Errno) -> Self {
        Error { errno, msg: None }
    }

    pub const fn with_message(errno: Errno, msg: &'static str) -> Self {
        Error {
            errno,
            msg: Some(msg),
        }
    }

    pub const fn error(&self) -> Errno {
        self.errno
    }

    /// The raw ioctl return value encoding this error.
    pub const fn as_retval(&self) -> isize {
        -(self.errno as isize)
    }
}

impl From<Errno> for Error {
    fn from(errno: Errno) -> Self {
        Error::new(errno)
    }
}

impl AsRef<Error> for Error {
    fn as_ref(&self) -> &Error {
        self
    }
}

impl From<int_to_c_enum::TryFromIntError> for Error {
    fn from(_: int_to_c_enum::TryFromIntError) -> Self {
        Error::with_message(Errno::EINVAL, "Invalid enum value")
    }
}

pub type Result<T> = core::result::Result<T, Error>;

#[macro_export]
macro_rules! return_errno {
    ($errno: expr) => {
        return Err($crate::error::Error::new($errno))
    };
}

#[macro_export]
macro_rules! return_errno_with_message {
    ($errno: expr, $message: expr) => {
        return Err($crate::error::Error::with_message($errno, $message))
    };
}
