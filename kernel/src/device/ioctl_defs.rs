// SPDX-License-Identifier: MPL-2.0

//! ioctl command encoding of the fiber device.
//!
//! Commands use the conventional layout: bits 0..8 carry the command number,
//! bits 8..16 the magic type byte, bits 16..30 the parameter size and the
//! top two bits the transfer direction.
//
// Reference: <https://elixir.bootlin.com/linux/v6.1/source/include/uapi/asm-generic/ioctl.h>

use int_to_c_enum::TryFromInt;

use crate::prelude::*;

/// Magic type byte of every fiber command.
pub const FIBER_IOC_MAGIC: u32 = 0xF1;

/// The maximum command number.
pub const FIBER_IOC_MAXNR: u32 = 8;

const IOC_NRBITS: u32 = 8;
const IOC_TYPEBITS: u32 = 8;
const IOC_SIZEBITS: u32 = 14;

const IOC_NRSHIFT: u32 = 0;
const IOC_TYPESHIFT: u32 = IOC_NRSHIFT + IOC_NRBITS;
const IOC_SIZESHIFT: u32 = IOC_TYPESHIFT + IOC_TYPEBITS;
const IOC_DIRSHIFT: u32 = IOC_SIZESHIFT + IOC_SIZEBITS;

bitflags! {
    /// Data transfer direction of a command, seen from user space.
    pub struct IocDir: u32 {
        const NONE = 0;
        /// User space writes, the kernel copies the parameter in.
        const WRITE = 1;
        /// User space reads, the kernel copies the result out.
        const READ = 2;
    }
}

const fn ioc(dir: u32, nr: u32, size: usize) -> u32 {
    (dir << IOC_DIRSHIFT)
        | (FIBER_IOC_MAGIC << IOC_TYPESHIFT)
        | (nr << IOC_NRSHIFT)
        | ((size as u32) << IOC_SIZESHIFT)
}

const fn io(nr: u32) -> u32 {
    ioc(IocDir::NONE.bits(), nr, 0)
}

const fn iow(nr: u32, size: usize) -> u32 {
    ioc(IocDir::WRITE.bits(), nr, size)
}

const fn iowr(nr: u32, size: usize) -> u32 {
    ioc(IocDir::WRITE.bits() | IocDir::READ.bits(), nr, size)
}

pub const FIBER_IOC_RESET: u32 = io(0);
pub const FIBER_IOC_CONVERT_TO_FIBER: u32 = io(1);
pub const FIBER_IOC_CREATE_FIBER: u32 = iow(2, size_of::<FiberParams>());
pub const FIBER_IOC_SWITCH_TO_FIBER: u32 = io(3);
pub const FIBER_IOC_FLS_ALLOC: u32 = io(4);
pub const FIBER_IOC_FLS_FREE: u32 = io(5);
pub const FIBER_IOC_FLS_GET: u32 = iowr(6, size_of::<FlsParams>());
pub const FIBER_IOC_FLS_SET: u32 = iow(7, size_of::<FlsParams>());
pub const FIBER_IOC_EXIT: u32 = io(8);

/// The canonical command word for each command number.
pub(crate) const COMMANDS: [u32; (FIBER_IOC_MAXNR + 1) as usize] = [
    FIBER_IOC_RESET,
    FIBER_IOC_CONVERT_TO_FIBER,
    FIBER_IOC_CREATE_FIBER,
    FIBER_IOC_SWITCH_TO_FIBER,
    FIBER_IOC_FLS_ALLOC,
    FIBER_IOC_FLS_FREE,
    FIBER_IOC_FLS_GET,
    FIBER_IOC_FLS_SET,
    FIBER_IOC_EXIT,
];

pub const fn ioc_nr(cmd: u32) -> u32 {
    (cmd >> IOC_NRSHIFT) & ((1 << IOC_NRBITS) - 1)
}

pub const fn ioc_type(cmd: u32) -> u32 {
    (cmd >> IOC_TYPESHIFT) & ((1 << IOC_TYPEBITS) - 1)
}

pub const fn ioc_size(cmd: u32) -> usize {
    ((cmd >> IOC_SIZESHIFT) & ((1 << IOC_SIZEBITS) - 1)) as usize
}

pub fn ioc_dir(cmd: u32) -> IocDir {
    IocDir::from_bits_truncate(cmd >> IOC_DIRSHIFT)
}

/// The operation selector carried in the command-number byte.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromInt)]
pub enum FiberOp {
    Reset = 0,
    ConvertToFiber = 1,
    CreateFiber = 2,
    SwitchToFiber = 3,
    FlsAlloc = 4,
    FlsFree = 5,
    FlsGet = 6,
    FlsSet = 7,
    Exit = 8,
}

/// Parameters of CREATE_FIBER, copied in from the user-space shim.
#[repr(C)]
#[ostd_pod::derive(Pod)]
#[derive(Debug, Default, Clone, Copy)]
pub struct FiberParams {
    /// Top of the stack the shim allocated for the fiber.
    pub stack_addr: u64,
    /// User-space function where the fiber starts executing.
    pub function: u64,
    /// First argument handed to `function`.
    pub function_args: u64,
}

/// Parameters of FLS_GET and FLS_SET.
///
/// FLS_GET copies the struct back out with `value` filled in.
#[repr(C)]
#[ostd_pod::derive(Pod)]
#[derive(Debug, Default, Clone, Copy)]
pub struct FlsParams {
    pub idx: u64,
    pub value: i64,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn command_words_match_the_conventional_encoding() {
        assert_eq!(FIBER_IOC_RESET, 0x0000_F100);
        assert_eq!(FIBER_IOC_CONVERT_TO_FIBER, 0x0000_F101);
        assert_eq!(FIBER_IOC_CREATE_FIBER, 0x4018_F102);
        assert_eq!(FIBER_IOC_SWITCH_TO_FIBER, 0x0000_F103);
        assert_eq!(FIBER_IOC_FLS_GET, 0xC010_F106);
        assert_eq!(FIBER_IOC_FLS_SET, 0x4010_F107);
        assert_eq!(FIBER_IOC_EXIT, 0x0000_F108);
    }

    #[test]
    fn decoding_recovers_every_field() {
        let cmd = FIBER_IOC_CREATE_FIBER;
        assert_eq!(ioc_nr(cmd), 2);
        assert_eq!(ioc_type(cmd), FIBER_IOC_MAGIC);
        assert_eq!(ioc_size(cmd), size_of::<FiberParams>());
        assert_eq!(ioc_dir(cmd), IocDir::WRITE);

        assert_eq!(ioc_dir(FIBER_IOC_FLS_GET), IocDir::WRITE | IocDir::READ);
        assert_eq!(ioc_dir(FIBER_IOC_EXIT), IocDir::NONE);
    }

    #[test]
    fn every_command_number_maps_to_an_operation() {
        for nr in 0..=FIBER_IOC_MAXNR {
            assert!(FiberOp::try_from(nr).is_ok());
        }
        assert!(FiberOp::try_from(FIBER_IOC_MAXNR + 1).is_err());
    }
}
