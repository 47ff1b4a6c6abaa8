//! # vMPU: Memory Protection Core
//!
//! Enforces the isolation boundaries between boxes on a Cortex-M4 with the
//! Kinetis K64 system MPU. All protection state is owned by one [`Vmpu`]
//! value; its four entry points are
//!
//! * [`Vmpu::init_protection`]: one-time bootstrap. Binds the fault trap,
//!   enables the configurable faults, initializes the memory backend and
//!   activates box 0.
//! * [`Vmpu::add_acl`]: admits one ACL during box setup.
//! * [`Vmpu::switch`]: moves the active protection domain from one box to
//!   another.
//! * [`TrapContext::trap`]: reached from the exception handlers in
//!   [`fault`].
//!
//! The MPU programming itself belongs to the two [region backends](backend).
//! This crate validates, routes and sequences.
//!
//! ## Failure Model
//!
//! There is no recoverable error. Every [`ProtectionError`] ends in
//! [`Halt::halt`], which does not return; a diagnostic is logged first.
//!
//! ## Example
//!
//! ```ignore
//! static VMPU: Vmpu<K64> = Vmpu::new(regs, peripherals, memory, K64_MEMORY_MAP, led);
//!
//! VMPU.init_protection(&mut VECTORS);
//! VMPU.add_acl(AclRequest::new(1, MemoryAddress::new(0x2000_0000), 100, AclFlags::SIZE_ROUND_UP));
//! VMPU.switch(0, 1);
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

pub mod acl;
mod admission;
pub mod backend;
mod bootstrap;
pub mod error;
pub mod fault;
pub mod hal;
pub mod memory_map;
mod switch;
pub mod vectors;

pub use acl::{Acl, AclFlags, AclRequest, BoxId};
pub use backend::{AclBackend, AclVerdict, BackendKind, MemoryBackend};
pub use error::{Halt, HaltReason, ProtectionError};
pub use fault::{FaultClass, TrapContext};
pub use hal::ProtectionRegisters;
pub use memory_map::MemoryMap;
pub use vectors::{ExceptionVectors, VectorTable};

use crate::backend::Backends;
use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use log::error;
use uvisor_sync::Mutex;

/// The collaborators a [`Vmpu`] is built from.
pub trait Platform {
    type Registers: ProtectionRegisters;
    type Peripheral: AclBackend;
    type Memory: MemoryBackend;
    type Map: MemoryMap;
    type Halt: Halt;
}

/// Raw value of [`Vmpu::active`] before bootstrap.
const NO_BOX: u8 = u8::MAX;

/// The protection state of the system.
pub struct Vmpu<P: Platform> {
    registers: P::Registers,
    memory_map: P::Map,
    halt: P::Halt,
    backends: Mutex<Backends<P::Peripheral, P::Memory>>,
    initialized: AtomicBool,
    active: AtomicU8,
}

impl<P: Platform> Vmpu<P> {
    #[must_use]
    pub const fn new(
        registers: P::Registers,
        peripheral: P::Peripheral,
        memory: P::Memory,
        memory_map: P::Map,
        halt: P::Halt,
    ) -> Self {
        Self {
            registers,
            memory_map,
            halt,
            backends: Mutex::new(Backends::new(peripheral, memory)),
            initialized: AtomicBool::new(false),
            active: AtomicU8::new(NO_BOX),
        }
    }

    #[inline]
    #[must_use]
    pub const fn registers(&self) -> &P::Registers {
        &self.registers
    }

    /// The box whose ACLs are enforced, or `None` before bootstrap.
    #[must_use]
    pub fn active_box(&self) -> Option<BoxId> {
        BoxId::new(self.active.load(Ordering::Acquire)).ok()
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Log `err` and halt.
    fn fail(&self, err: ProtectionError) -> ! {
        error!("vmpu: {err}");
        self.halt.halt(err.reason(), format_args!("{err}"))
    }
}
