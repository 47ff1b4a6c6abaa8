//! # Fault Trap
//!
//! Five zero-argument exception handlers, one per fault class. None of them
//! returns: each one hands the fault to the registered [`TrapContext`],
//! which classifies it and halts.
//!
//! The K64 system MPU reports denied accesses as bus errors. A bus fault is
//! therefore only a bus fault if no slave port has latched an MPU error in
//! `CESR.SPERR`; otherwise it is an access violation. The latched status is
//! left in place for post-mortem inspection.

use crate::error::{HaltReason, ProtectionError};
use crate::hal::ProtectionRegisters;
use crate::vectors::Handler;
use core::fmt;
use uvisor_debug::debug_trace;
use uvisor_sync::OnceSlot;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum FaultClass {
    MemManage,
    Bus,
    Usage,
    Hard,
    DebugMonitor,
}

impl FaultClass {
    pub const ALL: [Self; 5] = [
        Self::MemManage,
        Self::Bus,
        Self::Usage,
        Self::Hard,
        Self::DebugMonitor,
    ];

    /// Cortex-M exception number, i.e. the index into the vector table.
    #[must_use]
    pub const fn exception_number(self) -> usize {
        match self {
            Self::Hard => 3,
            Self::MemManage => 4,
            Self::Bus => 5,
            Self::Usage => 6,
            Self::DebugMonitor => 12,
        }
    }

    #[must_use]
    pub const fn halt_reason(self) -> HaltReason {
        match self {
            Self::MemManage => HaltReason::FaultMemManage,
            Self::Bus => HaltReason::FaultBus,
            Self::Usage => HaltReason::FaultUsage,
            Self::Hard => HaltReason::FaultHard,
            Self::DebugMonitor => HaltReason::FaultDebug,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MemManage => "MemManage",
            Self::Bus => "Bus",
            Self::Usage => "Usage",
            Self::Hard => "Hard",
            Self::DebugMonitor => "DebugMonitor",
        }
    }

    /// The exception handler for this class.
    #[must_use]
    pub const fn handler(self) -> Handler {
        match self {
            Self::MemManage => fault_memmanage,
            Self::Bus => fault_bus,
            Self::Usage => fault_usage,
            Self::Hard => fault_hard,
            Self::DebugMonitor => fault_debug,
        }
    }
}

impl fmt::Display for FaultClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Turn a trapped fault into the condition it is halted with.
#[must_use]
pub fn classify<R: ProtectionRegisters + ?Sized>(class: FaultClass, regs: &R) -> ProtectionError {
    if class == FaultClass::Bus {
        let cesr = regs.load_cesr();
        if cesr.access_error() {
            return ProtectionError::AccessDenied { sperr: cesr.sperr() };
        }
    }
    ProtectionError::Fault(class)
}

/// Receiver of trapped faults.
pub trait TrapContext: Sync {
    fn trap(&self, class: FaultClass) -> !;
}

static TRAP_CONTEXT: OnceSlot<&'static dyn TrapContext> = OnceSlot::new();

/// Bind the fault handlers to `ctx`.
///
/// # Errors
/// Returns `ctx` back if the handlers are already bound.
pub(crate) fn register_trap_context(
    ctx: &'static dyn TrapContext,
) -> Result<(), &'static dyn TrapContext> {
    TRAP_CONTEXT.set(ctx).map(|_| ())
}

fn dispatch(class: FaultClass) -> ! {
    if let Some(ctx) = TRAP_CONTEXT.get() {
        ctx.trap(class)
    }

    // fault before bootstrap; nothing to report to but the debugger
    debug_trace!("uvisor: {} fault with no trap context\n", class);
    loop {
        core::hint::spin_loop();
    }
}

pub extern "C" fn fault_memmanage() {
    dispatch(FaultClass::MemManage)
}

pub extern "C" fn fault_bus() {
    dispatch(FaultClass::Bus)
}

pub extern "C" fn fault_usage() {
    dispatch(FaultClass::Usage)
}

pub extern "C" fn fault_hard() {
    dispatch(FaultClass::Hard)
}

pub extern "C" fn fault_debug() {
    dispatch(FaultClass::DebugMonitor)
}
