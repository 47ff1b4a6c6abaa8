//! # Fatal Conditions
//!
//! Every condition the protection core detects is fatal. [`ProtectionError`]
//! classifies it and carries the context for the halt message; the
//! [`Halt`] facility turns it into a stop that never returns.

use crate::fault::FaultClass;
use core::fmt;
use uvisor_memory_addresses::MemoryAddress;

/// Why the system was halted. Selects the fault-coded indicator pattern.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum HaltReason {
    /// Malformed request or broken internal invariant.
    SanityCheckFailed,
    /// Access outside the permitted ranges.
    NotAllowed,
    FaultMemManage,
    FaultBus,
    FaultUsage,
    FaultHard,
    FaultDebug,
}

impl HaltReason {
    /// Number of blinks of the fault indicator for this reason.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::FaultMemManage => 1,
            Self::FaultBus => 2,
            Self::FaultUsage => 3,
            Self::FaultHard => 4,
            Self::FaultDebug => 5,
            Self::NotAllowed => 6,
            Self::SanityCheckFailed => 7,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SanityCheckFailed => "SANITY_CHECK_FAILED",
            Self::NotAllowed => "NOT_ALLOWED",
            Self::FaultMemManage => "FAULT_MEMMANAGE",
            Self::FaultBus => "FAULT_BUS",
            Self::FaultUsage => "FAULT_USAGE",
            Self::FaultHard => "FAULT_HARD",
            Self::FaultDebug => "FAULT_DEBUG",
        }
    }
}

impl fmt::Display for HaltReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ProtectionError {
    #[error("box ID out of range ({0})")]
    BoxIdOutOfRange(u8),

    #[error("ACL start address is not aligned [{0}]")]
    UnalignedStart(MemoryAddress),

    #[error("ACL size cannot be rounded up [{start} size={size}]")]
    SizeOverflow { start: MemoryAddress, size: u32 },

    /// No backend claims the address range.
    #[error("ACL in unhandled memory area [{start} size={size}]")]
    UnhandledArea { start: MemoryAddress, size: u32 },

    /// The owning backend found the request malformed; carries its reason.
    #[error("ACL sanity check failed [{0}]")]
    BackendRejected(u32),

    /// Protection state was entered again while already being changed.
    #[error("protection state re-entered during update")]
    Reentered,

    /// A bus fault raised by an MPU access denial.
    #[error("access not allowed (MPU slave port error {sperr:#04x})")]
    AccessDenied { sperr: u8 },

    #[error("{0} fault")]
    Fault(FaultClass),
}

impl ProtectionError {
    #[must_use]
    pub const fn reason(&self) -> HaltReason {
        match self {
            Self::BoxIdOutOfRange(_)
            | Self::UnalignedStart(_)
            | Self::SizeOverflow { .. }
            | Self::BackendRejected(_)
            | Self::Reentered => HaltReason::SanityCheckFailed,
            Self::UnhandledArea { .. } | Self::AccessDenied { .. } => HaltReason::NotAllowed,
            Self::Fault(class) => class.halt_reason(),
        }
    }
}

/// The halt facility.
///
/// Implementations emit `message`, raise the indicator for `reason` and stop
/// the core. There is no return path.
pub trait Halt {
    fn halt(&self, reason: HaltReason, message: fmt::Arguments) -> !;
}

impl<H: Halt + ?Sized> Halt for &H {
    fn halt(&self, reason: HaltReason, message: fmt::Arguments) -> ! {
        (**self).halt(reason, message)
    }
}
