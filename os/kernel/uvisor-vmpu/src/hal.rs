//! # Register Access
//!
//! The protection core touches three things on the core and the bus: the
//! fault enables in `SHCSR`, the MPU error status in `CESR` and the
//! interrupt mask. [`ProtectionRegisters`] is that surface and nothing more.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use uvisor_registers::{Cesr, Shcsr};
use uvisor_sync::InterruptMask;

pub trait ProtectionRegisters: InterruptMask {
    fn load_shcsr(&self) -> Shcsr;
    fn store_shcsr(&self, value: Shcsr);
    fn load_cesr(&self) -> Cesr;
}

impl<R: ProtectionRegisters + ?Sized> ProtectionRegisters for &R {
    #[inline]
    fn load_shcsr(&self) -> Shcsr {
        (**self).load_shcsr()
    }

    #[inline]
    fn store_shcsr(&self, value: Shcsr) {
        (**self).store_shcsr(value);
    }

    #[inline]
    fn load_cesr(&self) -> Cesr {
        (**self).load_cesr()
    }
}

/// CESR after reset on the K64: MPU valid, 5 slave ports, no errors.
pub const CESR_RESET: u32 = 0x0081_5101;

/// A register file in plain memory.
///
/// Starts out like the hardware after reset: faults disabled, interrupts
/// enabled, no MPU errors latched.
#[derive(Debug)]
pub struct SimulatedRegisters {
    shcsr: AtomicU32,
    cesr: AtomicU32,
    irq_enabled: AtomicBool,
}

impl Default for SimulatedRegisters {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedRegisters {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            shcsr: AtomicU32::new(0),
            cesr: AtomicU32::new(CESR_RESET),
            irq_enabled: AtomicBool::new(true),
        }
    }

    pub fn shcsr(&self) -> u32 {
        self.shcsr.load(Ordering::SeqCst)
    }

    pub fn set_shcsr(&self, bits: u32) {
        self.shcsr.store(bits, Ordering::SeqCst);
    }

    pub fn cesr(&self) -> u32 {
        self.cesr.load(Ordering::SeqCst)
    }

    /// Latch an access error on slave port `port` (0..5).
    pub fn latch_access_error(&self, port: u8) {
        let cesr = Cesr::from_bits(self.cesr());
        let sperr = cesr.sperr() | (1 << port);
        self.cesr
            .store(cesr.with_sperr(sperr).into_bits(), Ordering::SeqCst);
    }
}

impl InterruptMask for SimulatedRegisters {
    fn interrupts_enabled(&self) -> bool {
        self.irq_enabled.load(Ordering::SeqCst)
    }

    fn disable_interrupts(&self) {
        self.irq_enabled.store(false, Ordering::SeqCst);
    }

    fn enable_interrupts(&self) {
        self.irq_enabled.store(true, Ordering::SeqCst);
    }
}

impl ProtectionRegisters for SimulatedRegisters {
    fn load_shcsr(&self) -> Shcsr {
        Shcsr::from_bits(self.shcsr())
    }

    fn store_shcsr(&self, value: Shcsr) {
        self.set_shcsr(value.into_bits());
    }

    fn load_cesr(&self) -> Cesr {
        Cesr::from_bits(self.cesr())
    }
}

/// The registers of the running Cortex-M4 / K64.
#[cfg(all(feature = "mmio", target_arch = "arm"))]
#[derive(Debug)]
pub struct CortexM {
    _private: (),
}

#[cfg(all(feature = "mmio", target_arch = "arm"))]
impl CortexM {
    /// # Safety
    /// At most one instance may exist, and it may only be used from
    /// privileged code.
    #[must_use]
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

#[cfg(all(feature = "mmio", target_arch = "arm"))]
impl InterruptMask for CortexM {
    #[inline]
    fn interrupts_enabled(&self) -> bool {
        uvisor_sync::irq::CorePrimask.interrupts_enabled()
    }

    #[inline]
    fn disable_interrupts(&self) {
        uvisor_sync::irq::CorePrimask.disable_interrupts();
    }

    #[inline]
    fn enable_interrupts(&self) {
        uvisor_sync::irq::CorePrimask.enable_interrupts();
    }
}

#[cfg(all(feature = "mmio", target_arch = "arm"))]
impl ProtectionRegisters for CortexM {
    fn load_shcsr(&self) -> Shcsr {
        use uvisor_registers::LoadRegisterUnsafe;
        // SAFETY: privileged by construction
        unsafe { Shcsr::load_unsafe() }
    }

    fn store_shcsr(&self, value: Shcsr) {
        use uvisor_registers::StoreRegisterUnsafe;
        // SAFETY: privileged by construction
        unsafe { value.store_unsafe() }
    }

    fn load_cesr(&self) -> Cesr {
        use uvisor_registers::LoadRegisterUnsafe;
        // SAFETY: privileged by construction
        unsafe { Cesr::load_unsafe() }
    }
}
