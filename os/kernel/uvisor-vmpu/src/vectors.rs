//! # Exception Vector Table
//!
//! On Cortex-M the vector table is an array of handler addresses indexed by
//! exception number. `VTOR` points the core at it, so a table in RAM can
//! replace the one in flash at run time.
//!
//! ```text
//!  index   0        1       2     3     4        5    6      ...  12       ...  16+n
//!        ┌────────┬───────┬─────┬─────┬────────┬────┬──────┬───┬────────┬───┬────────┐
//!        │ MSP    │ Reset │ NMI │Hard │MemMgmt │Bus │Usage │   │DebugMon│   │ IRQ n  │
//!        └────────┴───────┴─────┴─────┴────────┴────┴──────┴───┴────────┴───┴────────┘
//! ```
//!
//! The table base must be aligned to the next power of two of its size in
//! bytes; `align(512)` covers every table of up to 128 entries, which
//! includes the K64 with its 86 external interrupts.

use crate::fault::FaultClass;
use core::ops::Index;

/// A zero-argument exception handler.
pub type Handler = extern "C" fn();

/// Binds fault handlers to their exception sources.
pub trait ExceptionVectors {
    fn install(&mut self, class: FaultClass, handler: Handler);
}

impl<V: ExceptionVectors + ?Sized> ExceptionVectors for &mut V {
    #[inline]
    fn install(&mut self, class: FaultClass, handler: Handler) {
        (**self).install(class, handler);
    }
}

/// Number of Cortex-M system exception slots preceding the external IRQs.
pub const SYSTEM_EXCEPTIONS: usize = 16;

/// A relocatable vector table with `N` entries.
#[repr(C, align(512))]
pub struct VectorTable<const N: usize> {
    entries: [Option<Handler>; N],
}

impl<const N: usize> Default for VectorTable<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> VectorTable<N> {
    const VALID: () = assert!(N >= SYSTEM_EXCEPTIONS && N <= 128);

    /// An empty table. Empty slots read as null.
    #[must_use]
    pub const fn new() -> Self {
        let () = Self::VALID;
        Self { entries: [None; N] }
    }

    #[inline]
    #[must_use]
    pub const fn entry(&self, exception: usize) -> Option<Handler> {
        self.entries[exception]
    }

    #[inline]
    pub const fn set(&mut self, exception: usize, handler: Handler) {
        self.entries[exception] = Some(handler);
    }

    /// Point `VTOR` at this table.
    ///
    /// # Safety
    /// Must run privileged, and every exception that can occur from here on
    /// must have a handler in the table.
    #[cfg(all(feature = "mmio", target_arch = "arm"))]
    pub unsafe fn load(&'static self) {
        use uvisor_registers::{StoreRegisterUnsafe, Vtor};

        let base = core::ptr::from_ref(self) as u32;
        unsafe { Vtor::from_base(base).store_unsafe() };
        // SAFETY: barriers only
        unsafe { core::arch::asm!("dsb", "isb", options(nostack, preserves_flags)) };
    }
}

impl<const N: usize> ExceptionVectors for VectorTable<N> {
    fn install(&mut self, class: FaultClass, handler: Handler) {
        self.set(class.exception_number(), handler);
    }
}

impl<const N: usize> Index<usize> for VectorTable<N> {
    type Output = Option<Handler>;

    fn index(&self, i: usize) -> &Self::Output {
        &self.entries[i]
    }
}
