//! Interrupt masking.
//!
//! [`InterruptMask`] is the narrow contract the rest of the monitor uses to
//! mask asynchronous interruption. On silicon it is backed by the Cortex-M
//! `PRIMASK` register ([`CorePrimask`]); host tests substitute a simulated
//! flag so the masking discipline can be observed.

/// Masking of configurable-priority interrupts.
pub trait InterruptMask {
    /// Whether interrupts are currently enabled (not masked).
    fn interrupts_enabled(&self) -> bool;

    /// Mask interrupts.
    fn disable_interrupts(&self);

    /// Unmask interrupts.
    fn enable_interrupts(&self);
}

impl<I: InterruptMask + ?Sized> InterruptMask for &I {
    #[inline]
    fn interrupts_enabled(&self) -> bool {
        (**self).interrupts_enabled()
    }

    #[inline]
    fn disable_interrupts(&self) {
        (**self).disable_interrupts();
    }

    #[inline]
    fn enable_interrupts(&self) {
        (**self).enable_interrupts();
    }
}

/// RAII guard that masks interrupts on creation and restores them on drop.
///
/// The guard snapshots the current state. If interrupts were enabled it masks
/// them, and on drop it unmasks them **only** if they were previously
/// enabled, so nesting inside an already-masked region leaves the region
/// masked.
///
/// # Examples
///
/// ```no_run
/// use uvisor_sync::{InterruptMask, IrqGuard};
///
/// fn critical<I: InterruptMask>(mask: &I) {
///     let _g = IrqGuard::new(mask); // masked from here
///     // critical section
/// } // previous state restored here
/// ```
pub struct IrqGuard<'a, I: InterruptMask + ?Sized> {
    mask: &'a I,
    /// Whether interrupts were enabled when the guard was created.
    were_enabled: bool,
}

impl<'a, I: InterruptMask + ?Sized> IrqGuard<'a, I> {
    /// Masks interrupts if they are currently enabled and remembers the state.
    #[inline]
    #[must_use]
    pub fn new(mask: &'a I) -> Self {
        let enabled = mask.interrupts_enabled();
        if enabled {
            mask.disable_interrupts();
        }
        Self {
            mask,
            were_enabled: enabled,
        }
    }

    #[inline]
    #[must_use]
    pub const fn were_enabled(&self) -> bool {
        self.were_enabled
    }
}

impl<I: InterruptMask + ?Sized> Drop for IrqGuard<'_, I> {
    /// Unmasks interrupts only if they were previously enabled.
    fn drop(&mut self) {
        if self.were_enabled {
            self.mask.enable_interrupts();
        }
    }
}

/// Masks interrupts (`cpsid i`).
///
/// # Platform
///
/// ARMv7-M. Ignored by the core when executed unprivileged.
#[cfg(target_arch = "arm")]
#[inline]
pub fn cpsid_disable_interrupts() {
    unsafe { core::arch::asm!("cpsid i", options(nostack, preserves_flags)) }
}

/// Unmasks interrupts (`cpsie i`).
///
/// # Platform
///
/// ARMv7-M. Ignored by the core when executed unprivileged.
#[cfg(target_arch = "arm")]
#[inline]
pub fn cpsie_enable_interrupts() {
    unsafe { core::arch::asm!("cpsie i", options(nostack, preserves_flags)) }
}

/// Returns the current `PRIMASK` value. Bit 0 set means interrupts are masked.
#[cfg(target_arch = "arm")]
#[inline]
#[must_use]
pub fn primask() -> u32 {
    let r: u32;
    unsafe { core::arch::asm!("mrs {}, PRIMASK", out(reg) r, options(nomem, nostack, preserves_flags)) }
    r
}

/// The core's own `PRIMASK`.
#[cfg(target_arch = "arm")]
#[derive(Debug, Default, Copy, Clone)]
pub struct CorePrimask;

#[cfg(target_arch = "arm")]
impl InterruptMask for CorePrimask {
    #[inline]
    fn interrupts_enabled(&self) -> bool {
        primask() & 1 == 0
    }

    #[inline]
    fn disable_interrupts(&self) {
        cpsid_disable_interrupts();
    }

    #[inline]
    fn enable_interrupts(&self) {
        cpsie_enable_interrupts();
    }
}
