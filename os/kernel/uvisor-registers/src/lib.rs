//! # Typed Cortex-M4 / Kinetis Protection Registers
//!
//! Bit-accurate models of the few registers the protection core touches:
//!
//! - [`Shcsr`](shcsr::Shcsr): enables the configurable fault exceptions.
//! - [`Cesr`](cesr::Cesr): Kinetis system MPU status, including the per-port
//!   access-error flags that turn MPU denials into bus faults.
//! - [`Vtor`](vtor::Vtor): relocates the exception vector table.
//!
//! With the `mmio` feature the types also implement [`LoadRegisterUnsafe`] /
//! [`StoreRegisterUnsafe`] through volatile accesses at their architectural
//! addresses. Without it they are plain values, which is what host tests use.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

pub mod cesr;
pub mod shcsr;
pub mod vtor;

pub use cesr::Cesr;
pub use shcsr::Shcsr;
pub use vtor::Vtor;

pub trait LoadRegisterUnsafe {
    /// # Safety
    /// The caller must uphold the implementation-specific safety requirements.
    /// For example, the register access might be privileged and require handler
    /// or privileged thread mode.
    unsafe fn load_unsafe() -> Self;
}

pub trait StoreRegisterUnsafe {
    /// # Safety
    /// The caller must uphold the implementation-specific safety requirements.
    /// For example, the register access might be privileged and require handler
    /// or privileged thread mode.
    unsafe fn store_unsafe(self);
}

#[cfg(feature = "mmio")]
#[inline(always)]
#[allow(clippy::inline_always)]
pub(crate) unsafe fn mmio_read(addr: u32) -> u32 {
    unsafe { core::ptr::read_volatile(addr as usize as *const u32) }
}

#[cfg(feature = "mmio")]
#[inline(always)]
#[allow(clippy::inline_always)]
pub(crate) unsafe fn mmio_write(addr: u32, value: u32) {
    unsafe { core::ptr::write_volatile(addr as usize as *mut u32, value) }
}
