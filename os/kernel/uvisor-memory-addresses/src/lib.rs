//! # 32-bit Memory Addresses and Protection Granules
//!
//! Strongly typed wrappers for the raw bus addresses handed to the memory
//! protection core, and the rounding helpers used to normalize ACL sizes.
//!
//! ## Overview
//!
//! | Concept | Generic | Description |
//! |----------|----------|-------------|
//! | [`MemoryAddress`] | – | A raw 32-bit bus address (flash, SRAM or peripheral space). |
//! | [`Granularity`] | – | Marker trait for the smallest protectable unit of an MPU. |
//! | [`Granule32`] | – | The 32-byte granule of the Kinetis system MPU. |
//!
//! ## Typical Usage
//!
//! ```rust
//! # use uvisor_memory_addresses::*;
//! let start = MemoryAddress::new(0x2000_0000);
//! assert!(start.is_aligned::<Granule32>());
//!
//! assert_eq!(round_down::<Granule32>(100), 96);
//! assert_eq!(round_up::<Granule32>(100), Some(128));
//! assert_eq!(round_up::<Granule32>(u32::MAX), None);
//! ```
//!
//! ## Design Notes
//!
//! - [`MemoryAddress`] is `#[repr(transparent)]` over `u32`; Cortex-M has a
//!   flat 4 GiB bus and no address translation.
//! - Rounding up is checked: a size that cannot be raised to the next granule
//!   without wrapping yields `None` instead of silently becoming `0`.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(clippy::inline_always)]

mod memory_address;

use core::fmt;
use core::hash::Hash;

pub use crate::memory_address::MemoryAddress;

/// Sealed trait pattern to restrict `Granularity` impls to our markers.
mod sealed {
    pub trait Sealed {}
}

/// Marker trait for supported protection granules.
pub trait Granularity:
    sealed::Sealed + Clone + Copy + Eq + PartialEq + Ord + PartialOrd + Hash + fmt::Display + fmt::Debug
{
    /// Granule size in bytes (power of two).
    const SIZE: u32;
    /// log2(SIZE), i.e., number of low address bits that must be zero.
    const SHIFT: u32;

    fn as_str() -> &'static str;
}

/// 32-byte granule, the region resolution of the Kinetis K64 system MPU.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Granule32;
impl sealed::Sealed for Granule32 {}
impl Granularity for Granule32 {
    const SIZE: u32 = 32;
    const SHIFT: u32 = 5;

    fn as_str() -> &'static str {
        "32B"
    }
}

impl fmt::Display for Granule32 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(Self::as_str())
    }
}

impl fmt::Debug for Granule32 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self, f)
    }
}

const _: () = assert!(Granule32::SIZE == 1 << Granule32::SHIFT);

/// Truncate `size` to the nearest lower multiple of the granule `G`.
#[inline(always)]
#[must_use]
pub const fn round_down<G: Granularity>(size: u32) -> u32 {
    size & !(G::SIZE - 1)
}

/// Raise `size` to the nearest higher multiple of the granule `G`.
///
/// Returns `None` if the result does not fit into 32 bits.
#[inline(always)]
#[must_use]
pub const fn round_up<G: Granularity>(size: u32) -> Option<u32> {
    match size.checked_add(G::SIZE - 1) {
        Some(v) => Some(v & !(G::SIZE - 1)),
        None => None,
    }
}

/// Whether `size` is an exact multiple of the granule `G`.
#[inline(always)]
#[must_use]
pub const fn is_granular<G: Granularity>(size: u32) -> bool {
    size & (G::SIZE - 1) == 0
}
