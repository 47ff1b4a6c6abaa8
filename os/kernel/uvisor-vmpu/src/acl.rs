//! # Boxes and ACL Requests
//!
//! An ACL request names a box, a start address, a size and a flag set. It is
//! consumed once by [`Vmpu::add_acl`](crate::Vmpu::add_acl); validation and
//! size normalization happen in [`AclRequest::resolve`], which is pure and
//! performs every check before anything reaches a backend.

use crate::error::ProtectionError;
use core::fmt;
use uvisor_info::config::{AclGranule, BOOTSTRAP_BOX, UVISOR_MAX_BOXES};
use uvisor_memory_addresses::{MemoryAddress, round_down, round_up};

/// A validated box ID, always `< UVISOR_MAX_BOXES`.
///
/// The only way to obtain one from a raw integer is [`BoxId::new`], so
/// backends never see an out-of-range ID.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct BoxId(u8);

impl BoxId {
    /// Box 0, the privileged domain active at power-on.
    pub const BOOTSTRAP: Self = Self(BOOTSTRAP_BOX);

    /// Exclusive upper bound of valid IDs.
    pub const MAX: u8 = UVISOR_MAX_BOXES;

    /// # Errors
    /// [`ProtectionError::BoxIdOutOfRange`] if `raw >= UVISOR_MAX_BOXES`.
    #[inline]
    pub const fn new(raw: u8) -> Result<Self, ProtectionError> {
        if raw < Self::MAX {
            Ok(Self(raw))
        } else {
            Err(ProtectionError::BoxIdOutOfRange(raw))
        }
    }

    #[inline]
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for BoxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "box {}", self.0)
    }
}

bitflags::bitflags! {
    /// Box ACL flags.
    ///
    /// Only [`SIZE_ROUND_UP`](Self::SIZE_ROUND_UP),
    /// [`SIZE_ROUND_DOWN`](Self::SIZE_ROUND_DOWN) and
    /// [`PERIPHERAL`](Self::PERIPHERAL) are interpreted by the protection
    /// core. Every other bit, including bits not named here, is passed to
    /// the backend untouched.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct AclFlags: u32 {
        /// Unprivileged execute.
        const UEXECUTE        = 0x0001;
        /// Unprivileged write.
        const UWRITE          = 0x0002;
        /// Unprivileged read.
        const UREAD           = 0x0004;
        /// Privileged execute.
        const SEXECUTE        = 0x0008;
        /// Privileged write.
        const SWRITE          = 0x0010;
        /// Privileged read.
        const SREAD           = 0x0020;

        /// Raise the size to the next multiple of the protection granule.
        const SIZE_ROUND_UP   = 0x0040;
        /// Truncate the size to the previous multiple of the protection
        /// granule. Takes precedence over `SIZE_ROUND_UP`.
        const SIZE_ROUND_DOWN = 0x0080;

        /// The range lies in peripheral address space; routes the ACL to the
        /// peripheral backend instead of the general-memory backend.
        const PERIPHERAL      = 0x0100;
        /// The range is shared between boxes.
        const SHARED          = 0x0200;
        /// Box-owned (as opposed to monitor-owned) range.
        const USER            = 0x0400;
        /// Interrupt ACL.
        const IRQ             = 0x0800;

        const UREAD_WRITE = Self::UREAD.bits() | Self::UWRITE.bits();
        const SREAD_WRITE = Self::SREAD.bits() | Self::SWRITE.bits();

        // opaque permission bits from newer box configurations
        const _ = !0;
    }
}

/// One ACL as handed over by box configuration.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct AclRequest {
    pub box_id: u8,
    pub start: MemoryAddress,
    pub size: u32,
    pub flags: AclFlags,
}

/// An admitted ACL: box ID checked, start aligned, size normalized.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Acl {
    pub box_id: BoxId,
    pub start: MemoryAddress,
    pub size: u32,
    pub flags: AclFlags,
}

impl AclRequest {
    #[must_use]
    pub const fn new(box_id: u8, start: MemoryAddress, size: u32, flags: AclFlags) -> Self {
        Self {
            box_id,
            start,
            size,
            flags,
        }
    }

    /// Validate the request and normalize its size.
    ///
    /// Checks run in a fixed order: box ID, then start alignment, then
    /// rounding. The first failure wins.
    ///
    /// # Errors
    /// - [`ProtectionError::BoxIdOutOfRange`]
    /// - [`ProtectionError::UnalignedStart`]
    /// - [`ProtectionError::SizeOverflow`] when rounding up does not fit
    ///   into 32 bits.
    pub const fn resolve(self) -> Result<Acl, ProtectionError> {
        let box_id = match BoxId::new(self.box_id) {
            Ok(id) => id,
            Err(e) => return Err(e),
        };

        if !self.start.is_aligned::<AclGranule>() {
            return Err(ProtectionError::UnalignedStart(self.start));
        }

        let size = match resolve_size(self.size, self.flags) {
            Some(size) => size,
            None => {
                return Err(ProtectionError::SizeOverflow {
                    start: self.start,
                    size: self.size,
                });
            }
        };

        Ok(Acl {
            box_id,
            start: self.start,
            size,
            flags: self.flags,
        })
    }
}

/// Apply the rounding flags to `size`.
///
/// Returns `None` only if rounding up would wrap around.
#[must_use]
pub const fn resolve_size(size: u32, flags: AclFlags) -> Option<u32> {
    if flags.contains(AclFlags::SIZE_ROUND_DOWN) {
        Some(round_down::<AclGranule>(size))
    } else if flags.contains(AclFlags::SIZE_ROUND_UP) {
        round_up::<AclGranule>(size)
    } else {
        Some(size)
    }
}
