//! # Region Backends
//!
//! The two ACL stores that own the actual MPU programming. The core only
//! decides which one an ACL goes to and in which order they are switched.

use crate::acl::{AclFlags, BoxId};
use uvisor_memory_addresses::MemoryAddress;

/// Outcome of [`AclBackend::add`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AclVerdict {
    /// The range is not managed by this backend.
    Unhandled,
    /// The backend owns the range but the request is malformed.
    /// Carries the backend's reason code.
    Rejected(u32),
    Accepted,
}

impl AclVerdict {
    /// Decode the integer convention of C backends: `0` is not mine,
    /// `-k` is a rejection with reason `k`, anything positive is accepted.
    #[must_use]
    pub const fn from_raw(raw: i32) -> Self {
        match raw {
            0 => Self::Unhandled,
            r if r < 0 => Self::Rejected(r.unsigned_abs()),
            _ => Self::Accepted,
        }
    }
}

/// An ACL store for one class of address space.
pub trait AclBackend {
    /// Record an ACL for `box_id`.
    fn add(&mut self, box_id: BoxId, start: MemoryAddress, size: u32, flags: AclFlags)
    -> AclVerdict;

    /// Make the ACLs of `dst` effective in place of those of `src`.
    fn switch(&mut self, src: BoxId, dst: BoxId);
}

/// The general-memory store, which needs one-time hardware setup.
pub trait MemoryBackend: AclBackend {
    fn init(&mut self);
}

/// Which backend owns an ACL.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BackendKind {
    Peripheral,
    Memory,
}

impl BackendKind {
    #[inline]
    #[must_use]
    pub const fn for_flags(flags: AclFlags) -> Self {
        if flags.contains(AclFlags::PERIPHERAL) {
            Self::Peripheral
        } else {
            Self::Memory
        }
    }
}

/// Both backends, owned together.
pub struct Backends<P, M> {
    pub peripheral: P,
    pub memory: M,
}

impl<P: AclBackend, M: MemoryBackend> Backends<P, M> {
    pub const fn new(peripheral: P, memory: M) -> Self {
        Self { peripheral, memory }
    }

    pub fn add(
        &mut self,
        kind: BackendKind,
        box_id: BoxId,
        start: MemoryAddress,
        size: u32,
        flags: AclFlags,
    ) -> AclVerdict {
        match kind {
            BackendKind::Peripheral => self.peripheral.add(box_id, start, size, flags),
            BackendKind::Memory => self.memory.add(box_id, start, size, flags),
        }
    }

    /// Peripheral first, then memory.
    pub fn switch(&mut self, src: BoxId, dst: BoxId) {
        self.peripheral.switch(src, dst);
        self.memory.switch(src, dst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_verdicts() {
        assert_eq!(AclVerdict::from_raw(0), AclVerdict::Unhandled);
        assert_eq!(AclVerdict::from_raw(1), AclVerdict::Accepted);
        assert_eq!(AclVerdict::from_raw(i32::MAX), AclVerdict::Accepted);
        assert_eq!(AclVerdict::from_raw(-22), AclVerdict::Rejected(22));
        assert_eq!(
            AclVerdict::from_raw(i32::MIN),
            AclVerdict::Rejected(0x8000_0000)
        );
    }

    #[test]
    fn peripheral_bit_selects_backend() {
        assert_eq!(
            BackendKind::for_flags(AclFlags::PERIPHERAL | AclFlags::UREAD_WRITE),
            BackendKind::Peripheral
        );
        assert_eq!(
            BackendKind::for_flags(AclFlags::UREAD_WRITE | AclFlags::SHARED),
            BackendKind::Memory
        );
        assert_eq!(BackendKind::for_flags(AclFlags::empty()), BackendKind::Memory);
    }
}
