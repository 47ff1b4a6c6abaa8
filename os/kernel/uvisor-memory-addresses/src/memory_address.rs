use crate::Granularity;
use core::fmt;

/// Principal raw 32-bit bus address.
#[repr(transparent)]
#[derive(Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct MemoryAddress(u32);

impl MemoryAddress {
    #[inline]
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    #[inline]
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Whether the low `G::SHIFT` bits are all zero.
    #[inline]
    #[must_use]
    pub const fn is_aligned<G: Granularity>(self) -> bool {
        self.0 & (G::SIZE - 1) == 0
    }
}

impl fmt::Debug for MemoryAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 0xHHHH_HHHH style
        write!(f, "MemoryAddress(0x{:04X}_{:04X})", self.0 >> 16, self.0 & 0xFFFF)
    }
}

impl fmt::Display for MemoryAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

impl From<u32> for MemoryAddress {
    #[inline]
    fn from(v: u32) -> Self {
        Self::new(v)
    }
}

impl From<MemoryAddress> for u32 {
    #[inline]
    fn from(a: MemoryAddress) -> Self {
        a.as_u32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Granule32;

    #[test]
    fn alignment_follows_low_bits() {
        assert!(MemoryAddress::new(0x2000_0000).is_aligned::<Granule32>());
        assert!(MemoryAddress::new(0x4000_0020).is_aligned::<Granule32>());
        assert!(!MemoryAddress::new(0x2000_0004).is_aligned::<Granule32>());
    }

    #[test]
    fn display_is_zero_padded() {
        assert_eq!(format!("{}", MemoryAddress::new(0x1F)), "0x0000001F");
        assert_eq!(
            format!("{:?}", MemoryAddress::new(0x2000_0000)),
            "MemoryAddress(0x2000_0000)"
        );
    }
}
