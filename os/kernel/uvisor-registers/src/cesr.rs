use bitfield_struct::bitfield;

/// MPU->CESR: Kinetis system MPU Control/Error Status Register (`0x4000_D000`).
///
/// The Kinetis MPU sits on the crossbar, not in the core. An access it denies
/// is terminated with a bus error, so the core reports a `BusFault` rather than
/// a `MemManage` fault. `SPERR` is the only way to tell the two apart.
#[bitfield(u32)]
pub struct Cesr {
    /// Bit 0 (VLD): MPU valid (enabled).
    pub vld: bool,

    #[bits(7)]
    _reserved_1_7: u8,

    /// Bits 8–11 (NRGD): number of region descriptors (encoded).
    #[bits(4)]
    pub nrgd: u8,

    /// Bits 12–15 (NSP): number of slave ports.
    #[bits(4)]
    pub nsp: u8,

    /// Bits 16–19 (HRL): hardware revision level.
    #[bits(4)]
    pub hrl: u8,

    #[bits(7)]
    _reserved_20_26: u8,

    /// Bits 27–31 (SPERR): slave port n error, one bit per crossbar slave
    /// port. Set when an access on that port was denied by the MPU; cleared
    /// by writing 1.
    #[bits(5)]
    pub sperr: u8,
}

impl Cesr {
    /// Whether any slave port has latched an MPU access error.
    #[inline]
    #[must_use]
    pub const fn access_error(&self) -> bool {
        self.sperr() != 0
    }
}

#[cfg(feature = "mmio")]
impl crate::LoadRegisterUnsafe for Cesr {
    unsafe fn load_unsafe() -> Self {
        Self::from_bits(unsafe { crate::mmio_read(uvisor_info::memory::MPU_CESR) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_value_has_no_access_error() {
        let v = Cesr::from_bits(0x0081_5101);
        assert!(v.vld());
        assert_eq!(v.nsp(), 5);
        assert!(!v.access_error());
    }

    #[test]
    fn any_sperr_bit_is_an_access_error() {
        for port in 0..5 {
            let v = Cesr::from_bits(0x0081_5101 | (1 << (27 + port)));
            assert!(v.access_error(), "port {port}");
            assert_eq!(v.sperr(), 1 << port);
        }
    }
}
