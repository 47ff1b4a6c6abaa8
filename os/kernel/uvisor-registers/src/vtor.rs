use bitfield_struct::bitfield;

/// VTOR: Vector Table Offset Register (ARMv7-M, `0xE000_ED08`).
#[bitfield(u32)]
pub struct Vtor {
    /// Bits 0–6: Reserved.
    #[bits(7)]
    _reserved_0_6: u8,

    /// Bits 7–31 (TBLOFF): vector table base, in units of 128 bytes.
    #[bits(25)]
    pub tbloff: u32,
}

impl Vtor {
    /// VTOR value for a table located at `base`. The low 7 bits are dropped.
    #[inline]
    #[must_use]
    pub const fn from_base(base: u32) -> Self {
        Self::new().with_tbloff(base >> 7)
    }

    #[inline]
    #[must_use]
    pub const fn base(&self) -> u32 {
        self.tbloff() << 7
    }
}

#[cfg(feature = "mmio")]
impl crate::LoadRegisterUnsafe for Vtor {
    unsafe fn load_unsafe() -> Self {
        Self::from_bits(unsafe { crate::mmio_read(uvisor_info::memory::SCB_VTOR) })
    }
}

#[cfg(feature = "mmio")]
impl crate::StoreRegisterUnsafe for Vtor {
    unsafe fn store_unsafe(self) {
        unsafe { crate::mmio_write(uvisor_info::memory::SCB_VTOR, self.into_bits()) }
    }
}
