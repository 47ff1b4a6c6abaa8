use bitfield_struct::bitfield;

/// SHCSR: System Handler Control and State Register (ARMv7-M, `0xE000_ED24`).
///
/// The low half reports active and pending system exceptions; bits 16–18
/// enable the configurable faults. While an enable bit is clear the
/// corresponding fault escalates to `HardFault`.
#[bitfield(u32)]
pub struct Shcsr {
    /// Bit 0 (MEMFAULTACT): `MemManage` exception active.
    pub memfault_act: bool,

    /// Bit 1 (BUSFAULTACT): `BusFault` exception active.
    pub busfault_act: bool,

    #[bits(1)]
    _reserved_2: u8,

    /// Bit 3 (USGFAULTACT): `UsageFault` exception active.
    pub usgfault_act: bool,

    #[bits(3)]
    _reserved_4_6: u8,

    /// Bit 7 (SVCALLACT): `SVCall` active.
    pub svcall_act: bool,

    /// Bit 8 (MONITORACT): Debug monitor active.
    pub monitor_act: bool,

    #[bits(1)]
    _reserved_9: u8,

    /// Bit 10 (PENDSVACT): `PendSV` active.
    pub pendsv_act: bool,

    /// Bit 11 (SYSTICKACT): `SysTick` active.
    pub systick_act: bool,

    /// Bit 12 (USGFAULTPENDED).
    pub usgfault_pended: bool,

    /// Bit 13 (MEMFAULTPENDED).
    pub memfault_pended: bool,

    /// Bit 14 (BUSFAULTPENDED).
    pub busfault_pended: bool,

    /// Bit 15 (SVCALLPENDED).
    pub svcall_pended: bool,

    /// Bit 16 (MEMFAULTENA): enable `MemManage` fault.
    pub memfault_ena: bool,

    /// Bit 17 (BUSFAULTENA): enable `BusFault`.
    pub busfault_ena: bool,

    /// Bit 18 (USGFAULTENA): enable `UsageFault`.
    pub usgfault_ena: bool,

    /// Bits 19–31: Reserved.
    #[bits(13)]
    _reserved_19_31: u16,
}

impl Shcsr {
    /// Mask of the three configurable-fault enable bits (`0x0007_0000`).
    pub const FAULT_ENABLE_MASK: u32 = 0x0007_0000;

    /// Returns `self` with `MemManage`, `BusFault` and `UsageFault` enabled and
    /// every other bit untouched.
    #[inline]
    #[must_use]
    pub const fn with_faults_enabled(self) -> Self {
        self.with_memfault_ena(true)
            .with_busfault_ena(true)
            .with_usgfault_ena(true)
    }

    #[inline]
    #[must_use]
    pub const fn faults_enabled(&self) -> bool {
        self.memfault_ena() && self.busfault_ena() && self.usgfault_ena()
    }
}

#[cfg(feature = "mmio")]
impl crate::LoadRegisterUnsafe for Shcsr {
    unsafe fn load_unsafe() -> Self {
        Self::from_bits(unsafe { crate::mmio_read(uvisor_info::memory::SCB_SHCSR) })
    }
}

#[cfg(feature = "mmio")]
impl crate::StoreRegisterUnsafe for Shcsr {
    unsafe fn store_unsafe(self) {
        unsafe { crate::mmio_write(uvisor_info::memory::SCB_SHCSR, self.into_bits()) }
    }
}
