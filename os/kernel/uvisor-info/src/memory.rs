//! # Platform Layout

use uvisor_memory_addresses::MemoryAddress;

/// System Handler Control and State Register (SCB->SHCSR).
pub const SCB_SHCSR: u32 = 0xE000_ED24;

/// Vector Table Offset Register (SCB->VTOR).
pub const SCB_VTOR: u32 = 0xE000_ED08;

/// Kinetis system MPU Control/Error Status Register (MPU->CESR).
pub const MPU_CESR: u32 = 0x4000_D000;

/// ITM stimulus port 0, used for debug output.
pub const ITM_STIM0: u32 = 0xE000_0000;

/// ITM Trace Enable Register.
pub const ITM_TER: u32 = 0xE000_0E00;

/// A named, half-open address range `[base, end)`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct MemMap {
    pub name: &'static str,
    pub base: u32,
    pub end: u32,
}

impl MemMap {
    #[must_use]
    pub const fn new(name: &'static str, base: u32, end: u32) -> Self {
        Self { name, base, end }
    }

    #[inline]
    #[must_use]
    pub const fn contains(&self, addr: MemoryAddress) -> bool {
        let a = addr.as_u32();
        a >= self.base && a < self.end
    }
}

/// Default memory map of the K64 (MK64FN1M0).
pub const K64_MEMORY_MAP: &[MemMap] = &[
    MemMap::new("Flash", 0x0000_0000, 0x0010_0000),
    MemMap::new("SRAM_L", 0x1FFF_0000, 0x2000_0000),
    MemMap::new("SRAM_U", 0x2000_0000, 0x2003_0000),
    MemMap::new("AIPS0", 0x4000_0000, 0x4008_0000),
    MemMap::new("AIPS1", 0x4008_0000, 0x400F_F000),
    MemMap::new("GPIO", 0x400F_F000, 0x4010_0000),
    MemMap::new("PPB", 0xE000_0000, 0xE010_0000),
];

const _: () = {
    let mut i = 0;
    while i < K64_MEMORY_MAP.len() {
        assert!(K64_MEMORY_MAP[i].base < K64_MEMORY_MAP[i].end);
        if i > 0 {
            assert!(K64_MEMORY_MAP[i - 1].end <= K64_MEMORY_MAP[i].base);
        }
        i += 1;
    }
    assert!(MPU_CESR >= 0x4000_0000 && MPU_CESR < 0x4008_0000);
};
