use uvisor_info::memory::MemMap;
use uvisor_memory_addresses::MemoryAddress;

/// Resolves addresses to named regions. Diagnostics only.
pub trait MemoryMap {
    fn lookup(&self, addr: MemoryAddress) -> Option<&MemMap>;
}

impl MemoryMap for [MemMap] {
    fn lookup(&self, addr: MemoryAddress) -> Option<&MemMap> {
        self.iter().find(|m| m.contains(addr))
    }
}

impl<T: MemoryMap + ?Sized> MemoryMap for &T {
    #[inline]
    fn lookup(&self, addr: MemoryAddress) -> Option<&MemMap> {
        (**self).lookup(addr)
    }
}

/// Name of the region containing `addr`, or `"unknown"`.
#[must_use]
pub fn region_name<M: MemoryMap + ?Sized>(map: &M, addr: MemoryAddress) -> &str {
    map.lookup(addr).map_or("unknown", |m| m.name)
}
