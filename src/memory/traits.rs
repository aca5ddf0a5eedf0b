// Wed Oct 14 2026 - Alex

use crate::memory::MemoryRegion;

/// Platform memory map: resolves a region name such as `"UEFI FD"` to the
/// bytes behind it.
pub trait RegionLookup: Send + Sync {
    fn lookup(&self, name: &str) -> Option<MemoryRegion<'_>>;
}
