// Wed Oct 14 2026 - Alex

use crate::memory::{Address, MemoryError, MemoryRegion, RegionLookup};
use memmap2::Mmap;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionDescriptor {
    pub name: String,
    pub base: u64,
    #[serde(default)]
    pub file_offset: usize,
    pub length: usize,
}

impl RegionDescriptor {
    pub fn new(name: &str, base: u64, file_offset: usize, length: usize) -> Self {
        Self {
            name: name.to_string(),
            base,
            file_offset,
            length,
        }
    }
}

enum Backing {
    Mapped(Arc<Mmap>),
    Owned(Vec<u8>),
}

impl Backing {
    fn as_slice(&self) -> &[u8] {
        match self {
            Backing::Mapped(mmap) => mmap.as_ref(),
            Backing::Owned(bytes) => bytes.as_slice(),
        }
    }
}

pub struct StaticRegionMap {
    backing: Backing,
    regions: Vec<RegionDescriptor>,
}

impl StaticRegionMap {
    pub fn open<P: AsRef<Path>>(path: P, regions: Vec<RegionDescriptor>) -> Result<Self, MemoryError> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file) }?;
        Self::with_backing(Backing::Mapped(Arc::new(mmap)), regions)
    }

    pub fn from_bytes(bytes: Vec<u8>, regions: Vec<RegionDescriptor>) -> Result<Self, MemoryError> {
        Self::with_backing(Backing::Owned(bytes), regions)
    }

    fn with_backing(backing: Backing, regions: Vec<RegionDescriptor>) -> Result<Self, MemoryError> {
        let size = backing.as_slice().len();
        for region in &regions {
            let end = region.file_offset.checked_add(region.length);
            if end.map_or(true, |end| end > size) {
                return Err(MemoryError::InvalidRange(format!(
                    "\"{}\" spans 0x{:x}+0x{:x} but the dump is 0x{:x} bytes",
                    region.name, region.file_offset, region.length, size
                )));
            }
        }

        log::debug!("Memory map with {} regions over 0x{:x} bytes", regions.len(), size);

        Ok(Self { backing, regions })
    }

    pub fn regions(&self) -> &[RegionDescriptor] {
        &self.regions
    }

    pub fn dump_size(&self) -> usize {
        self.backing.as_slice().len()
    }
}

impl RegionLookup for StaticRegionMap {
    fn lookup(&self, name: &str) -> Option<MemoryRegion<'_>> {
        let entry = self.regions.iter().find(|r| r.name == name)?;
        let data = &self.backing.as_slice()[entry.file_offset..entry.file_offset + entry.length];
        Some(MemoryRegion::new(&entry.name, Address::new(entry.base), data))
    }
}
