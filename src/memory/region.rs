// Tue Oct 13 2026 - Alex

use crate::memory::{Address, MemoryError};
use std::fmt;

#[derive(Debug, Clone, Copy)]
pub struct MemoryRegion<'a> {
    name: &'a str,
    base: Address,
    data: &'a [u8],
}

impl<'a> MemoryRegion<'a> {
    pub fn new(name: &'a str, base: Address, data: &'a [u8]) -> Self {
        Self { name, base, data }
    }

    /// Wraps memory that is already mapped at `base` in the current address space.
    ///
    /// # Safety
    ///
    /// `base..base + len` must be readable for `'a` and must not be written to
    /// while the region is alive.
    pub unsafe fn from_raw(name: &'a str, base: Address, len: usize) -> Self {
        let data = std::slice::from_raw_parts(base.as_ptr(), len);
        Self { name, base, data }
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn start(&self) -> Address {
        self.base
    }

    pub fn end(&self) -> Address {
        self.base + self.data.len() as u64
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn contains(&self, addr: Address) -> bool {
        addr >= self.start() && addr < self.end()
    }

    pub fn read_bytes(&self, offset: usize, len: usize) -> Result<&'a [u8], MemoryError> {
        offset
            .checked_add(len)
            .and_then(|end| self.data.get(offset..end))
            .ok_or(MemoryError::OutOfBounds { offset, len, size: self.data.len() })
    }

    pub fn read_u32(&self, offset: usize) -> Result<u32, MemoryError> {
        let bytes = self.read_bytes(offset, 4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn tail(&self, offset: usize) -> Result<MemoryRegion<'a>, MemoryError> {
        let data = self.data.get(offset..).ok_or(MemoryError::OutOfBounds {
            offset,
            len: 0,
            size: self.data.len(),
        })?;
        Ok(Self {
            name: self.name,
            base: self.base + offset as u64,
            data,
        })
    }
}

impl fmt::Display for MemoryRegion<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" {}-{}", self.name, self.start(), self.end())
    }
}
