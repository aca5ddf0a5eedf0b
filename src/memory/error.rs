// Tue Oct 13 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Region not found: {0}")]
    RegionNotFound(String),
    #[error("Out of bounds: offset 0x{offset:x} (+{len}) outside region of 0x{size:x} bytes")]
    OutOfBounds { offset: usize, len: usize, size: usize },
    #[error("Invalid memory range: {0}")]
    InvalidRange(String),
}
