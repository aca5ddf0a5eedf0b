// Wed Oct 14 2026 - Alex

use crate::memory::MemoryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("TE signature 0x{magic:08x} not found in \"{region}\"")]
    SignatureNotFound { region: String, magic: u32 },
    #[error("Truncated TE header: expected {expected} bytes, got {actual}")]
    TruncatedHeader { expected: usize, actual: usize },
    #[error("No program data after TE headers at 0x{0:x}")]
    NoProgramData(u64),
    #[error(transparent)]
    Memory(#[from] MemoryError),
}
