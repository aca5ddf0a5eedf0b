// Thu Oct 15 2026 - Alex

use crate::memory::Address;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdiomMatch {
    /// Offset from the TE header of the `adrp` that targets the GUID.
    pub instruction_offset: usize,
    /// Offset of the GUID from the start of program data.
    pub signature_offset: usize,
    /// Image-relative value formed by the look-back pair.
    pub relative_value: u64,
    pub address: Address,
}
