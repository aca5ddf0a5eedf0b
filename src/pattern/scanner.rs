// Tue Oct 13 2026 - Alex

use crate::pattern::{Guid, GUID_SIZE};

pub struct SignatureScanner;

impl SignatureScanner {
    /// Lowest offset at which all 16 bytes of `key` match, trying every byte
    /// offset in `0..=len - 16`.
    pub fn find_offset(buffer: &[u8], key: &[u8; GUID_SIZE]) -> Option<usize> {
        Self::find(buffer, key)
    }

    pub fn find_guid(buffer: &[u8], guid: &Guid) -> Option<usize> {
        Self::find_offset(buffer, &guid.to_bytes_le())
    }

    pub fn find(buffer: &[u8], needle: &[u8]) -> Option<usize> {
        if needle.is_empty() || buffer.len() < needle.len() {
            return None;
        }
        buffer.windows(needle.len()).position(|window| window == needle)
    }

    pub fn find_aligned_word(buffer: &[u8], value: u32) -> Option<usize> {
        buffer
            .chunks_exact(4)
            .position(|word| u32::from_le_bytes([word[0], word[1], word[2], word[3]]) == value)
            .map(|index| index * 4)
    }
}
