// Wed Oct 14 2026 - Alex

use crate::image::ImageError;

/// "VZ" followed by the AArch64 machine type 0xAA64, read as one LE word.
pub const TE_IMAGE_MAGIC: u32 = 0xAA64_5A56;
pub const TE_SIGNATURE: u16 = 0x5A56;
pub const TE_HEADER_SIZE: usize = 40;
pub const SECTION_HEADER_SIZE: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DataDirectory {
    pub virtual_address: u32,
    pub size: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeHeader {
    pub signature: u16,
    pub machine: u16,
    pub number_of_sections: u8,
    pub subsystem: u8,
    pub stripped_size: u16,
    pub address_of_entry_point: u32,
    pub base_of_code: u32,
    pub image_base: u64,
    pub relocation_directory: DataDirectory,
    pub debug_directory: DataDirectory,
}

impl TeHeader {
    pub fn parse(data: &[u8]) -> Result<Self, ImageError> {
        if data.len() < TE_HEADER_SIZE {
            return Err(ImageError::TruncatedHeader {
                expected: TE_HEADER_SIZE,
                actual: data.len(),
            });
        }

        Ok(Self {
            signature: read_u16(data, 0),
            machine: read_u16(data, 2),
            number_of_sections: data[4],
            subsystem: data[5],
            stripped_size: read_u16(data, 6),
            address_of_entry_point: read_u32(data, 8),
            base_of_code: read_u32(data, 12),
            image_base: read_u64(data, 16),
            relocation_directory: DataDirectory {
                virtual_address: read_u32(data, 24),
                size: read_u32(data, 28),
            },
            debug_directory: DataDirectory {
                virtual_address: read_u32(data, 32),
                size: read_u32(data, 36),
            },
        })
    }

    pub fn headers_size(&self) -> usize {
        TE_HEADER_SIZE + SECTION_HEADER_SIZE * self.number_of_sections as usize
    }
}

// Callers check the length before reading.
fn read_u16(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

fn read_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([data[offset], data[offset + 1], data[offset + 2], data[offset + 3]])
}

fn read_u64(data: &[u8], offset: usize) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&data[offset..offset + 8]);
    u64::from_le_bytes(bytes)
}
