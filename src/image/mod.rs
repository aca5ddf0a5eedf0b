// Wed Oct 14 2026 - Alex

pub mod error;
pub mod locator;
pub mod te;

pub use error::ImageError;
pub use locator::ImageLocator;
pub use te::{DataDirectory, TeHeader, SECTION_HEADER_SIZE, TE_HEADER_SIZE, TE_IMAGE_MAGIC};

use crate::arm64::{InstructionDecoder, InstructionWord};
use crate::memory::{Address, MemoryRegion};

/// A TE image found inside a memory region.
///
/// `data` runs from the TE header to the end of the enclosing region. Offsets
/// handed to [`TeImage::instruction_at`] are relative to the header, offsets
/// into [`TeImage::program_bytes`] are relative to `program_start`.
#[derive(Debug, Clone, Copy)]
pub struct TeImage<'a> {
    base_address: Address,
    header: TeHeader,
    data: &'a [u8],
    program_offset: usize,
}

impl<'a> TeImage<'a> {
    /// `region` must begin at the TE header.
    pub fn parse(region: MemoryRegion<'a>) -> Result<Self, ImageError> {
        let data = region.data();
        let header = TeHeader::parse(data)?;

        let headers_size = header.headers_size();
        if headers_size > data.len() {
            return Err(ImageError::TruncatedHeader {
                expected: headers_size,
                actual: data.len(),
            });
        }

        // Section data is aligned; skip the zero fill after the section table.
        let mut program_offset = headers_size;
        loop {
            match region.read_u32(program_offset) {
                Ok(0) => program_offset += 4,
                Ok(_) => break,
                Err(_) => return Err(ImageError::NoProgramData(region.start().as_u64())),
            }
        }

        Ok(Self {
            base_address: region.start(),
            header,
            data,
            program_offset,
        })
    }

    pub fn header(&self) -> &TeHeader {
        &self.header
    }

    pub fn base_address(&self) -> Address {
        self.base_address
    }

    pub fn program_start(&self) -> Address {
        self.base_address + self.program_offset as u64
    }

    pub fn program_offset(&self) -> usize {
        self.program_offset
    }

    pub fn total_size(&self) -> usize {
        self.data.len()
    }

    pub fn code_size(&self) -> usize {
        self.data.len().saturating_sub(TE_HEADER_SIZE)
    }

    pub fn base_of_code(&self) -> u64 {
        self.header.base_of_code as u64
    }

    pub fn image_base(&self) -> u64 {
        self.header.image_base
    }

    pub fn bytes(&self) -> &'a [u8] {
        self.data
    }

    pub fn program_bytes(&self) -> &'a [u8] {
        &self.data[self.program_offset..]
    }

    pub fn word_at(&self, offset: usize) -> Option<u32> {
        let end = offset.checked_add(4)?;
        let bytes = self.data.get(offset..end)?;
        Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn instruction_at(&self, offset: usize) -> Option<InstructionWord> {
        self.word_at(offset).map(InstructionDecoder::decode)
    }

    pub fn link_address(&self, value: u64) -> Address {
        Address::new(value) + self.base_of_code() + self.image_base()
    }
}
