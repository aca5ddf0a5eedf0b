// Thu Oct 15 2026 - Alex

//! Synthetic firmware volumes for tests: filler, a TE header, a section
//! table, padding, GUIDs and hand-placed instruction words.

use crate::arm64::InstructionEncoder;
use crate::image::{SECTION_HEADER_SIZE, TE_HEADER_SIZE, TE_IMAGE_MAGIC};
use crate::memory::{Address, MemoryRegion, RegionDescriptor, StaticRegionMap};
use crate::pattern::Guid;

pub const SCHEDULER_GUID: Guid = Guid::new(
    0x6b0e_52d1,
    0x3c2a,
    0x4e19,
    [0x91, 0x0f, 0x2d, 0x7a, 0x55, 0xe3, 0x18, 0xc4],
);

pub const DT_OPS_GUID: Guid = Guid::new(
    0x0c5a_7e33,
    0x81d4,
    0x47b2,
    [0xa6, 0x5e, 0x09, 0x3b, 0xcf, 0x21, 0x74, 0x8d],
);

pub struct ImageBuilder {
    region_name: String,
    region_base: u64,
    region_size: usize,
    header_offset: usize,
    sections: u8,
    padding_words: usize,
    base_of_code: u32,
    image_base: u64,
    guids: Vec<(usize, Guid)>,
    words: Vec<(usize, u32)>,
}

impl ImageBuilder {
    pub fn new() -> Self {
        Self {
            region_name: "UEFI FD".to_string(),
            region_base: 0x5FC0_0000,
            region_size: 0x10000,
            header_offset: 0x1000,
            sections: 2,
            padding_words: 1,
            base_of_code: 0x1000,
            image_base: 0x9000_0000,
            guids: Vec::new(),
            words: Vec::new(),
        }
    }

    pub fn with_region_name(mut self, name: &str) -> Self {
        self.region_name = name.to_string();
        self
    }

    pub fn with_region_size(mut self, size: usize) -> Self {
        self.region_size = size;
        self
    }

    pub fn with_header_offset(mut self, offset: usize) -> Self {
        self.header_offset = offset;
        self
    }

    pub fn with_sections(mut self, sections: u8) -> Self {
        self.sections = sections;
        self
    }

    pub fn with_padding_words(mut self, words: usize) -> Self {
        self.padding_words = words;
        self
    }

    pub fn with_base_of_code(mut self, base_of_code: u32) -> Self {
        self.base_of_code = base_of_code;
        self
    }

    pub fn with_image_base(mut self, image_base: u64) -> Self {
        self.image_base = image_base;
        self
    }

    /// `offset` is relative to the start of program data.
    pub fn with_guid_at(mut self, offset: usize, guid: Guid) -> Self {
        self.guids.push((offset, guid));
        self
    }

    /// `offset` is relative to the TE header.
    pub fn with_word_at(mut self, offset: usize, word: u32) -> Self {
        self.words.push((offset, word));
        self
    }

    pub fn program_offset(&self) -> usize {
        TE_HEADER_SIZE + SECTION_HEADER_SIZE * self.sections as usize + 4 * self.padding_words
    }

    pub fn build(self) -> ImageFixture {
        let mut bytes = vec![0u8; self.region_size];
        let program_offset = self.program_offset();
        let header = self.header_offset;
        let program = header + program_offset;

        // Filler ahead of the image must never look like the signature.
        for (i, byte) in bytes[..header].iter_mut().enumerate() {
            *byte = 0xF0 | (i % 16) as u8;
        }

        bytes[header..header + 4].copy_from_slice(&TE_IMAGE_MAGIC.to_le_bytes());
        bytes[header + 4] = self.sections;
        bytes[header + 5] = 0x0B;
        bytes[header + 12..header + 16].copy_from_slice(&self.base_of_code.to_le_bytes());
        bytes[header + 16..header + 24].copy_from_slice(&self.image_base.to_le_bytes());

        bytes[program..program + 4].copy_from_slice(&InstructionEncoder::encode_nop().to_le_bytes());

        for (offset, guid) in &self.guids {
            let at = program + offset;
            bytes[at..at + 16].copy_from_slice(&guid.to_bytes_le());
        }

        for (offset, word) in &self.words {
            let at = header + offset;
            bytes[at..at + 4].copy_from_slice(&word.to_le_bytes());
        }

        ImageFixture {
            name: self.region_name,
            base: self.region_base,
            bytes,
            header_offset: header,
            program_offset,
        }
    }
}

impl Default for ImageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ImageFixture {
    pub name: String,
    pub base: u64,
    pub bytes: Vec<u8>,
    /// Offset of the TE header inside the region.
    pub header_offset: usize,
    /// Offset of program data from the TE header.
    pub program_offset: usize,
}

impl ImageFixture {
    pub fn region(&self) -> MemoryRegion<'_> {
        MemoryRegion::new(&self.name, Address::new(self.base), &self.bytes)
    }

    pub fn header_address(&self) -> Address {
        Address::new(self.base) + self.header_offset as u64
    }

    pub fn descriptor(&self) -> RegionDescriptor {
        RegionDescriptor::new(&self.name, self.base, 0, self.bytes.len())
    }

    pub fn region_map(&self) -> StaticRegionMap {
        StaticRegionMap::from_bytes(self.bytes.clone(), vec![self.descriptor()])
            .expect("fixture region fits its own bytes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_layout() {
        let builder = ImageBuilder::new().with_sections(3).with_padding_words(2).with_guid_at(0x10, SCHEDULER_GUID);
        let expected = builder.program_offset();
        let fixture = builder.build();

        assert_eq!(fixture.program_offset, expected);
        assert_eq!(fixture.program_offset, 40 + 3 * 40 + 2 * 4);
        assert_eq!(fixture.name, "UEFI FD");

        let guid_at = fixture.header_offset + fixture.program_offset + 0x10;
        assert_eq!(&fixture.bytes[guid_at..guid_at + 16], &SCHEDULER_GUID.to_bytes_le());
    }
}
