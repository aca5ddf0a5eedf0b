// Thu Oct 15 2026 - Alex

use crate::arm64::{AddImmForm, AdrpForm, INSTRUCTION_SIZE};
use crate::finders::{FinderError, IdiomLayout, IdiomMatch};
use crate::image::TeImage;
use log::{debug, trace, warn};

pub struct AddressResolver<'i, 'a> {
    image: &'i TeImage<'a>,
}

impl<'i, 'a> AddressResolver<'i, 'a> {
    pub fn new(image: &'i TeImage<'a>) -> Self {
        Self { image }
    }

    pub fn resolve_scheduler_form(&self, signature_offset: usize) -> Result<IdiomMatch, FinderError> {
        self.resolve(&IdiomLayout::SCHEDULER, signature_offset)
    }

    pub fn resolve_table_form(&self, signature_offset: usize) -> Result<IdiomMatch, FinderError> {
        self.resolve(&IdiomLayout::TABLE, signature_offset)
    }

    pub fn resolve(&self, layout: &IdiomLayout, signature_offset: usize) -> Result<IdiomMatch, FinderError> {
        let end = self.image.code_size().saturating_sub(8);
        let target = signature_offset as u64;

        for offset in (0..end).step_by(INSTRUCTION_SIZE) {
            let Some(adrp) = self.adrp_at(offset) else {
                continue;
            };
            let Some(add) = IdiomLayout::slot(offset, layout.add_offset).and_then(|o| self.add_imm_at(o)) else {
                continue;
            };

            if adrp.value_at(offset as u64).wrapping_add(add.imm12 as u64) != target {
                continue;
            }

            trace!("GUID reference at 0x{:x}", offset);

            match self.look_back(layout, offset) {
                Some(relative_value) => {
                    let address = self.image.link_address(relative_value);
                    debug!(
                        "Idiom at 0x{:x} forms 0x{:x} -> {}",
                        offset, relative_value, address
                    );
                    return Ok(IdiomMatch {
                        instruction_offset: offset,
                        signature_offset,
                        relative_value,
                        address,
                    });
                }
                None => debug!("GUID reference at 0x{:x} has no look-back pair", offset),
            }
        }

        warn!("No idiom targets signature offset 0x{:x}", signature_offset);
        Err(FinderError::IdiomNotMatched { signature_offset })
    }

    fn look_back(&self, layout: &IdiomLayout, offset: usize) -> Option<u64> {
        let adrp_offset = IdiomLayout::slot(offset, layout.lookback_adrp_offset)?;
        let adrp = self.adrp_at(adrp_offset)?;
        let add = self.add_imm_at(IdiomLayout::slot(offset, layout.lookback_add_offset)?)?;

        Some(adrp.value_at(adrp_offset as u64).wrapping_add(add.imm12 as u64))
    }

    fn adrp_at(&self, offset: usize) -> Option<AdrpForm> {
        self.image.instruction_at(offset)?.adrp().copied()
    }

    fn add_imm_at(&self, offset: usize) -> Option<AddImmForm> {
        self.image.instruction_at(offset)?.add_imm().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arm64::{InstructionDecoder, InstructionEncoder};
    use crate::utils::testing::{ImageBuilder, ImageFixture};

    fn image(fixture: &ImageFixture) -> TeImage<'_> {
        TeImage::parse(fixture.region().tail(fixture.header_offset).unwrap()).unwrap()
    }

    fn adrp(rd: u8, pc: usize, target: u64) -> u32 {
        InstructionEncoder::encode_adrp_to(rd, pc as u64, target)
    }

    fn add(rd: u8, target: u64) -> u32 {
        InstructionEncoder::encode_add_imm(rd, rd, (target & 0xFFF) as u16, true)
    }

    #[test]
    fn test_scheduler_form() {
        let fixture = ImageBuilder::new()
            .with_word_at(0x7FC, adrp(1, 0x7FC, 0x1000))
            .with_word_at(0x800, adrp(0, 0x800, 0x200))
            .with_word_at(0x804, add(1, 0x34))
            .with_word_at(0x808, add(0, 0x200))
            .build();
        let image = image(&fixture);

        let found = AddressResolver::new(&image).resolve_scheduler_form(0x200).unwrap();
        assert_eq!(found.instruction_offset, 0x800);
        assert_eq!(found.signature_offset, 0x200);
        assert_eq!(found.relative_value, 0x1034);
        assert_eq!(found.address.as_u64(), 0x1034 + 0x1000 + 0x9000_0000);
    }

    #[test]
    fn test_look_back_page_uses_its_own_pc() {
        // look-back adrp on page 0x0000, matched adrp on page 0x1000
        let fixture = ImageBuilder::new()
            .with_word_at(0xFFC, adrp(1, 0xFFC, 0x3000))
            .with_word_at(0x1000, adrp(0, 0x1000, 0x200))
            .with_word_at(0x1004, add(1, 0x34))
            .with_word_at(0x1008, add(0, 0x200))
            .build();
        let image = image(&fixture);

        let found = AddressResolver::new(&image).resolve_scheduler_form(0x200).unwrap();
        assert_eq!(found.instruction_offset, 0x1000);
        assert_eq!(found.relative_value, 0x3034);
    }

    #[test]
    fn test_backward_page_references() {
        let fixture = ImageBuilder::new()
            .with_word_at(0x27FC, adrp(1, 0x27FC, 0x1000))
            .with_word_at(0x2800, adrp(0, 0x2800, 0x200))
            .with_word_at(0x2804, add(1, 0x34))
            .with_word_at(0x2808, add(0, 0x200))
            .build();
        let image = image(&fixture);

        let look_back = InstructionDecoder::decode_adrp(image.word_at(0x27FC).unwrap()).unwrap();
        assert!(look_back.immediate() < 0);

        let found = AddressResolver::new(&image).resolve_scheduler_form(0x200).unwrap();
        assert_eq!(found.instruction_offset, 0x2800);
        assert_eq!(found.relative_value, 0x1034);
        assert_eq!(found.address.as_u64(), 0x1034 + 0x1000 + 0x9000_0000);
    }

    #[test]
    fn test_table_form() {
        let fixture = ImageBuilder::new()
            .with_word_at(0x1F4, adrp(8, 0x1F4, 0x3000))
            .with_word_at(0x1F8, add(8, 0x3120))
            .with_word_at(0x1FC, InstructionEncoder::encode_nop())
            .with_word_at(0x200, adrp(0, 0x200, 0x4000))
            .with_word_at(0x204, add(0, 0x4010))
            .build();
        let image = image(&fixture);

        let found = AddressResolver::new(&image).resolve_table_form(0x4010).unwrap();
        assert_eq!(found.instruction_offset, 0x200);
        assert_eq!(found.relative_value, 0x3120);
        assert_eq!(found.address.as_u64(), 0x3120 + 0x1000 + 0x9000_0000);
    }

    #[test]
    fn test_layouts_are_not_interchangeable() {
        let fixture = ImageBuilder::new()
            .with_word_at(0x7FC, adrp(1, 0x7FC, 0x1000))
            .with_word_at(0x800, adrp(0, 0x800, 0x200))
            .with_word_at(0x804, add(1, 0x34))
            .with_word_at(0x808, add(0, 0x200))
            .build();
        let image = image(&fixture);

        assert!(matches!(
            AddressResolver::new(&image).resolve_table_form(0x200),
            Err(FinderError::IdiomNotMatched { signature_offset: 0x200 })
        ));
    }

    #[test]
    fn test_failed_look_back_keeps_scanning() {
        let fixture = ImageBuilder::new()
            // first reference: nothing usable before it
            .with_word_at(0x400, adrp(0, 0x400, 0x200))
            .with_word_at(0x404, add(1, 0x10))
            .with_word_at(0x408, add(0, 0x200))
            // second reference: full idiom
            .with_word_at(0x9FC, adrp(3, 0x9FC, 0x2000))
            .with_word_at(0xA00, adrp(0, 0xA00, 0x200))
            .with_word_at(0xA04, add(3, 0x2468))
            .with_word_at(0xA08, add(0, 0x200))
            .build();
        let image = image(&fixture);

        let found = AddressResolver::new(&image).resolve_scheduler_form(0x200).unwrap();
        assert_eq!(found.instruction_offset, 0xA00);
        assert_eq!(found.relative_value, 0x2468);
    }

    #[test]
    fn test_wrong_target_is_skipped() {
        let fixture = ImageBuilder::new()
            .with_word_at(0x7FC, adrp(1, 0x7FC, 0x1000))
            .with_word_at(0x800, adrp(0, 0x800, 0x200))
            .with_word_at(0x804, add(1, 0x34))
            .with_word_at(0x808, add(0, 0x208))
            .build();
        let image = image(&fixture);

        assert!(AddressResolver::new(&image).resolve_scheduler_form(0x200).is_err());
        assert!(AddressResolver::new(&image).resolve_scheduler_form(0x208).is_ok());
    }

    #[test]
    fn test_look_back_before_image_start() {
        // adrp at 0 of the header-relative stream: o-12 does not exist
        let fixture = ImageBuilder::new().build();
        let mut bytes = fixture.bytes.clone();
        let header = fixture.header_offset;
        bytes[header + 4..header + 8].copy_from_slice(&adrp(0, 4, 0x200).to_le_bytes());
        bytes[header + 8..header + 12].copy_from_slice(&add(0, 0x200).to_le_bytes());
        let region = crate::memory::MemoryRegion::new("UEFI FD", fixture.header_address(), &bytes[header..]);
        let image = TeImage::parse(region).unwrap();

        assert!(AddressResolver::new(&image).resolve_table_form(0x200).is_err());
    }

    #[test]
    fn test_tiny_image() {
        let fixture = ImageBuilder::new().with_region_size(0x1000 + 0x80).with_sections(0).build();
        let image = image(&fixture);
        assert!(AddressResolver::new(&image).resolve_scheduler_form(0).is_err());
    }

    #[test]
    fn test_custom_layout() {
        let layout = IdiomLayout::new(12, -8, -4);
        let fixture = ImageBuilder::new()
            .with_word_at(0x5F8, adrp(2, 0x5F8, 0x6000))
            .with_word_at(0x5FC, add(2, 0x6abc))
            .with_word_at(0x600, adrp(0, 0x600, 0x300))
            .with_word_at(0x60C, add(0, 0x300))
            .build();
        let image = image(&fixture);

        let found = AddressResolver::new(&image).resolve(&layout, 0x300).unwrap();
        assert_eq!(found.relative_value, 0x6abc);
    }
}
