// Tue Oct 13 2026 - Alex

pub struct InstructionEncoder;

impl InstructionEncoder {
    /// `offset` is the byte distance between the page of the instruction and the
    /// target page; its low 12 bits are ignored.
    pub fn encode_adrp(rd: u8, offset: i64) -> u32 {
        let rd = (rd & 0x1F) as u32;
        let immlo = ((offset >> 12) as u32) & 0x3;
        let immhi = ((offset >> 14) as u32) & 0x7FFFF;
        (immlo << 29) | 0x90000000 | (immhi << 5) | rd
    }

    pub fn encode_add_imm(rd: u8, rn: u8, imm12: u16, is_64bit: bool) -> u32 {
        let sf = if is_64bit { 1u32 } else { 0u32 };
        let rd = (rd & 0x1F) as u32;
        let rn = (rn & 0x1F) as u32;
        let imm = (imm12 & 0xFFF) as u32;
        (sf << 31) | 0x11000000 | (imm << 10) | (rn << 5) | rd
    }

    pub fn encode_nop() -> u32 {
        0xD503201F
    }

    pub fn encode_adrp_to(rd: u8, pc: u64, target: u64) -> u32 {
        let delta = (target & !0xFFF).wrapping_sub(pc & !0xFFF) as i64;
        Self::encode_adrp(rd, delta)
    }
}
