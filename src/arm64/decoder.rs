// Tue Oct 13 2026 - Alex

use std::fmt;

pub const ADRP_OP2: u32 = 0b10000;
pub const ADD_IMM_OP2: u32 = 0b100010;
pub const MAX_DEST_REGISTER: u8 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdrpForm {
    pub rd: u8,
    pub immhi: u32,
    pub immlo: u8,
}

impl AdrpForm {
    /// The 21-bit page immediate, sign-extended and scaled to bytes.
    pub fn immediate(&self) -> i64 {
        let imm21 = (self.immhi << 2) | self.immlo as u32;
        let signed = ((imm21 << 11) as i32) >> 11;
        (signed as i64) << 12
    }

    pub fn value_at(&self, pc: u64) -> u64 {
        (pc & !0xFFF).wrapping_add_signed(self.immediate())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddImmForm {
    pub rd: u8,
    pub rn: u8,
    pub imm12: u16,
    pub shift: bool,
    pub is_64bit: bool,
}

impl AddImmForm {
    pub fn immediate(&self) -> u64 {
        if self.shift {
            (self.imm12 as u64) << 12
        } else {
            self.imm12 as u64
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstructionForm {
    Unrecognized,
    AddressPage(AdrpForm),
    AddImmediate(AddImmForm),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstructionWord {
    pub raw: u32,
    pub form: InstructionForm,
}

impl InstructionWord {
    pub fn adrp(&self) -> Option<&AdrpForm> {
        match &self.form {
            InstructionForm::AddressPage(adrp) => Some(adrp),
            _ => None,
        }
    }

    pub fn add_imm(&self) -> Option<&AddImmForm> {
        match &self.form {
            InstructionForm::AddImmediate(add) => Some(add),
            _ => None,
        }
    }

    pub fn is_recognized(&self) -> bool {
        self.form != InstructionForm::Unrecognized
    }
}

impl fmt::Display for InstructionWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.form {
            InstructionForm::AddressPage(adrp) => {
                write!(f, "adrp x{}, #{:#x}", adrp.rd, adrp.immediate())
            }
            InstructionForm::AddImmediate(add) => {
                let width = if add.is_64bit { 'x' } else { 'w' };
                write!(f, "add {}{}, {}{}, #{:#x}", width, add.rd, width, add.rn, add.immediate())
            }
            InstructionForm::Unrecognized => write!(f, ".word {:#010x}", self.raw),
        }
    }
}

pub struct InstructionDecoder;

impl InstructionDecoder {
    pub fn decode(insn: u32) -> InstructionWord {
        let form = if let Some(adrp) = Self::decode_adrp(insn) {
            InstructionForm::AddressPage(adrp)
        } else if let Some(add) = Self::decode_add_imm(insn) {
            InstructionForm::AddImmediate(add)
        } else {
            InstructionForm::Unrecognized
        };

        InstructionWord { raw: insn, form }
    }

    pub fn decode_adrp(insn: u32) -> Option<AdrpForm> {
        let op = (insn >> 31) & 1;
        let op2 = (insn >> 24) & 0x1F;
        let rd = (insn & 0x1F) as u8;

        if op != 1 || op2 != ADRP_OP2 || rd > MAX_DEST_REGISTER {
            return None;
        }

        Some(AdrpForm {
            rd,
            immhi: (insn >> 5) & 0x7FFFF,
            immlo: ((insn >> 29) & 0x3) as u8,
        })
    }

    pub fn decode_add_imm(insn: u32) -> Option<AddImmForm> {
        let sf = (insn >> 31) & 1;
        let op = (insn >> 30) & 1;
        let s = (insn >> 29) & 1;
        let op2 = (insn >> 23) & 0x3F;

        if op != 0 || s != 0 || op2 != ADD_IMM_OP2 {
            return None;
        }

        Some(AddImmForm {
            rd: (insn & 0x1F) as u8,
            rn: ((insn >> 5) & 0x1F) as u8,
            imm12: ((insn >> 10) & 0xFFF) as u16,
            shift: (insn >> 22) & 1 == 1,
            is_64bit: sf == 1,
        })
    }
}
