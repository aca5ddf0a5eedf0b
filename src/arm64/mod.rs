// Tue Oct 13 2026 - Alex

//! Just enough AArch64 to follow `adrp` + `add` address formation.

pub mod decoder;
pub mod encoding;

pub use decoder::{AddImmForm, AdrpForm, InstructionDecoder, InstructionForm, InstructionWord};
pub use encoding::InstructionEncoder;

pub const INSTRUCTION_SIZE: usize = 4;
