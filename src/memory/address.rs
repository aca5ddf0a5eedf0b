// Tue Oct 13 2026 - Alex

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address {
    value: u64,
}

impl Address {
    pub const fn new(value: u64) -> Self {
        Self { value }
    }

    pub fn as_u64(&self) -> u64 {
        self.value
    }

    pub fn as_ptr(&self) -> *const u8 {
        self.value as *const u8
    }

    pub fn is_null(&self) -> bool {
        self.value == 0
    }

    pub fn offset_from(&self, base: Address) -> Option<u64> {
        self.value.checked_sub(base.value)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016x}", self.value)
    }
}

impl fmt::LowerHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.value, f)
    }
}

impl fmt::UpperHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.value, f)
    }
}

// Firmware addresses follow two's-complement wraparound, never panic.
impl Add<u64> for Address {
    type Output = Self;
    fn add(self, rhs: u64) -> Self::Output {
        Self { value: self.value.wrapping_add(rhs) }
    }
}

impl Sub<u64> for Address {
    type Output = Self;
    fn sub(self, rhs: u64) -> Self::Output {
        Self { value: self.value.wrapping_sub(rhs) }
    }
}

impl From<u64> for Address {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl From<Address> for u64 {
    fn from(addr: Address) -> Self {
        addr.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapping_add() {
        let addr = Address::new(u64::MAX) + 2;
        assert_eq!(addr.as_u64(), 1);
    }

    #[test]
    fn test_offset_from() {
        let base = Address::new(0x9000_0000);
        assert_eq!(Address::new(0x9000_0040).offset_from(base), Some(0x40));
        assert_eq!(Address::new(0x8fff_ffff).offset_from(base), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Address::new(0x9000_2034).to_string(), "0x0000000090002034");
        assert_eq!(format!("{:x}", Address::new(0xabc)), "abc");
    }
}
