// Tue Oct 13 2026 - Alex

use crate::pattern::PatternError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub const GUID_SIZE: usize = 16;

/// An EFI GUID. In memory Data1, Data2 and Data3 are little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Guid(Uuid);

impl Guid {
    pub const fn new(data1: u32, data2: u16, data3: u16, data4: [u8; 8]) -> Self {
        Self(Uuid::from_fields(data1, data2, data3, &data4))
    }

    pub fn from_bytes_le(bytes: [u8; GUID_SIZE]) -> Self {
        Self(Uuid::from_bytes_le(bytes))
    }

    pub fn to_bytes_le(&self) -> [u8; GUID_SIZE] {
        self.0.to_bytes_le()
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl FromStr for Guid {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s.trim())?))
    }
}

impl From<Uuid> for Guid {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}
