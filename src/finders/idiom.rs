// Thu Oct 15 2026 - Alex

use serde::{Deserialize, Serialize};

/// Where the instructions of an address-formation idiom sit relative to the
/// `adrp` whose target is the GUID.
///
/// The matched pair is `adrp` at `o` and `add` at `o + add_offset`. The
/// look-back pair, which forms the address of the structure itself, is `adrp`
/// at `o + lookback_adrp_offset` and `add` at `o + lookback_add_offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdiomLayout {
    pub add_offset: isize,
    pub lookback_adrp_offset: isize,
    pub lookback_add_offset: isize,
}

impl IdiomLayout {
    /// ```text
    /// o-4  adrp xA, struct@PAGE
    /// o    adrp xB, guid@PAGE
    /// o+4  add  xA, xA, struct@PAGEOFF
    /// o+8  add  xB, xB, guid@PAGEOFF
    /// ```
    pub const SCHEDULER: Self = Self {
        add_offset: 8,
        lookback_adrp_offset: -4,
        lookback_add_offset: 4,
    };

    /// ```text
    /// o-12 adrp xA, struct@PAGE
    /// o-8  add  xA, xA, struct@PAGEOFF
    /// o-4  ...
    /// o    adrp xB, guid@PAGE
    /// o+4  add  xB, xB, guid@PAGEOFF
    /// ```
    pub const TABLE: Self = Self {
        add_offset: 4,
        lookback_adrp_offset: -12,
        lookback_add_offset: -8,
    };

    pub fn new(add_offset: isize, lookback_adrp_offset: isize, lookback_add_offset: isize) -> Self {
        Self {
            add_offset,
            lookback_adrp_offset,
            lookback_add_offset,
        }
    }

    /// `origin + delta`, or `None` if that lands before the image start.
    pub fn slot(origin: usize, delta: isize) -> Option<usize> {
        origin.checked_add_signed(delta)
    }

    pub fn is_word_aligned(&self) -> bool {
        [self.add_offset, self.lookback_adrp_offset, self.lookback_add_offset]
            .iter()
            .all(|offset| offset % 4 == 0)
    }
}
