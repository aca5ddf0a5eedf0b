// Wed Oct 14 2026 - Alex

use crate::image::{ImageError, TeImage, TE_IMAGE_MAGIC};
use crate::memory::{MemoryError, MemoryRegion, RegionLookup};
use crate::pattern::SignatureScanner;
use log::{debug, warn};

pub const DEFAULT_REGION_CANDIDATES: [&str; 2] = ["FD Reserved I", "UEFI FD"];
/// The first page of the FD never holds the core image.
pub const DEFAULT_SCAN_SKIP: usize = 0x1000;

pub struct ImageLocator<'l> {
    lookup: &'l dyn RegionLookup,
    candidates: Vec<String>,
    scan_skip: usize,
    magic: u32,
}

impl<'l> ImageLocator<'l> {
    pub fn new(lookup: &'l dyn RegionLookup) -> Self {
        Self {
            lookup,
            candidates: DEFAULT_REGION_CANDIDATES.iter().map(|s| s.to_string()).collect(),
            scan_skip: DEFAULT_SCAN_SKIP,
            magic: TE_IMAGE_MAGIC,
        }
    }

    pub fn with_candidates(mut self, candidates: Vec<String>) -> Self {
        self.candidates = candidates;
        self
    }

    pub fn with_scan_skip(mut self, skip: usize) -> Self {
        self.scan_skip = skip;
        self
    }

    pub fn with_magic(mut self, magic: u32) -> Self {
        self.magic = magic;
        self
    }

    pub fn locate(&self) -> Result<TeImage<'l>, ImageError> {
        let region = self.find_region()?;

        let start = self.scan_skip.min(region.size());
        let window = &region.data()[start..];

        let hit = SignatureScanner::find_aligned_word(window, self.magic).ok_or_else(|| {
            warn!("TE image not found in \"{}\"", region.name());
            ImageError::SignatureNotFound {
                region: region.name().to_string(),
                magic: self.magic,
            }
        })?;

        let image = TeImage::parse(region.tail(start + hit)?)?;

        debug!(
            "TE image at {} in \"{}\": {} sections, program at {}, base_of_code 0x{:x}, image_base 0x{:x}",
            image.base_address(),
            region.name(),
            image.header().number_of_sections,
            image.program_start(),
            image.base_of_code(),
            image.image_base()
        );

        Ok(image)
    }

    /// First candidate the platform map knows about; later names are fallbacks.
    pub fn find_region(&self) -> Result<MemoryRegion<'l>, MemoryError> {
        let lookup: &'l dyn RegionLookup = self.lookup;

        for (index, name) in self.candidates.iter().enumerate() {
            match lookup.lookup(name) {
                Some(region) => {
                    if index > 0 {
                        warn!("Falling back to \"{}\"", name);
                    }
                    debug!("Using region {}", region);
                    return Ok(region);
                }
                None => warn!("Failed to locate \"{}\"", name),
            }
        }

        Err(MemoryError::RegionNotFound(self.candidates.join(", ")))
    }
}
