// Thu Oct 15 2026 - Alex

pub mod error;
pub mod idiom;
pub mod resolver;
pub mod result;

pub use error::FinderError;
pub use idiom::IdiomLayout;
pub use resolver::AddressResolver;
pub use result::IdiomMatch;

use crate::image::TeImage;
use crate::pattern::{Guid, SignatureScanner};
use log::{debug, warn};

/// Offset of `guid` from the start of the image's program data.
pub fn find_guid_offset(image: &TeImage<'_>, guid: &Guid) -> Result<usize, FinderError> {
    match SignatureScanner::find_guid(image.program_bytes(), guid) {
        Some(offset) => {
            debug!("GUID {} at program offset 0x{:x}", guid, offset);
            Ok(offset)
        }
        None => {
            warn!("GUID {} not found in image", guid);
            Err(FinderError::IdentifierNotFound(*guid))
        }
    }
}

pub fn find_protocol(image: &TeImage<'_>, guid: &Guid, layout: &IdiomLayout) -> Result<IdiomMatch, FinderError> {
    let signature_offset = find_guid_offset(image, guid)?;
    AddressResolver::new(image).resolve(layout, signature_offset)
}
