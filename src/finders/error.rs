// Thu Oct 15 2026 - Alex

use crate::image::ImageError;
use crate::pattern::Guid;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinderError {
    #[error("GUID {0} not found in image")]
    IdentifierNotFound(Guid),
    #[error("No address idiom targets signature offset 0x{signature_offset:x}")]
    IdiomNotMatched { signature_offset: usize },
    #[error(transparent)]
    Image(#[from] ImageError),
}
