// Tue Oct 13 2026 - Alex

pub mod error;
pub mod guid;
pub mod scanner;

pub use error::PatternError;
pub use guid::{Guid, GUID_SIZE};
pub use scanner::SignatureScanner;
