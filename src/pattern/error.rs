// Tue Oct 13 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("Invalid GUID: {0}")]
    InvalidGuid(#[from] uuid::Error),
}
