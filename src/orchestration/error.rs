// Fri Oct 16 2026 - Alex

use crate::orchestration::Protocol;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrchestrationError {
    #[error("Failed to resolve the {0}")]
    ProtocolUnresolved(Protocol),
    #[error("A protocol finder is already installed")]
    AlreadyInstalled,
    #[error("No protocol finder installed")]
    NotInstalled,
}
