// Sat Oct 17 2026 - Alex

//! Process-wide finder for callers that cannot carry a handle around.

use crate::orchestration::{OrchestrationError, ProtocolFinder, ResolvedProtocols};
use log::info;
use once_cell::sync::OnceCell;

static FINDER: OnceCell<ProtocolFinder> = OnceCell::new();

pub fn install(finder: ProtocolFinder) -> Result<&'static ProtocolFinder, OrchestrationError> {
    FINDER.set(finder).map_err(|_| OrchestrationError::AlreadyInstalled)?;
    info!("Protocol finder installed");
    installed().ok_or(OrchestrationError::NotInstalled)
}

pub fn installed() -> Option<&'static ProtocolFinder> {
    FINDER.get()
}

pub fn resolve(want_scheduler: bool, want_dt_ops: bool) -> Result<ResolvedProtocols, OrchestrationError> {
    let finder = installed().ok_or(OrchestrationError::NotInstalled)?;
    Ok(finder.resolve(want_scheduler, want_dt_ops))
}
