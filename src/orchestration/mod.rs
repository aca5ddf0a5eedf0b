// Fri Oct 16 2026 - Alex

pub mod cache;
pub mod error;
pub mod finder;
pub mod global;
pub mod stats;

pub use cache::ProtocolCache;
pub use error::OrchestrationError;
pub use finder::{ProtocolFinder, ResolvedProtocols};
pub use stats::{ScanCounts, ScanStats};

use crate::pattern::Guid;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Protocol {
    Scheduler,
    DtOps,
}

impl Protocol {
    pub const ALL: [Protocol; 2] = [Protocol::Scheduler, Protocol::DtOps];

    pub fn flag(&self) -> Protocols {
        match self {
            Protocol::Scheduler => Protocols::SCHEDULER,
            Protocol::DtOps => Protocols::DT_OPS,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Scheduler => write!(f, "scheduler interface"),
            Protocol::DtOps => write!(f, "DT operations"),
        }
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Protocols: u8 {
        const SCHEDULER = 0b01;
        const DT_OPS = 0b10;
    }
}

impl Protocols {
    pub fn from_wants(want_scheduler: bool, want_dt_ops: bool) -> Self {
        let mut wanted = Protocols::empty();
        wanted.set(Protocols::SCHEDULER, want_scheduler);
        wanted.set(Protocols::DT_OPS, want_dt_ops);
        wanted
    }

    pub fn protocols(&self) -> impl Iterator<Item = Protocol> + '_ {
        Protocol::ALL.into_iter().filter(move |p| self.contains(p.flag()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolGuids {
    pub scheduler: Guid,
    pub dt_ops: Guid,
}

impl ProtocolGuids {
    pub fn get(&self, protocol: Protocol) -> &Guid {
        match protocol {
            Protocol::Scheduler => &self.scheduler,
            Protocol::DtOps => &self.dt_ops,
        }
    }
}
