// Fri Oct 16 2026 - Alex

use crate::memory::Address;
use crate::orchestration::Protocol;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Outcome of each protocol scan. An entry is written once and never changes;
/// `None` records a scan that found nothing.
pub struct ProtocolCache {
    entries: RwLock<HashMap<Protocol, Option<Address>>>,
}

impl ProtocolCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn get(&self, protocol: Protocol) -> Option<Option<Address>> {
        self.entries.read().get(&protocol).copied()
    }

    pub fn contains(&self, protocol: Protocol) -> bool {
        self.entries.read().contains_key(&protocol)
    }

    /// Records a scan outcome. Returns `false` and keeps the existing entry if
    /// the protocol was already recorded.
    pub fn insert(&self, protocol: Protocol, address: Option<Address>) -> bool {
        let mut entries = self.entries.write();
        if entries.contains_key(&protocol) {
            return false;
        }
        entries.insert(protocol, address);
        true
    }

    pub fn size(&self) -> usize {
        self.entries.read().len()
    }
}

impl Default for ProtocolCache {
    fn default() -> Self {
        Self::new()
    }
}
