// Sat Oct 17 2026 - Alex

use crate::config::{Config, ConfigError};
use crate::finders::{self, AddressResolver, FinderError, IdiomLayout, IdiomMatch};
use crate::image::{ImageLocator, TeImage, TE_IMAGE_MAGIC};
use crate::image::locator::{DEFAULT_REGION_CANDIDATES, DEFAULT_SCAN_SKIP};
use crate::memory::{Address, RegionLookup};
use crate::orchestration::{OrchestrationError, Protocol, ProtocolCache, ProtocolGuids, Protocols, ScanCounts, ScanStats};
use crate::utils::logging::scoped_timer;
use log::{debug, error, info, warn};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Addresses handed back to callers. `None` means the protocol was not
/// requested or could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResolvedProtocols {
    pub scheduler: Option<Address>,
    pub dt_ops: Option<Address>,
}

impl ResolvedProtocols {
    pub fn get(&self, protocol: Protocol) -> Option<Address> {
        match protocol {
            Protocol::Scheduler => self.scheduler,
            Protocol::DtOps => self.dt_ops,
        }
    }

    fn set(&mut self, protocol: Protocol, address: Option<Address>) {
        match protocol {
            Protocol::Scheduler => self.scheduler = address,
            Protocol::DtOps => self.dt_ops = address,
        }
    }
}

pub struct ProtocolFinder {
    lookup: Arc<dyn RegionLookup>,
    guids: ProtocolGuids,
    region_candidates: Vec<String>,
    scan_skip: usize,
    te_magic: u32,
    scheduler_layout: IdiomLayout,
    dt_ops_layout: IdiomLayout,
    cache: ProtocolCache,
    stats: ScanStats,
    scan_lock: Mutex<()>,
}

impl ProtocolFinder {
    pub fn new(lookup: Arc<dyn RegionLookup>, guids: ProtocolGuids) -> Self {
        Self {
            lookup,
            guids,
            region_candidates: DEFAULT_REGION_CANDIDATES.iter().map(|s| s.to_string()).collect(),
            scan_skip: DEFAULT_SCAN_SKIP,
            te_magic: TE_IMAGE_MAGIC,
            scheduler_layout: IdiomLayout::SCHEDULER,
            dt_ops_layout: IdiomLayout::TABLE,
            cache: ProtocolCache::new(),
            stats: ScanStats::new(),
            scan_lock: Mutex::new(()),
        }
    }

    pub fn from_config(lookup: Arc<dyn RegionLookup>, config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let guids = config.protocol_guids()?;

        Ok(Self::new(lookup, guids)
            .with_region_candidates(config.region_candidates.clone())
            .with_scan_skip(config.scan_skip)
            .with_magic(config.te_magic)
            .with_layout(Protocol::Scheduler, config.scheduler_layout)
            .with_layout(Protocol::DtOps, config.dt_ops_layout))
    }

    pub fn with_region_candidates(mut self, candidates: Vec<String>) -> Self {
        self.region_candidates = candidates;
        self
    }

    pub fn with_scan_skip(mut self, skip: usize) -> Self {
        self.scan_skip = skip;
        self
    }

    pub fn with_magic(mut self, magic: u32) -> Self {
        self.te_magic = magic;
        self
    }

    pub fn with_layout(mut self, protocol: Protocol, layout: IdiomLayout) -> Self {
        match protocol {
            Protocol::Scheduler => self.scheduler_layout = layout,
            Protocol::DtOps => self.dt_ops_layout = layout,
        }
        self
    }

    pub fn guids(&self) -> &ProtocolGuids {
        &self.guids
    }

    pub fn layout(&self, protocol: Protocol) -> &IdiomLayout {
        match protocol {
            Protocol::Scheduler => &self.scheduler_layout,
            Protocol::DtOps => &self.dt_ops_layout,
        }
    }

    pub fn resolve(&self, want_scheduler: bool, want_dt_ops: bool) -> ResolvedProtocols {
        self.resolve_protocols(Protocols::from_wants(want_scheduler, want_dt_ops))
    }

    pub fn resolve_protocols(&self, wanted: Protocols) -> ResolvedProtocols {
        if !self.missing(wanted).is_empty() {
            let _guard = self.scan_lock.lock();
            // Another caller may have finished the scan while we waited.
            let missing = self.missing(wanted);
            if !missing.is_empty() {
                self.scan(&missing);
            }
        }

        self.collect(wanted)
    }

    pub fn resolve_strict(&self, wanted: Protocols) -> Result<ResolvedProtocols, OrchestrationError> {
        let resolved = self.resolve_protocols(wanted);
        match wanted.protocols().find(|p| resolved.get(*p).is_none()) {
            Some(protocol) => Err(OrchestrationError::ProtocolUnresolved(protocol)),
            None => Ok(resolved),
        }
    }

    /// `None` until the protocol has been scanned; `Some(None)` after a scan
    /// that found nothing.
    pub fn cached(&self, protocol: Protocol) -> Option<Option<Address>> {
        self.cache.get(protocol)
    }

    pub fn stats(&self) -> ScanCounts {
        self.stats.snapshot()
    }

    fn missing(&self, wanted: Protocols) -> Vec<Protocol> {
        wanted.protocols().filter(|p| !self.cache.contains(*p)).collect()
    }

    fn collect(&self, wanted: Protocols) -> ResolvedProtocols {
        let mut resolved = ResolvedProtocols::default();
        for protocol in wanted.protocols() {
            resolved.set(protocol, self.cache.get(protocol).flatten());
        }
        resolved
    }

    fn scan(&self, missing: &[Protocol]) {
        let _timer = scoped_timer("protocol scan");

        self.stats.record_image_locate();
        let locator = ImageLocator::new(self.lookup.as_ref())
            .with_candidates(self.region_candidates.clone())
            .with_scan_skip(self.scan_skip)
            .with_magic(self.te_magic);

        // Nothing is cached here so a later request can retry.
        let image = match locator.locate() {
            Ok(image) => image,
            Err(e) => {
                error!("Failed to find TE image: {}", e);
                return;
            }
        };

        for &protocol in missing {
            let address = match self.scan_protocol(&image, protocol) {
                Ok(found) if !found.address.is_null() => {
                    info!("Found {} at {}", protocol, found.address);
                    Some(found.address)
                }
                Ok(found) => {
                    warn!("{} resolved to a null address at offset 0x{:x}", protocol, found.instruction_offset);
                    None
                }
                Err(e) => {
                    warn!("Failed to resolve {}: {}", protocol, e);
                    None
                }
            };

            if !self.cache.insert(protocol, address) {
                debug!("{} already cached", protocol);
            }
        }
    }

    fn scan_protocol(&self, image: &TeImage<'_>, protocol: Protocol) -> Result<IdiomMatch, FinderError> {
        self.stats.record_identifier_scan();
        let signature_offset = finders::find_guid_offset(image, self.guids.get(protocol))?;

        self.stats.record_idiom_scan();
        AddressResolver::new(image).resolve(self.layout(protocol), signature_offset)
    }
}
