// Fri Oct 16 2026 - Alex

use crate::finders::IdiomLayout;
use crate::image::locator::{DEFAULT_REGION_CANDIDATES, DEFAULT_SCAN_SKIP};
use crate::image::TE_IMAGE_MAGIC;
use crate::memory::RegionDescriptor;
use crate::orchestration::ProtocolGuids;
use crate::pattern::Guid;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub region_candidates: Vec<String>,
    pub scan_skip: usize,
    pub te_magic: u32,
    pub scheduler_guid: Option<Guid>,
    pub dt_ops_guid: Option<Guid>,
    pub scheduler_layout: IdiomLayout,
    pub dt_ops_layout: IdiomLayout,
    pub regions: Vec<RegionDescriptor>,
    pub output_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            region_candidates: DEFAULT_REGION_CANDIDATES.iter().map(|s| s.to_string()).collect(),
            scan_skip: DEFAULT_SCAN_SKIP,
            te_magic: TE_IMAGE_MAGIC,
            scheduler_guid: None,
            dt_ops_guid: None,
            scheduler_layout: IdiomLayout::SCHEDULER,
            dt_ops_layout: IdiomLayout::TABLE,
            regions: Vec::new(),
            output_file: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn with_guids(mut self, guids: ProtocolGuids) -> Self {
        self.scheduler_guid = Some(guids.scheduler);
        self.dt_ops_guid = Some(guids.dt_ops);
        self
    }

    pub fn with_region_candidates(mut self, candidates: Vec<String>) -> Self {
        self.region_candidates = candidates;
        self
    }

    pub fn with_region(mut self, region: RegionDescriptor) -> Self {
        self.regions.push(region);
        self
    }

    pub fn protocol_guids(&self) -> Result<ProtocolGuids, ConfigError> {
        match (self.scheduler_guid, self.dt_ops_guid) {
            (Some(scheduler), Some(dt_ops)) => Ok(ProtocolGuids { scheduler, dt_ops }),
            (None, _) => Err(ConfigError::Invalid("scheduler_guid must be set".to_string())),
            (_, None) => Err(ConfigError::Invalid("dt_ops_guid must be set".to_string())),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.region_candidates.is_empty() {
            return Err(ConfigError::Invalid("region_candidates must not be empty".to_string()));
        }
        if self.te_magic == 0 {
            return Err(ConfigError::Invalid("te_magic must be non-zero".to_string()));
        }
        let guids = self.protocol_guids()?;
        if guids.scheduler == guids.dt_ops {
            return Err(ConfigError::Invalid("scheduler_guid and dt_ops_guid must differ".to_string()));
        }
        for (name, layout) in [("scheduler_layout", &self.scheduler_layout), ("dt_ops_layout", &self.dt_ops_layout)] {
            if !layout.is_word_aligned() {
                return Err(ConfigError::Invalid(format!("{} offsets must be multiples of 4", name)));
            }
        }
        Ok(())
    }
}
