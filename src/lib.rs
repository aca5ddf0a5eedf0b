// Tue Jan 15 2026 - Alex

pub mod arm64;
pub mod config;
pub mod finders;
pub mod image;
pub mod memory;
pub mod orchestration;
pub mod pattern;
pub mod utils;

pub use config::Config;
pub use image::{ImageLocator, TeImage};
pub use memory::{Address, MemoryRegion, RegionLookup, StaticRegionMap};
pub use orchestration::{Protocol, ProtocolFinder, ProtocolGuids, Protocols, ResolvedProtocols};
pub use pattern::Guid;
