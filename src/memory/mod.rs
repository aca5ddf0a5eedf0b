// Tue Oct 13 2026 - Alex

pub mod address;
pub mod error;
pub mod mapping;
pub mod region;
pub mod traits;

pub use address::Address;
pub use error::MemoryError;
pub use mapping::{RegionDescriptor, StaticRegionMap};
pub use region::MemoryRegion;
pub use traits::RegionLookup;
