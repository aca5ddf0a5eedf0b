// Fri Oct 16 2026 - Alex

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};

pub struct ScanStats {
    image_locates: AtomicUsize,
    identifier_scans: AtomicUsize,
    idiom_scans: AtomicUsize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScanCounts {
    pub image_locates: usize,
    pub identifier_scans: usize,
    pub idiom_scans: usize,
}

impl ScanStats {
    pub fn new() -> Self {
        Self {
            image_locates: AtomicUsize::new(0),
            identifier_scans: AtomicUsize::new(0),
            idiom_scans: AtomicUsize::new(0),
        }
    }

    pub fn record_image_locate(&self) {
        self.image_locates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_identifier_scan(&self) {
        self.identifier_scans.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_idiom_scan(&self) {
        self.idiom_scans.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> ScanCounts {
        ScanCounts {
            image_locates: self.image_locates.load(Ordering::Relaxed),
            identifier_scans: self.identifier_scans.load(Ordering::Relaxed),
            idiom_scans: self.idiom_scans.load(Ordering::Relaxed),
        }
    }
}

impl Default for ScanStats {
    fn default() -> Self {
        Self::new()
    }
}
