//! Tunable constants and the dial range declared by the requirements form.

use std::ops::RangeInclusive;

/// Directory under the platform config dir holding a user catalog
pub const CATALOG_DIR: &str = "qa-tool-advisor";

/// Catalog file name inside [`CATALOG_DIR`]
pub const CATALOG_FILE: &str = "catalog.json";

/// Weight for schema slots no dial governs
pub const DEFAULT_WEIGHT: f64 = 5.0;

/// Accepted dial values at the input boundary
pub const DIAL_RANGE: RangeInclusive<f64> = 1.0..=10.0;

/// Rows shown when a request does not ask for a specific count
pub const DEFAULT_TOP_K: usize = 5;

/// Response format version
pub const OUTPUT_VERSION: &str = "1.0";

/// Score bands used to colour table output
pub struct ScoreBands {
    /// Score >= this is a strong match
    pub strong: f64,
    /// Score >= this (but < strong) is a partial match
    pub partial: f64,
}

impl Default for ScoreBands {
    fn default() -> Self {
        Self {
            strong: 75.0,
            partial: 50.0,
        }
    }
}
