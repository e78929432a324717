//! Search Filter

use serde::{Deserialize, Serialize};

use crate::laptop::{Laptop, Memory};

/// Thresholds a laptop must meet to be reported by a search.
///
/// A zero threshold is inactive and always passes. Active criteria are ANDed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    /// Upper bound on price, inclusive. Zero means no limit.
    pub max_price_usd: f64,
    pub min_cpu_cores: u32,
    /// Lower bound on the CPU base clock
    pub min_cpu_ghz: f64,
    pub min_ram: Memory,
}

impl Filter {
    /// Check whether a laptop satisfies every active criterion
    pub fn matches(&self, laptop: &Laptop) -> bool {
        if self.max_price_usd > 0.0 && laptop.price_usd > self.max_price_usd {
            return false;
        }

        if laptop.cpu.number_cores < self.min_cpu_cores {
            return false;
        }

        if laptop.cpu.min_ghz < self.min_cpu_ghz {
            return false;
        }

        laptop.ram.to_bits() >= self.min_ram.to_bits()
    }
}
