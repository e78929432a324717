//! Laptop Record Types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Memory size unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemoryUnit {
    #[default]
    Unknown,
    Bit,
    Byte,
    Kilobyte,
    Megabyte,
    Gigabyte,
    Terabyte,
}

impl MemoryUnit {
    /// Number of bits in one unit. `Unknown` counts as zero.
    pub fn bits(self) -> u128 {
        match self {
            MemoryUnit::Unknown => 0,
            MemoryUnit::Bit => 1,
            MemoryUnit::Byte => 8,
            MemoryUnit::Kilobyte => 8 << 10,
            MemoryUnit::Megabyte => 8 << 20,
            MemoryUnit::Gigabyte => 8 << 30,
            MemoryUnit::Terabyte => 8 << 40,
        }
    }
}

/// A memory quantity such as RAM, VRAM or disk capacity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memory {
    pub value: u64,
    pub unit: MemoryUnit,
}

impl Memory {
    pub fn new(value: u64, unit: MemoryUnit) -> Self {
        Self { value, unit }
    }

    /// Size in bits. Widened to 128 bits so terabyte values cannot overflow.
    pub fn to_bits(&self) -> u128 {
        u128::from(self.value) * self.unit.bits()
    }
}

/// Processor descriptor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cpu {
    pub brand: String,
    pub name: String,
    pub number_cores: u32,
    pub number_threads: u32,
    pub min_ghz: f64,
    pub max_ghz: f64,
}

/// Graphics processor descriptor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Gpu {
    pub brand: String,
    pub name: String,
    pub min_ghz: f64,
    pub max_ghz: f64,
    pub memory: Memory,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageDriver {
    #[default]
    Unknown,
    Hdd,
    Ssd,
}

/// Persistent storage device
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Storage {
    pub driver: StorageDriver,
    pub memory: Memory,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreenPanel {
    #[default]
    Unknown,
    Ips,
    Oled,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Screen {
    pub size_inch: f32,
    pub resolution: Resolution,
    pub panel: ScreenPanel,
    pub multitouch: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyboardLayout {
    #[default]
    Unknown,
    Qwerty,
    Qwertz,
    Azerty,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Keyboard {
    pub layout: KeyboardLayout,
    pub backlit: bool,
}

/// Laptop record held by the store.
///
/// `id` is the store key and never changes once the record is saved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Laptop {
    pub id: String,
    pub brand: String,
    pub name: String,
    pub cpu: Cpu,
    pub ram: Memory,
    pub gpus: Vec<Gpu>,
    pub storages: Vec<Storage>,
    pub screen: Screen,
    pub keyboard: Keyboard,
    pub weight_kg: f64,
    pub price_usd: f64,
    pub release_year: u32,
    pub updated_at: Option<DateTime<Utc>>,
}
