//! Sample Laptop Generator
//!
//! Produces random but internally consistent laptops: boost clock never
//! below base clock, at least one thread per core, realistic RAM and
//! storage sizes.

use chrono::Utc;
use laptop_store::{
    Cpu, Gpu, Keyboard, KeyboardLayout, Laptop, Memory, MemoryUnit, Resolution, Screen,
    ScreenPanel, Storage, StorageDriver,
};
use rand::Rng;
use uuid::Uuid;

const LAPTOP_MODELS: &[(&str, &[&str])] = &[
    ("Apple", &["Macbook Air", "Macbook Pro"]),
    ("Dell", &["Latitude", "Vostro", "XPS", "Alienware"]),
    ("Lenovo", &["Thinkpad X1", "Thinkpad P1", "Thinkpad P53"]),
];

const INTEL_CPUS: &[&str] = &["Xeon E-2286M", "Core i9-9980HK", "Core i7-9750H", "Core i5-9400F"];
const AMD_CPUS: &[&str] = &["Ryzen 7 PRO 2700U", "Ryzen 5 PRO 3500U", "Ryzen 3 PRO 3200GE"];
const NVIDIA_GPUS: &[&str] = &["RTX 2060", "RTX 2070", "GTX 1660-Ti", "GTX 1070"];
const AMD_GPUS: &[&str] = &["RX 590", "RX 580", "RX 5700-XT", "RX Vega-56"];

/// Generate a random laptop with a fresh UUID v4 identifier
pub fn new_laptop() -> Laptop {
    let mut rng = rand::thread_rng();
    let (brand, models) = *pick(&mut rng, LAPTOP_MODELS);

    Laptop {
        id: Uuid::new_v4().to_string(),
        brand: brand.to_string(),
        name: pick(&mut rng, models).to_string(),
        cpu: new_cpu(),
        ram: Memory::new(rng.gen_range(4..=64), MemoryUnit::Gigabyte),
        gpus: (0..rng.gen_range(1..=2)).map(|_| new_gpu()).collect(),
        storages: vec![
            Storage {
                driver: StorageDriver::Ssd,
                memory: Memory::new(rng.gen_range(128..=1024), MemoryUnit::Gigabyte),
            },
            Storage {
                driver: StorageDriver::Hdd,
                memory: Memory::new(rng.gen_range(1..=6), MemoryUnit::Terabyte),
            },
        ],
        screen: new_screen(),
        keyboard: new_keyboard(),
        weight_kg: round2(rng.gen_range(1.0..3.0)),
        price_usd: round2(rng.gen_range(1500.0..3500.0)),
        release_year: rng.gen_range(2015..=2024),
        updated_at: Some(Utc::now()),
    }
}

/// Generate a random CPU
pub fn new_cpu() -> Cpu {
    let mut rng = rand::thread_rng();
    let (brand, names) = if rng.gen_bool(0.5) {
        ("Intel", INTEL_CPUS)
    } else {
        ("AMD", AMD_CPUS)
    };

    let number_cores = rng.gen_range(2..=8);
    let number_threads = rng.gen_range(number_cores..=12);
    let min_ghz = round2(rng.gen_range(2.0..3.5));
    let max_ghz = round2(rng.gen_range(min_ghz..=5.0));

    Cpu {
        brand: brand.to_string(),
        name: pick(&mut rng, names).to_string(),
        number_cores,
        number_threads,
        min_ghz,
        max_ghz,
    }
}

/// Generate a random discrete GPU
pub fn new_gpu() -> Gpu {
    let mut rng = rand::thread_rng();
    let (brand, names) = if rng.gen_bool(0.5) {
        ("NVIDIA", NVIDIA_GPUS)
    } else {
        ("AMD", AMD_GPUS)
    };

    let min_ghz = round2(rng.gen_range(1.0..1.5));
    let max_ghz = round2(rng.gen_range(min_ghz..=2.0));

    Gpu {
        brand: brand.to_string(),
        name: pick(&mut rng, names).to_string(),
        min_ghz,
        max_ghz,
        memory: Memory::new(rng.gen_range(2..=6), MemoryUnit::Gigabyte),
    }
}

/// Generate a random screen with a 16:9 resolution
pub fn new_screen() -> Screen {
    let mut rng = rand::thread_rng();
    let height = rng.gen_range(1080..=4320);
    let width = height * 16 / 9;

    Screen {
        size_inch: (rng.gen_range(13.0f32..17.0) * 10.0).round() / 10.0,
        resolution: Resolution { width, height },
        panel: if rng.gen_bool(0.5) {
            ScreenPanel::Ips
        } else {
            ScreenPanel::Oled
        },
        multitouch: rng.gen_bool(0.5),
    }
}

/// Generate a random keyboard
pub fn new_keyboard() -> Keyboard {
    let mut rng = rand::thread_rng();
    Keyboard {
        layout: *pick(
            &mut rng,
            &[KeyboardLayout::Qwerty, KeyboardLayout::Qwertz, KeyboardLayout::Azerty],
        ),
        backlit: rng.gen_bool(0.5),
    }
}

fn pick<'a, T, R: Rng>(rng: &mut R, items: &'a [T]) -> &'a T {
    // Every table above is non-empty
    &items[rng.gen_range(0..items.len())]
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
