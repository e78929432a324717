//! Conversions between wire messages and store records
//!
//! Missing sub-messages decode to their zero values, matching protobuf
//! getter semantics. Enum values outside the known range are rejected.

use chrono::{DateTime, Utc};
use laptop_store::{
    Cpu, Filter, Gpu, Keyboard, KeyboardLayout, Laptop, Memory, MemoryUnit, Resolution, Screen,
    ScreenPanel, Storage, StorageDriver,
};
use tonic::Status;

use super::proto;

fn enum_value<E: TryFrom<i32>>(field: &str, value: i32) -> Result<E, Status> {
    E::try_from(value)
        .map_err(|_| Status::invalid_argument(format!("{} has unknown value {}", field, value)))
}

fn memory_from_proto(field: &str, memory: Option<proto::Memory>) -> Result<Memory, Status> {
    let Some(memory) = memory else {
        return Ok(Memory::default());
    };

    let unit = match enum_value::<proto::memory::Unit>(field, memory.unit)? {
        proto::memory::Unit::Unknown => MemoryUnit::Unknown,
        proto::memory::Unit::Bit => MemoryUnit::Bit,
        proto::memory::Unit::Byte => MemoryUnit::Byte,
        proto::memory::Unit::Kilobyte => MemoryUnit::Kilobyte,
        proto::memory::Unit::Megabyte => MemoryUnit::Megabyte,
        proto::memory::Unit::Gigabyte => MemoryUnit::Gigabyte,
        proto::memory::Unit::Terabyte => MemoryUnit::Terabyte,
    };

    Ok(Memory::new(memory.value, unit))
}

fn memory_to_proto(memory: Memory) -> proto::Memory {
    let unit = match memory.unit {
        MemoryUnit::Unknown => proto::memory::Unit::Unknown,
        MemoryUnit::Bit => proto::memory::Unit::Bit,
        MemoryUnit::Byte => proto::memory::Unit::Byte,
        MemoryUnit::Kilobyte => proto::memory::Unit::Kilobyte,
        MemoryUnit::Megabyte => proto::memory::Unit::Megabyte,
        MemoryUnit::Gigabyte => proto::memory::Unit::Gigabyte,
        MemoryUnit::Terabyte => proto::memory::Unit::Terabyte,
    };

    proto::Memory {
        value: memory.value,
        unit: unit as i32,
    }
}

fn timestamp_from_proto(
    ts: Option<prost_types::Timestamp>,
) -> Result<Option<DateTime<Utc>>, Status> {
    ts.map(|ts| {
        u32::try_from(ts.nanos)
            .ok()
            .and_then(|nanos| DateTime::from_timestamp(ts.seconds, nanos))
            .ok_or_else(|| Status::invalid_argument("laptop.updated_at is out of range"))
    })
    .transpose()
}

fn timestamp_to_proto(dt: DateTime<Utc>) -> prost_types::Timestamp {
    prost_types::Timestamp {
        seconds: dt.timestamp(),
        nanos: dt.timestamp_subsec_nanos() as i32,
    }
}

/// Decode a laptop received from a client
pub fn laptop_from_proto(laptop: proto::Laptop) -> Result<Laptop, Status> {
    let cpu = laptop.cpu.unwrap_or_default();

    let gpus = laptop
        .gpus
        .into_iter()
        .map(|gpu| {
            Ok(Gpu {
                brand: gpu.brand,
                name: gpu.name,
                min_ghz: gpu.min_ghz,
                max_ghz: gpu.max_ghz,
                memory: memory_from_proto("laptop.gpus.memory.unit", gpu.memory)?,
            })
        })
        .collect::<Result<Vec<_>, Status>>()?;

    let storages = laptop
        .storages
        .into_iter()
        .map(|storage| {
            let driver = match enum_value::<proto::storage::Driver>(
                "laptop.storages.driver",
                storage.driver,
            )? {
                proto::storage::Driver::Unknown => StorageDriver::Unknown,
                proto::storage::Driver::Hdd => StorageDriver::Hdd,
                proto::storage::Driver::Ssd => StorageDriver::Ssd,
            };
            Ok(Storage {
                driver,
                memory: memory_from_proto("laptop.storages.memory.unit", storage.memory)?,
            })
        })
        .collect::<Result<Vec<_>, Status>>()?;

    let screen = laptop.screen.unwrap_or_default();
    let panel = match enum_value::<proto::screen::Panel>("laptop.screen.panel", screen.panel)? {
        proto::screen::Panel::Unknown => ScreenPanel::Unknown,
        proto::screen::Panel::Ips => ScreenPanel::Ips,
        proto::screen::Panel::Oled => ScreenPanel::Oled,
    };
    let resolution = screen.resolution.unwrap_or_default();

    let keyboard = laptop.keyboard.unwrap_or_default();
    let layout = match enum_value::<proto::keyboard::Layout>(
        "laptop.keyboard.layout",
        keyboard.layout,
    )? {
        proto::keyboard::Layout::Unknown => KeyboardLayout::Unknown,
        proto::keyboard::Layout::Qwerty => KeyboardLayout::Qwerty,
        proto::keyboard::Layout::Qwertz => KeyboardLayout::Qwertz,
        proto::keyboard::Layout::Azerty => KeyboardLayout::Azerty,
    };

    Ok(Laptop {
        id: laptop.id,
        brand: laptop.brand,
        name: laptop.name,
        cpu: Cpu {
            brand: cpu.brand,
            name: cpu.name,
            number_cores: cpu.number_cores,
            number_threads: cpu.number_threads,
            min_ghz: cpu.min_ghz,
            max_ghz: cpu.max_ghz,
        },
        ram: memory_from_proto("laptop.ram.unit", laptop.ram)?,
        gpus,
        storages,
        screen: Screen {
            size_inch: screen.size_inch,
            resolution: Resolution {
                width: resolution.width,
                height: resolution.height,
            },
            panel,
            multitouch: screen.multitouch,
        },
        keyboard: Keyboard {
            layout,
            backlit: keyboard.backlit,
        },
        weight_kg: laptop.weight_kg,
        price_usd: laptop.price_usd,
        release_year: laptop.release_year,
        updated_at: timestamp_from_proto(laptop.updated_at)?,
    })
}

/// Encode a stored laptop for the wire
pub fn laptop_to_proto(laptop: Laptop) -> proto::Laptop {
    let storages = laptop
        .storages
        .into_iter()
        .map(|storage| {
            let driver = match storage.driver {
                StorageDriver::Unknown => proto::storage::Driver::Unknown,
                StorageDriver::Hdd => proto::storage::Driver::Hdd,
                StorageDriver::Ssd => proto::storage::Driver::Ssd,
            };
            proto::Storage {
                driver: driver as i32,
                memory: Some(memory_to_proto(storage.memory)),
            }
        })
        .collect();

    let panel = match laptop.screen.panel {
        ScreenPanel::Unknown => proto::screen::Panel::Unknown,
        ScreenPanel::Ips => proto::screen::Panel::Ips,
        ScreenPanel::Oled => proto::screen::Panel::Oled,
    };

    let layout = match laptop.keyboard.layout {
        KeyboardLayout::Unknown => proto::keyboard::Layout::Unknown,
        KeyboardLayout::Qwerty => proto::keyboard::Layout::Qwerty,
        KeyboardLayout::Qwertz => proto::keyboard::Layout::Qwertz,
        KeyboardLayout::Azerty => proto::keyboard::Layout::Azerty,
    };

    proto::Laptop {
        id: laptop.id,
        brand: laptop.brand,
        name: laptop.name,
        cpu: Some(proto::Cpu {
            brand: laptop.cpu.brand,
            name: laptop.cpu.name,
            number_cores: laptop.cpu.number_cores,
            number_threads: laptop.cpu.number_threads,
            min_ghz: laptop.cpu.min_ghz,
            max_ghz: laptop.cpu.max_ghz,
        }),
        ram: Some(memory_to_proto(laptop.ram)),
        gpus: laptop
            .gpus
            .into_iter()
            .map(|gpu| proto::Gpu {
                brand: gpu.brand,
                name: gpu.name,
                min_ghz: gpu.min_ghz,
                max_ghz: gpu.max_ghz,
                memory: Some(memory_to_proto(gpu.memory)),
            })
            .collect(),
        storages,
        screen: Some(proto::Screen {
            size_inch: laptop.screen.size_inch,
            resolution: Some(proto::screen::Resolution {
                width: laptop.screen.resolution.width,
                height: laptop.screen.resolution.height,
            }),
            panel: panel as i32,
            multitouch: laptop.screen.multitouch,
        }),
        keyboard: Some(proto::Keyboard {
            layout: layout as i32,
            backlit: laptop.keyboard.backlit,
        }),
        weight_kg: laptop.weight_kg,
        price_usd: laptop.price_usd,
        release_year: laptop.release_year,
        updated_at: laptop.updated_at.map(timestamp_to_proto),
    }
}

/// Decode a search filter. An absent filter matches every laptop.
pub fn filter_from_proto(filter: Option<proto::Filter>) -> Result<Filter, Status> {
    let Some(filter) = filter else {
        return Ok(Filter::default());
    };

    Ok(Filter {
        max_price_usd: filter.max_price_usd,
        min_cpu_cores: filter.min_cpu_cores,
        min_cpu_ghz: filter.min_cpu_ghz,
        min_ram: memory_from_proto("filter.min_ram.unit", filter.min_ram)?,
    })
}
