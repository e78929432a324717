//! Laptop Store
//!
//! Authoritative in-memory holder of laptop records with filtered search.
//! Every read hands out an owned copy; nothing outside the store can reach
//! the records it holds.

mod filter;
mod laptop;
mod store;

pub use filter::Filter;
pub use laptop::{
    Cpu, Gpu, Keyboard, KeyboardLayout, Laptop, Memory, MemoryUnit, Resolution, Screen,
    ScreenPanel, Storage, StorageDriver,
};
pub use store::{InMemoryLaptopStore, LaptopStore};

use thiserror::Error;

/// Store errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A record with this identifier is already stored
    #[error("Laptop with ID {0} already exists")]
    AlreadyExists(String),
    /// Search was stopped by its match callback
    #[error("Search aborted: {0}")]
    Aborted(String),
    /// Unexpected failure inside the store
    #[error("Internal store error: {0}")]
    Internal(String),
}
