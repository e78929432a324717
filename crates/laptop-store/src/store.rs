//! Store Implementation

use std::collections::HashMap;
use std::sync::RwLock;

use crate::filter::Filter;
use crate::laptop::Laptop;
use crate::StoreError;

/// Storage for laptop records.
///
/// Implementations must be safe to share across threads: saves and searches
/// may run concurrently from any number of callers.
pub trait LaptopStore: Send + Sync {
    /// Store a copy of `laptop` under its ID and return that ID
    fn save(&self, laptop: &Laptop) -> Result<String, StoreError>;

    /// Look up a laptop by ID. Absence is `Ok(None)`.
    fn find(&self, id: &str) -> Result<Option<Laptop>, StoreError>;

    /// Call `on_match` with a copy of every laptop that satisfies `filter`.
    ///
    /// Iteration order is unspecified. The first error returned by
    /// `on_match` stops the search and is returned as-is.
    fn search(
        &self,
        filter: &Filter,
        on_match: &mut dyn FnMut(Laptop) -> Result<(), StoreError>,
    ) -> Result<(), StoreError>;

    /// Number of stored laptops
    fn count(&self) -> usize;
}

/// Laptop store backed by a `HashMap` behind a single read/write lock
#[derive(Debug, Default)]
pub struct InMemoryLaptopStore {
    data: RwLock<HashMap<String, Laptop>>,
}

impl InMemoryLaptopStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl LaptopStore for InMemoryLaptopStore {
    fn save(&self, laptop: &Laptop) -> Result<String, StoreError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| StoreError::Internal(format!("Lock error: {}", e)))?;

        if data.contains_key(&laptop.id) {
            return Err(StoreError::AlreadyExists(laptop.id.clone()));
        }

        data.insert(laptop.id.clone(), laptop.clone());
        Ok(laptop.id.clone())
    }

    fn find(&self, id: &str) -> Result<Option<Laptop>, StoreError> {
        let data = self
            .data
            .read()
            .map_err(|e| StoreError::Internal(format!("Lock error: {}", e)))?;

        Ok(data.get(id).cloned())
    }

    fn search(
        &self,
        filter: &Filter,
        on_match: &mut dyn FnMut(Laptop) -> Result<(), StoreError>,
    ) -> Result<(), StoreError> {
        let data = self
            .data
            .read()
            .map_err(|e| StoreError::Internal(format!("Lock error: {}", e)))?;

        for laptop in data.values().filter(|laptop| filter.matches(laptop)) {
            on_match(laptop.clone())?;
        }

        Ok(())
    }

    fn count(&self) -> usize {
        self.data.read().map(|d| d.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::laptop::{Cpu, Memory, MemoryUnit};
    use std::collections::HashSet;
    use std::sync::Arc;

    fn laptop(id: &str) -> Laptop {
        Laptop {
            id: id.to_string(),
            brand: "Apple".to_string(),
            name: "Macbook Air".to_string(),
            cpu: Cpu {
                brand: "Intel".to_string(),
                name: "Core i7-9750H".to_string(),
                number_cores: 6,
                number_threads: 12,
                min_ghz: 2.6,
                max_ghz: 4.5,
            },
            ram: Memory::new(16, MemoryUnit::Gigabyte),
            price_usd: 1999.0,
            release_year: 2019,
            ..Default::default()
        }
    }

    #[test]
    fn test_save_and_find() {
        let store = InMemoryLaptopStore::new();
        let original = laptop("a");

        let id = store.save(&original).unwrap();
        assert_eq!(id, "a");

        let found = store.find("a").unwrap().unwrap();
        assert_eq!(found, original);
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_find_missing_is_none() {
        let store = InMemoryLaptopStore::new();
        assert_eq!(store.find("missing").unwrap(), None);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let store = InMemoryLaptopStore::new();
        store.save(&laptop("dup")).unwrap();

        let mut other = laptop("dup");
        other.price_usd = 1.0;
        let err = store.save(&other).unwrap_err();
        assert_eq!(err, StoreError::AlreadyExists("dup".to_string()));

        // First write wins
        assert_eq!(store.find("dup").unwrap().unwrap().price_usd, 1999.0);
    }

    #[test]
    fn test_returned_copies_are_isolated() {
        let store = InMemoryLaptopStore::new();
        let mut original = laptop("iso");
        store.save(&original).unwrap();

        // Mutating the caller's value after save does not reach the store
        original.price_usd = 0.0;

        let mut found = store.find("iso").unwrap().unwrap();
        found.cpu.number_cores = 1;
        found.ram = Memory::new(1, MemoryUnit::Byte);

        let again = store.find("iso").unwrap().unwrap();
        assert_eq!(again, laptop("iso"));
    }

    #[test]
    fn test_search_reports_only_matches() {
        let store = InMemoryLaptopStore::new();
        store.save(&laptop("fast")).unwrap();

        let mut slow = laptop("slow");
        slow.cpu.min_ghz = 1.2;
        store.save(&slow).unwrap();

        let filter = Filter {
            min_cpu_ghz: 2.0,
            ..Default::default()
        };

        let mut found = Vec::new();
        store
            .search(&filter, &mut |l| {
                found.push(l.id);
                Ok(())
            })
            .unwrap();

        assert_eq!(found, vec!["fast".to_string()]);
    }

    #[test]
    fn test_search_stops_on_callback_error() {
        let store = InMemoryLaptopStore::new();
        for i in 0..10 {
            store.save(&laptop(&format!("l{}", i))).unwrap();
        }

        let mut calls = 0;
        let result = store.search(&Filter::default(), &mut |_| {
            calls += 1;
            if calls == 3 {
                Err(StoreError::Aborted("stop".to_string()))
            } else {
                Ok(())
            }
        });

        assert_eq!(result, Err(StoreError::Aborted("stop".to_string())));
        assert_eq!(calls, 3);

        // Lock is released after an aborted search
        store.save(&laptop("after")).unwrap();
    }

    #[test]
    fn test_concurrent_saves() {
        let store = Arc::new(InMemoryLaptopStore::new());

        let handles: Vec<_> = (0..16)
            .map(|t| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..50 {
                        store.save(&laptop(&format!("{}-{}", t, i))).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.count(), 16 * 50);
        for t in 0..16 {
            for i in 0..50 {
                assert!(store.find(&format!("{}-{}", t, i)).unwrap().is_some());
            }
        }
    }

    #[test]
    fn test_concurrent_duplicate_saves_one_winner() {
        let store = Arc::new(InMemoryLaptopStore::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.save(&laptop("race")))
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let ok = results.iter().filter(|r| r.is_ok()).count();
        let dup = results
            .iter()
            .filter(|r| matches!(r, Err(StoreError::AlreadyExists(_))))
            .count();

        assert_eq!(ok, 1);
        assert_eq!(dup, 7);
    }

    #[test]
    fn test_search_concurrent_with_saves() {
        let store = Arc::new(InMemoryLaptopStore::new());
        for i in 0..100 {
            store.save(&laptop(&format!("seed-{}", i))).unwrap();
        }

        let writer = {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for i in 0..100 {
                    store.save(&laptop(&format!("new-{}", i))).unwrap();
                }
            })
        };

        for _ in 0..10 {
            let mut ids = HashSet::new();
            store
                .search(&Filter::default(), &mut |l| {
                    assert!(ids.insert(l.id));
                    Ok(())
                })
                .unwrap();
            assert!(ids.len() >= 100);
        }

        writer.join().unwrap();
        assert_eq!(store.count(), 200);
    }
}
