//! The laptop store abstraction and its in-memory implementation.
//!
//! Every record crossing the store boundary is cloned, so callers never share
//! structure with stored state. A database-backed store only needs to
//! implement [`LaptopStore`]; the server holds the store as a trait object.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::RwLock;

use super::error::StoreError;
use super::filter::is_qualified;
use crate::pb::{Filter, Laptop};

/// Capability set every laptop store provides.
pub trait LaptopStore: Send + Sync {
    /// Save a copy of `laptop`. Fails with [`StoreError::AlreadyExists`] when
    /// the id is taken; the stored record is left untouched in that case.
    ///
    /// The caller assigns the id. An empty id is rejected with
    /// [`StoreError::EmptyId`].
    fn save(&self, laptop: &Laptop) -> Result<(), StoreError>;

    /// Find a laptop by id, returning a copy or `None` when absent.
    fn find(&self, id: &str) -> Result<Option<Laptop>, StoreError>;

    /// Search for laptops matching `filter`, handing each match to `found`
    /// as an independent copy. Stops at, and returns, the first error `found`
    /// reports. Visit order is unspecified.
    fn search(
        &self,
        filter: &Filter,
        found: &mut dyn FnMut(Laptop) -> Result<(), StoreError>,
    ) -> Result<(), StoreError>;
}

/// Stores laptops in a process-local map guarded by a reader/writer lock.
#[derive(Debug, Default)]
pub struct InMemoryLaptopStore {
    data: RwLock<HashMap<String, Laptop>>,
}

impl InMemoryLaptopStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored laptops.
    pub fn len(&self) -> Result<usize, StoreError> {
        let data = self
            .data
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;
        Ok(data.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl LaptopStore for InMemoryLaptopStore {
    fn save(&self, laptop: &Laptop) -> Result<(), StoreError> {
        if laptop.id.is_empty() {
            return Err(StoreError::EmptyId);
        }

        let mut data = self
            .data
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))?;

        match data.entry(laptop.id.clone()) {
            Entry::Occupied(entry) => Err(StoreError::AlreadyExists(entry.key().clone())),
            Entry::Vacant(slot) => {
                slot.insert(laptop.clone());
                Ok(())
            }
        }
    }

    fn find(&self, id: &str) -> Result<Option<Laptop>, StoreError> {
        let data = self
            .data
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;
        Ok(data.get(id).cloned())
    }

    fn search(
        &self,
        filter: &Filter,
        found: &mut dyn FnMut(Laptop) -> Result<(), StoreError>,
    ) -> Result<(), StoreError> {
        let data = self
            .data
            .read()
            .map_err(|_| StoreError::LockPoisoned("search"))?;

        for laptop in data.values().filter(|laptop| is_qualified(filter, laptop)) {
            found(laptop.clone())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pb::memory::Unit;
    use crate::pb::{Cpu, Memory};
    use std::sync::Arc;

    fn laptop(id: &str, price_usd: f64) -> Laptop {
        Laptop {
            id: id.to_string(),
            brand: "Lenovo".to_string(),
            name: "Thinkpad X1".to_string(),
            cpu: Some(Cpu {
                brand: "Intel".to_string(),
                name: "Core i7-1165G7".to_string(),
                number_cores: 4,
                number_threads: 8,
                min_ghz: 2.8,
                max_ghz: 4.7,
            }),
            ram: Some(Memory::new(16, Unit::Gigabyte)),
            price_usd,
            ..Default::default()
        }
    }

    fn collect(store: &InMemoryLaptopStore, filter: &Filter) -> Vec<Laptop> {
        let mut found = Vec::new();
        store
            .search(filter, &mut |laptop| {
                found.push(laptop);
                Ok(())
            })
            .unwrap();
        found
    }

    #[test]
    fn test_save_then_find() {
        let store = InMemoryLaptopStore::new();
        let original = laptop("a", 1200.0);
        store.save(&original).unwrap();

        assert_eq!(store.find("a").unwrap(), Some(original));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_find_missing_is_none() {
        let store = InMemoryLaptopStore::new();
        assert!(store.is_empty().unwrap());
        assert_eq!(store.find("nope").unwrap(), None);
    }

    #[test]
    fn test_duplicate_save_keeps_first_record() {
        let store = InMemoryLaptopStore::new();
        store.save(&laptop("a", 1200.0)).unwrap();

        let err = store.save(&laptop("a", 1.0)).unwrap_err();
        assert_eq!(err, StoreError::AlreadyExists("a".to_string()));
        assert!(err.is_already_exists());

        let stored = store.find("a").unwrap().unwrap();
        assert!((stored.price_usd - 1200.0).abs() < f64::EPSILON);
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_empty_id_is_rejected() {
        let store = InMemoryLaptopStore::new();

        assert_eq!(store.save(&laptop("", 1200.0)), Err(StoreError::EmptyId));
        assert_eq!(store.save(&laptop("", 900.0)), Err(StoreError::EmptyId));
        assert!(store.is_empty().unwrap());
        assert_eq!(store.find("").unwrap(), None);
    }

    #[test]
    fn test_mutating_saved_value_does_not_touch_store() {
        let store = InMemoryLaptopStore::new();
        let mut original = laptop("a", 1200.0);
        store.save(&original).unwrap();

        original.brand = "Changed".to_string();
        if let Some(cpu) = original.cpu.as_mut() {
            cpu.number_cores = 64;
        }

        let stored = store.find("a").unwrap().unwrap();
        assert_eq!(stored.brand, "Lenovo");
        assert_eq!(stored.cpu.unwrap().number_cores, 4);
    }

    #[test]
    fn test_mutating_find_and_search_results_does_not_touch_store() {
        let store = InMemoryLaptopStore::new();
        store.save(&laptop("a", 1200.0)).unwrap();

        let mut copy = store.find("a").unwrap().unwrap();
        copy.name = "Mutated".to_string();
        if let Some(ram) = copy.ram.as_mut() {
            ram.value = 1;
        }

        for mut hit in collect(&store, &Filter::default()) {
            hit.brand = "Mutated".to_string();
        }

        let stored = store.find("a").unwrap().unwrap();
        assert_eq!(stored, laptop("a", 1200.0));
    }

    #[test]
    fn test_search_applies_filter() {
        let store = InMemoryLaptopStore::new();
        store.save(&laptop("cheap", 800.0)).unwrap();
        store.save(&laptop("pricey", 2500.0)).unwrap();

        let filter = Filter {
            max_price_usd: Some(1000.0),
            ..Default::default()
        };
        let hits = collect(&store, &filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits.first().unwrap().id, "cheap");
    }

    #[test]
    fn test_search_stops_on_first_callback_error() {
        let store = InMemoryLaptopStore::new();
        for i in 0..10 {
            store.save(&laptop(&format!("id-{i}"), 500.0)).unwrap();
        }

        let mut calls = 0;
        let result = store.search(&Filter::default(), &mut |_| {
            calls += 1;
            Err(StoreError::cancelled("consumer gone"))
        });

        assert_eq!(
            result,
            Err(StoreError::Cancelled("consumer gone".to_string()))
        );
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_concurrent_saves_keep_ids_unique() {
        let store = Arc::new(InMemoryLaptopStore::new());

        let successes: usize = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let store = Arc::clone(&store);
                    scope.spawn(move || {
                        (0..50)
                            .filter(|i| store.save(&laptop(&format!("id-{i}"), 100.0)).is_ok())
                            .count()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).sum()
        });

        assert_eq!(successes, 50);
        assert_eq!(store.len().unwrap(), 50);
    }
}
