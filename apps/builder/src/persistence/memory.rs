//! In-memory store for tests.

use std::collections::HashMap;
use std::io;
use std::sync::Mutex;

use super::storage::KeyValueStore;

/// In-memory store. Tracks the number of writes so debounce behaviour can be
/// asserted.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    values: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryInner> {
        // A poisoned lock only means a test panicked mid-write; the map is still usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.lock().values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        let mut inner = self.lock();
        inner.values.insert(key.to_string(), value.to_string());
        inner.writes += 1;
        Ok(())
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        self.lock().values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::DATA_KEY;

    #[test]
    fn test_memory_store_counts_writes() {
        let store = MemoryStore::new();
        store.set(DATA_KEY, "{}").unwrap();
        store.set(DATA_KEY, "{\"name\":\"a\"}").unwrap();
        assert_eq!(store.write_count(), 2);
        assert_eq!(store.get(DATA_KEY).unwrap().as_deref(), Some("{\"name\":\"a\"}"));
        store.remove(DATA_KEY).unwrap();
        assert_eq!(store.get(DATA_KEY).unwrap(), None);
    }
}
