use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;

/// Narrow durable key-value capability the preference store is written
/// against. Any backing that can hold string keys and JSON string values
/// works: sqlite on disk, an in-memory map, or whatever the host embeds.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn clear(&self) -> Result<()> {
        (**self).clear()
    }
}

/// Ephemeral backing for tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryStore {
    data: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.data.lock().expect("memory store lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .data
            .lock()
            .expect("memory store lock poisoned")
            .get(key)
            .cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.data
            .lock()
            .expect("memory store lock poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.data
            .lock()
            .expect("memory store lock poisoned")
            .remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.data
            .lock()
            .expect("memory store lock poisoned")
            .clear();
        Ok(())
    }
}

/// Backing that refuses every write, simulating an unavailable or
/// quota-exhausted storage substrate.
#[cfg(test)]
pub(crate) struct FailingStore;

#[cfg(test)]
impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<()> {
        anyhow::bail!("storage quota exceeded")
    }

    fn remove(&self, _key: &str) -> Result<()> {
        anyhow::bail!("storage unavailable")
    }

    fn clear(&self) -> Result<()> {
        anyhow::bail!("storage unavailable")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove_clear() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.clear().unwrap();
        assert!(store.is_empty());
    }
}
