//! String-keyed storage for the few values that outlive a game
//!
//! Backends:
//! - `MemoryStore`: in-process map (tests, embedding)
//! - `FileStore`: JSON object on disk (native)
//! - `LocalStore`: browser LocalStorage (wasm32)
//!
//! Stores never fail loudly. A read that cannot be satisfied is `None`, a
//! write that cannot be completed is logged and dropped.

use std::collections::BTreeMap;

#[cfg(not(target_arch = "wasm32"))]
mod files;
#[cfg(target_arch = "wasm32")]
mod local;

#[cfg(not(target_arch = "wasm32"))]
pub use files::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStore;

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        (**self).set(key, value)
    }
}

/// Volatile store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_get_set() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get("highscore"), None);
        store.set("highscore", "120");
        store.set("highscore", "340");
        assert_eq!(store.get("highscore").as_deref(), Some("340"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn boxed_store_forwards() {
        let mut store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        store.set("k", "v");
        assert_eq!(store.get("k").as_deref(), Some("v"));
    }
}
