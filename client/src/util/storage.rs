//! Durable client-local key-value storage.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store mirrors itself through [`DurableStorage`]. In the browser
//! that is `window.localStorage`; natively (tests, non-`csr` builds) an
//! in-memory map stands in so a "reload" is just a second store seeded from
//! the same map.
//!
//! ERROR HANDLING
//! ==============
//! Every operation is total. Storage failures are logged and swallowed, and
//! malformed JSON reads as absent.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// String-keyed persistence that survives a page reload.
pub trait DurableStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
}

/// `window.localStorage`. Reads return `None` outside the browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl DurableStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            None
        }
    }

    fn set_item(&self, key: &str, value: &str) {
        #[cfg(feature = "csr")]
        {
            let Some(storage) = local_storage() else {
                leptos::logging::warn!("localStorage unavailable; `{key}` not persisted");
                return;
            };
            if storage.set_item(key, value).is_err() {
                leptos::logging::warn!("localStorage rejected write for `{key}`");
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, value);
        }
    }

    fn remove_item(&self, key: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
        }
    }
}

/// Shared in-memory map. Clones see the same entries.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn contains_key(&self, key: &str) -> bool {
        self.items.lock().contains_key(key)
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }
}

impl DurableStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.lock().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items.lock().insert(key.to_owned(), value.to_owned());
    }

    fn remove_item(&self, key: &str) {
        self.items.lock().remove(key);
    }
}

/// Load a JSON value stored under `key`. Missing or malformed entries are `None`.
pub fn load_json<T: DeserializeOwned>(storage: &dyn DurableStorage, key: &str) -> Option<T> {
    let raw = storage.get_item(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            leptos::logging::warn!("ignoring malformed `{key}` entry: {e}");
            None
        }
    }
}

/// Save `value` as JSON under `key`.
pub fn save_json<T: Serialize>(storage: &dyn DurableStorage, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => storage.set_item(key, &raw),
        Err(e) => leptos::logging::warn!("failed to serialize `{key}`: {e}"),
    }
}
