//! Preference persistence
//!
//! A tiny key-value store abstraction. The browser build keeps values in
//! `localStorage`, the CLI in a JSON file, and tests in memory. Only the
//! theme name is stored today.

use crate::error::Result;
use std::collections::BTreeMap;

/// Key-value preference storage
pub trait PreferenceStore {
    /// Read a value, `None` if absent or unreadable
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use super::PreferenceStore;
    use crate::error::Result;
    use std::collections::BTreeMap;
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    /// Preferences kept as a flat JSON object on disk
    #[derive(Debug)]
    pub struct JsonFileStore {
        path: PathBuf,
        values: BTreeMap<String, String>,
    }

    impl JsonFileStore {
        /// Open the store at `path`. A missing file is an empty store.
        pub fn open(path: impl AsRef<Path>) -> Result<Self> {
            let path = path.as_ref().to_path_buf();
            let values = match fs::read_to_string(&path) {
                Ok(text) => serde_json::from_str(&text)?,
                Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
                Err(e) => return Err(e.into()),
            };
            Ok(Self { path, values })
        }

        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl PreferenceStore for JsonFileStore {
        fn get(&self, key: &str) -> Option<String> {
            self.values.get(key).cloned()
        }

        fn set(&mut self, key: &str, value: &str) -> Result<()> {
            self.values.insert(key.to_string(), value.to_string());
            let text = serde_json::to_string_pretty(&self.values)?;
            fs::write(&self.path, text)?;
            Ok(())
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::LocalStorage;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::PreferenceStore;
    use crate::error::{Error, Result};

    /// Browser `localStorage`
    pub struct LocalStorage {
        storage: Option<web_sys::Storage>,
    }

    impl LocalStorage {
        /// Bind to the window's storage. Missing storage (private mode,
        /// sandboxed frames) degrades to a store that never holds anything.
        pub fn open() -> Self {
            let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
            if storage.is_none() {
                log::warn!("localStorage unavailable; preferences will not persist");
            }
            Self { storage }
        }
    }

    impl PreferenceStore for LocalStorage {
        fn get(&self, key: &str) -> Option<String> {
            self.storage.as_ref()?.get_item(key).ok().flatten()
        }

        fn set(&mut self, key: &str, value: &str) -> Result<()> {
            let storage = self
                .storage
                .as_ref()
                .ok_or_else(|| Error::Storage("localStorage unavailable".into()))?;
            storage
                .set_item(key, value)
                .map_err(|e| Error::Storage(format!("{:?}", e)))
        }
    }
}
