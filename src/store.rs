// Persistence layer.
//
// The popup keeps its configuration in a host key-value store. Here the host
// is a JSON file in the user's home directory (the same place the CLI used
// to keep its session token), behind a small trait so the flows can be
// driven by an in-memory store in tests.

use crate::credential::Credential;
use crate::error::{BlinkoError, Result};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Key under which the credential JSON is stored.
pub const CONFIG_KEY: &str = "blinkoConfig";

/// Default file name of the on-disk store.
pub const STORE_FILE_NAME: &str = ".blinko_capture.json";

/// String key-value storage. `set` replaces any previous value for the key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Default store location: `~/.blinko_capture.json`, or the current
/// directory when no home directory can be determined.
pub fn default_store_path() -> PathBuf {
    let dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    dir.join(STORE_FILE_NAME)
}

/// Store backed by a single JSON object on disk. A missing file reads as an
/// empty store. Every `set` rewrites the whole file through a temp file and
/// a rename, so the file is never half-written. The temp file is created
/// owner-only, so the token is not world-readable.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let data = std::fs::read_to_string(&self.path)?;
        if data.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&data)?)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        debug!(path = ?self.path, key, "Reading store");
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        debug!(path = ?self.path, key, "Writing store");
        let mut entries = match self.read_all() {
            Ok(entries) => entries,
            Err(BlinkoError::Json(e)) => {
                warn!(path = ?self.path, error = %e, "Store file is corrupt, replacing it");
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        entries.insert(key.to_string(), value.to_string());

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;
        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(serde_json::to_string_pretty(&entries)?.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

/// Process-local store, used by tests and dry runs.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Typed view over a [`KeyValueStore`] for the single credential entry.
/// Performs no validation: callers probe the remote before calling `set`.
pub struct CredentialStore<'a> {
    store: &'a mut dyn KeyValueStore,
}

impl<'a> CredentialStore<'a> {
    pub fn new(store: &'a mut dyn KeyValueStore) -> Self {
        Self { store }
    }

    pub fn get(&self) -> Result<Option<Credential>> {
        match self.store.get(CONFIG_KEY)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Overwrite the stored credential wholesale.
    pub fn set(&mut self, credential: &Credential) -> Result<()> {
        let raw = serde_json::to_string(credential)?;
        self.store.set(CONFIG_KEY, &raw)
    }

    pub fn is_configured(&self) -> Result<bool> {
        Ok(self.store.get(CONFIG_KEY)?.is_some())
    }
}
