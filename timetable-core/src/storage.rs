//! String key-value storage backing the durable state.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::{TimetableError, TimetableResult};

pub const MISSED_LESSONS_KEY: &str = "missedLessons";
pub const CUSTOM_LESSONS_KEY: &str = "customLessons";
pub const ACTIVE_GROUP_KEY: &str = "activeGroupId";

/// Minimal string key-value store.
pub trait Storage {
    fn get(&self, key: &str) -> TimetableResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> TimetableResult<()>;
}

/// One file per key inside a state directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    fn path(&self, key: &str) -> TimetableResult<PathBuf> {
        let valid = !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(TimetableError::InvalidKey(format!("storage key '{key}'")));
        }
        Ok(self.dir.join(key))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> TimetableResult<Option<String>> {
        let path = self.path(key)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> TimetableResult<()> {
        let path = self.path(key)?;
        std::fs::create_dir_all(&self.dir)?;

        let temp = self.dir.join(format!("{key}.tmp"));
        std::fs::write(&temp, value)?;
        std::fs::rename(&temp, &path)?;
        Ok(())
    }
}

/// In-process storage; nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> TimetableResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> TimetableResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage for hosts with no persistent storage at all. Every call fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStorage;

impl Storage for UnavailableStorage {
    fn get(&self, _key: &str) -> TimetableResult<Option<String>> {
        Err(TimetableError::StorageUnavailable)
    }

    fn set(&mut self, _key: &str, _value: &str) -> TimetableResult<()> {
        Err(TimetableError::StorageUnavailable)
    }
}
