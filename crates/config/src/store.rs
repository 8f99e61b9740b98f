//! Backing store for settings
//!
//! `FileStore` keeps one JSON document per application identity:
//! `{ "debugger": { "host": "127.0.0.1", ... }, "path": { ... } }`
//!
//! The document is re-read on every call and rewritten on every write.
//! Nothing is cached, so a value written by another process is visible
//! on the next read (last writer wins).

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::warn;
use serde_json::{Map, Value};

use crate::error::{Result, SettingsError};
use crate::identity::AppIdentity;
use crate::key::SettingKey;
use crate::value::SettingValue;

type Document = BTreeMap<String, BTreeMap<String, SettingValue>>;

/// Grouped key/value storage.
///
/// Groups only namespace keys; there is no atomicity across keys.
pub trait ConfigStore {
    /// True if a value has been written for (group, key).
    fn contains(&self, group: &str, key: &str) -> Result<bool> {
        Ok(self.get(group, key)?.is_some())
    }

    /// The stored value, or `None` if never written.
    fn get(&self, group: &str, key: &str) -> Result<Option<SettingValue>>;

    /// Write (or overwrite) a value. Durable once this returns `Ok`.
    fn set(&self, group: &str, key: &str, value: SettingValue) -> Result<()>;

    /// Remove a value. Returns whether it existed.
    fn remove(&self, group: &str, key: &str) -> Result<bool>;

    /// Every stored entry, ordered by group then key.
    fn entries(&self) -> Result<Vec<(SettingKey, SettingValue)>>;
}

fn flatten(doc: Document) -> Vec<(SettingKey, SettingValue)> {
    doc.into_iter()
        .flat_map(|(group, keys)| {
            keys.into_iter()
                .map(move |(name, value)| (SettingKey::new(group.clone(), name), value))
        })
        .collect()
}

// ============================================================================
// File-backed store
// ============================================================================

/// The document as read from disk. Values stay raw until a key is read, so
/// one value of an unsupported type (bool, float, null) reads as absent
/// without hiding the rest of the document, and is written back untouched.
type RawDocument = BTreeMap<String, Value>;

fn decode(group: &str, key: &str, raw: &Value) -> Option<SettingValue> {
    match serde_json::from_value(raw.clone()) {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("settings: {}/{} holds unsupported value {}, treating as absent", group, key, raw);
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Attach to the document for an application identity.
    pub fn open(identity: &AppIdentity) -> Self {
        Self::at(identity.settings_path())
    }

    /// Attach to a document at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Per-process temp file next to the document
    ///
    /// Format: `pugdebug.json` → `pugdebug.json.<pid>.tmp`
    fn temp_path(&self) -> PathBuf {
        let mut temp = self.path.as_os_str().to_owned();
        temp.push(format!(".{}.tmp", std::process::id()));
        PathBuf::from(temp)
    }

    /// Missing file = empty document.
    fn load(&self) -> Result<RawDocument> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(RawDocument::new()),
            Err(e) => return Err(self.io_error(e)),
        };
        if contents.trim().is_empty() {
            return Ok(RawDocument::new());
        }
        serde_json::from_str(&contents).map_err(|e| SettingsError::Parse {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    /// Write to a temp file then rename over the document.
    fn store(&self, doc: &RawDocument) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let json = serde_json::to_string_pretty(doc).map_err(|e| self.parse_error(e))?;

        let temp = self.temp_path();
        fs::write(&temp, json).map_err(|e| self.io_error(e))?;
        fs::rename(&temp, &self.path).map_err(|e| self.io_error(e))
    }

    fn io_error(&self, e: std::io::Error) -> SettingsError {
        SettingsError::Io { path: self.path.clone(), message: e.to_string() }
    }

    fn parse_error(&self, e: serde_json::Error) -> SettingsError {
        SettingsError::Parse { path: self.path.clone(), message: e.to_string() }
    }
}

impl ConfigStore for FileStore {
    fn get(&self, group: &str, key: &str) -> Result<Option<SettingValue>> {
        let doc = self.load()?;
        Ok(doc
            .get(group)
            .and_then(Value::as_object)
            .and_then(|keys| keys.get(key))
            .and_then(|raw| decode(group, key, raw)))
    }

    fn set(&self, group: &str, key: &str, value: SettingValue) -> Result<()> {
        let mut doc = self.load()?;
        let raw = serde_json::to_value(&value).map_err(|e| self.parse_error(e))?;

        let slot = doc
            .entry(group.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            warn!("settings: group {} is not an object, replacing it", group);
            *slot = Value::Object(Map::new());
        }
        if let Some(keys) = slot.as_object_mut() {
            keys.insert(key.to_string(), raw);
        }
        self.store(&doc)
    }

    fn remove(&self, group: &str, key: &str) -> Result<bool> {
        let mut doc = self.load()?;
        let Some(keys) = doc.get_mut(group).and_then(Value::as_object_mut) else {
            return Ok(false);
        };
        if keys.remove(key).is_none() {
            return Ok(false);
        }
        if keys.is_empty() {
            doc.remove(group);
        }
        self.store(&doc)?;
        Ok(true)
    }

    fn entries(&self) -> Result<Vec<(SettingKey, SettingValue)>> {
        let doc = self.load()?;
        let mut entries: Vec<_> = doc
            .iter()
            .filter_map(|(group, keys)| keys.as_object().map(|keys| (group, keys)))
            .flat_map(|(group, keys)| {
                keys.iter().filter_map(move |(name, raw)| {
                    decode(group, name, raw)
                        .map(|value| (SettingKey::new(group.as_str(), name.as_str()), value))
                })
            })
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(entries)
    }
}

// ============================================================================
// In-memory store
// ============================================================================

/// Non-persistent store, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    doc: RefCell<Document>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigStore for MemoryStore {
    fn get(&self, group: &str, key: &str) -> Result<Option<SettingValue>> {
        Ok(self.doc.borrow().get(group).and_then(|keys| keys.get(key)).cloned())
    }

    fn set(&self, group: &str, key: &str, value: SettingValue) -> Result<()> {
        self.doc
            .borrow_mut()
            .entry(group.to_string())
            .or_default()
            .insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, group: &str, key: &str) -> Result<bool> {
        let mut doc = self.doc.borrow_mut();
        let removed = doc.get_mut(group).and_then(|keys| keys.remove(key)).is_some();
        if doc.get(group).is_some_and(|keys| keys.is_empty()) {
            doc.remove(group);
        }
        Ok(removed)
    }

    fn entries(&self) -> Result<Vec<(SettingKey, SettingValue)>> {
        Ok(flatten(self.doc.borrow().clone()))
    }
}
