//! Settings facade
//!
//! `Settings` is constructed once at startup with [`Settings::initialize`]
//! and handed by reference to everything that needs configuration. There
//! is no global instance.
//!
//! Reads are forgiving: an unknown key, a malformed key, or an unreadable
//! store all read as absent. Writes through [`Settings::set`] are
//! best-effort and only logged on failure; use [`Settings::try_set`] when
//! the caller wants the error.

use std::path::PathBuf;

use log::{debug, warn};

use crate::defaults::DefaultsInitializer;
use crate::error::Result;
use crate::identity::AppIdentity;
use crate::key::SettingKey;
use crate::sections::{DebuggerSettings, PathSettings};
use crate::store::{ConfigStore, FileStore};
use crate::value::SettingValue;

pub struct Settings<S: ConfigStore = FileStore> {
    store: S,
    defaults: DefaultsInitializer,
}

impl Settings<FileStore> {
    /// Attach to the pugdebug settings document and apply defaults.
    pub fn open_default() -> Result<Self> {
        Self::initialize(FileStore::open(&AppIdentity::PUGDEBUG))
    }
}

impl<S: ConfigStore> Settings<S> {
    /// Attach to `store` and write any missing defaults.
    ///
    /// Fails if the store cannot be read or written.
    pub fn initialize(store: S) -> Result<Self> {
        Self::with_defaults(store, DefaultsInitializer::from_environment())
    }

    /// Like [`Settings::initialize`] with an explicit home directory.
    pub fn initialize_with_home(store: S, home: impl Into<PathBuf>) -> Result<Self> {
        Self::with_defaults(store, DefaultsInitializer::new(home))
    }

    fn with_defaults(store: S, defaults: DefaultsInitializer) -> Result<Self> {
        let written = defaults.apply(&store)?;
        debug!("settings: initialized, {} default(s) written", written);
        Ok(Self { store, defaults })
    }

    fn resolve(key: &str) -> Option<SettingKey> {
        match SettingKey::parse(key) {
            Ok(key) => Some(key),
            Err(e) => {
                warn!("settings: {}", e);
                None
            }
        }
    }

    /// Value for `group/name`, or `None` if never written.
    pub fn get(&self, key: &str) -> Option<SettingValue> {
        let key = Self::resolve(key)?;
        self.store.get(&key.group, &key.name).unwrap_or_else(|e| {
            warn!("settings: reading {}: {}", key, e);
            None
        })
    }

    /// True if `group/name` has been written, even with an empty value.
    pub fn has(&self, key: &str) -> bool {
        let Some(key) = Self::resolve(key) else {
            return false;
        };
        self.store.contains(&key.group, &key.name).unwrap_or_else(|e| {
            warn!("settings: reading {}: {}", key, e);
            false
        })
    }

    /// Write `group/name`. Failures are logged and otherwise ignored.
    pub fn set(&self, key: &str, value: impl Into<SettingValue>) {
        if let Err(e) = self.try_set(key, value) {
            warn!("settings: writing {}: {}", key, e);
        }
    }

    pub fn try_set(&self, key: &str, value: impl Into<SettingValue>) -> Result<()> {
        let key = SettingKey::parse(key)?;
        self.store.set(&key.group, &key.name, value.into())
    }

    /// Remove `group/name`. Returns whether it existed.
    ///
    /// A removed default comes back on the next [`Settings::initialize`].
    pub fn remove(&self, key: &str) -> Result<bool> {
        let key = SettingKey::parse(key)?;
        self.store.remove(&key.group, &key.name)
    }

    /// Restore the default for `group/name`.
    ///
    /// Returns the restored value, or `None` (leaving the store untouched)
    /// for keys that have no default.
    pub fn reset(&self, key: &str) -> Result<Option<SettingValue>> {
        let key = SettingKey::parse(key)?;
        let Some(value) = self.defaults.default_for(&key.group, &key.name) else {
            return Ok(None);
        };
        self.store.set(&key.group, &key.name, value.clone())?;
        Ok(Some(value))
    }

    pub fn entries(&self) -> Result<Vec<(SettingKey, SettingValue)>> {
        self.store.entries()
    }

    pub fn defaults(&self) -> &DefaultsInitializer {
        &self.defaults
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Typed view of the `debugger` group.
    pub fn debugger(&self) -> DebuggerSettings {
        DebuggerSettings::load(self)
    }

    /// Typed view of the `path` group.
    pub fn paths(&self) -> PathSettings {
        PathSettings::load(self)
    }
}
