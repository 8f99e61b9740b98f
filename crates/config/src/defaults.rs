//! First-run defaults
//!
//! Every key below is guaranteed present once defaults have been applied.
//! Applying is idempotent: an existing value is never replaced, so a user's
//! edits survive every restart.

use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::Result;
use crate::key::Group;
use crate::store::ConfigStore;
use crate::value::SettingValue;

/// A default whose value is known at compile time
#[derive(Debug, Clone, Copy)]
pub struct DefaultEntry {
    pub group: Group,
    pub key: &'static str,
    pub value: StaticValue,
}

#[derive(Debug, Clone, Copy)]
pub enum StaticValue {
    Integer(i64),
    Text(&'static str),
}

impl From<StaticValue> for SettingValue {
    fn from(value: StaticValue) -> Self {
        match value {
            StaticValue::Integer(n) => SettingValue::Integer(n),
            StaticValue::Text(s) => SettingValue::Text(s.to_string()),
        }
    }
}

pub const PROJECT_ROOT: &str = "project_root";

/// Static defaults. `path/project_root` is computed at apply time from the
/// user's home directory and is not listed here.
pub const DEFAULTS: &[DefaultEntry] = &[
    DefaultEntry { group: Group::Debugger, key: "host", value: StaticValue::Text("127.0.0.1") },
    DefaultEntry { group: Group::Debugger, key: "port_number", value: StaticValue::Integer(9000) },
    DefaultEntry { group: Group::Debugger, key: "idekey", value: StaticValue::Text("pugdebug") },
    DefaultEntry {
        group: Group::Debugger,
        key: "break_at_first_line",
        value: StaticValue::Integer(2), // CheckState::Checked
    },
    // Depth/children/data limits are stored as text
    DefaultEntry { group: Group::Debugger, key: "max_depth", value: StaticValue::Text("3") },
    DefaultEntry { group: Group::Debugger, key: "max_children", value: StaticValue::Text("128") },
    DefaultEntry { group: Group::Debugger, key: "max_data", value: StaticValue::Text("512") },
    DefaultEntry { group: Group::Path, key: "path_mapping", value: StaticValue::Text("") },
];

/// Populates missing keys with their defaults.
#[derive(Debug, Clone)]
pub struct DefaultsInitializer {
    home: PathBuf,
}

impl DefaultsInitializer {
    /// `home` becomes the default `path/project_root`.
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    /// Use the current user's home directory, or `~` when it can't be
    /// resolved.
    pub fn from_environment() -> Self {
        Self::new(resolve_home(dirs::home_dir()))
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Default `path/project_root`.
    ///
    /// Values are stored as text, so a home path that is not valid UTF-8 is
    /// stored lossily (invalid bytes become U+FFFD) and will not name the
    /// same directory.
    fn project_root(&self) -> SettingValue {
        SettingValue::Text(self.home.to_string_lossy().into_owned())
    }

    /// Default for (group, key), or `None` for keys outside the table.
    pub fn default_for(&self, group: &str, key: &str) -> Option<SettingValue> {
        if group == Group::Path.as_str() && key == PROJECT_ROOT {
            return Some(self.project_root());
        }
        DEFAULTS
            .iter()
            .find(|entry| entry.group.as_str() == group && entry.key == key)
            .map(|entry| entry.value.into())
    }

    /// Every (group, key, default) in table order.
    pub fn all(&self) -> Vec<(Group, &'static str, SettingValue)> {
        let mut all: Vec<_> = DEFAULTS
            .iter()
            .map(|entry| (entry.group, entry.key, SettingValue::from(entry.value)))
            .collect();
        let path_at = all
            .iter()
            .position(|(group, _, _)| *group == Group::Path)
            .unwrap_or(all.len());
        all.insert(
            path_at,
            (Group::Path, PROJECT_ROOT, self.project_root()),
        );
        all
    }

    /// Write every missing default. Returns how many keys were written.
    pub fn apply<S: ConfigStore + ?Sized>(&self, store: &S) -> Result<usize> {
        let mut written = 0;
        for (group, key, value) in self.all() {
            if store.contains(group.as_str(), key)? {
                continue;
            }
            debug!("settings: default {}/{} = {}", group.as_str(), key, value);
            store.set(group.as_str(), key, value)?;
            written += 1;
        }
        Ok(written)
    }
}

/// An unresolvable home directory is not fatal; `project_root` falls back
/// to the literal `~`.
pub fn resolve_home(found: Option<PathBuf>) -> PathBuf {
    found.unwrap_or_else(|| {
        warn!("settings: cannot resolve the home directory, using ~ for project_root");
        PathBuf::from("~")
    })
}
